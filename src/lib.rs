//! Core of a Bible-reading calendar: validates a reading-plan configuration,
//! resolves its start date, walks the calendar months the plan covers and
//! encodes each month as a renderer query string.
//!
//! ```
//! use chrono::NaiveDate;
//! use reading_calendar::{PlanForm, encode, months_to_render, resolve_start_date};
//!
//! let today = NaiveDate::from_ymd_opt(2022, 6, 15).unwrap();
//! let config = PlanForm::default().finalize(today).unwrap();
//! let start = resolve_start_date(&config, today).unwrap();
//! let mut months = months_to_render(&config, start).unwrap();
//! assert_eq!(months.len(), 13);
//!
//! let first = months.next().unwrap();
//! assert!(encode(&config, first, start).starts_with("c=new-testament&r1=sunday&r2=saturday&y=2022&m=6"));
//! ```

mod consts;
mod prelude;
mod types;

pub mod encode;
pub mod endpoint;
pub mod format;
pub mod month;
pub mod plan;
pub mod preview;
pub mod settings;
pub mod start;

pub use consts::*;
pub use encode::{RenderRequest, encode};
pub use endpoint::{Endpoint, Endpoints};
pub use format::{Locale, format_custom_start_date};
pub use month::{CalendarMonth, MonthIter, months_for, plan_month_count};
pub use plan::{
    ConfigError, Coverage, Field, PlanConfig, PlanForm, months_to_render, resolve_start_date,
};
pub use preview::{GalleryItem, Preview};
pub use settings::{Settings, SettingsError};
pub use start::{StartBounds, StartDate};
pub use types::{
    CoverageType, DurationType, Month, PlanCode, ReadingOrder, RestDay, StartDateType, Year,
};

use crate::prelude::*;

/// Error type for parsing plan codes, calendar months and render queries.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid {field}: {value}")]
    InvalidCode { field: &'static str, value: String },
    #[display(fmt = "Unsupported coverage type: {_0}")]
    UnsupportedCoverageType(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid start date stamp: {_0} (expected YYYYMMDD)")]
    InvalidStartStamp(String),
    #[display(fmt = "Missing query parameter: {_0}")]
    MissingParameter(&'static str),
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_testament_scenario() {
        let today = date(2022, 6, 15);
        let mut form = PlanForm::default();
        form.set_coverage_type("new-testament")
            .set_rest_days("sunday", "saturday")
            .set_start_date_type("today");
        let config = form.finalize(today).unwrap();

        let start = resolve_start_date(&config, today).unwrap();
        assert_eq!(start, today);

        let months: Vec<_> = months_to_render(&config, start).unwrap().collect();
        assert_eq!(months.len(), 13);
        assert_eq!(months[0], CalendarMonth::from_numbers(2022, 6).unwrap());

        let query = encode(&config, months[0], start);
        assert!(query.contains("c=new-testament&r1=sunday&r2=saturday&y=2022&m=6&s=20220615"));
    }

    #[test]
    fn test_every_query_round_trips() {
        let today = date(2022, 6, 15);
        let mut form = PlanForm::initialized(today);
        form.set_coverage_type("whole-bible")
            .set_duration_type("two-years")
            .set_start_date_type("next-month");
        let config = form.finalize(today).unwrap();
        let start = resolve_start_date(&config, today).unwrap();
        assert_eq!(start, date(2022, 7, 1));

        let months = months_to_render(&config, start).unwrap();
        assert_eq!(months.len(), 24);
        for month in months {
            let request = RenderRequest::new(&config, month, start);
            assert_eq!(RenderRequest::from_query(&encode(&config, month, start)).unwrap(), request);
        }
    }

    #[test]
    fn test_error_display() {
        struct TestCase {
            error:    ParseError,
            expected: &'static str,
        }

        let cases = [
            TestCase {
                error:    ParseError::InvalidCode {
                    field: "rest day",
                    value: "someday".to_owned(),
                },
                expected: "Invalid rest day: someday",
            },
            TestCase {
                error:    ParseError::UnsupportedCoverageType("apocrypha".to_owned()),
                expected: "Unsupported coverage type: apocrypha",
            },
            TestCase {
                error:    ParseError::InvalidYear(10000),
                expected: "Invalid year: 10000 (must be 1-9999)",
            },
            TestCase {
                error:    ParseError::InvalidMonth(13),
                expected: "Invalid month: 13 (must be 1-12)",
            },
            TestCase {
                error:    ParseError::MissingParameter("s"),
                expected: "Missing query parameter: s",
            },
        ];

        for case in &cases {
            assert_eq!(case.error.to_string(), case.expected);
        }
    }

    #[test]
    fn test_config_error_wraps_parse_error() {
        let error = ConfigError::from(ParseError::InvalidMonth(0));
        assert_eq!(error.to_string(), "Invalid month: 0 (must be 1-12)");
    }
}
