use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    CUSTOM_START_YEARS_BACK, JANUARY, MIN_DAY, MONTHS_PER_YEAR, StartDateType, plan::ConfigError,
};

/// The first day of a plan, either relative to today or a concrete date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "date", rename_all = "kebab-case")]
pub enum StartDate {
    #[default]
    Today,
    Tomorrow,
    /// First day of the month after today's
    NextMonth,
    /// January 1 of next year
    NextYear,
    /// A user-picked date, used verbatim
    Custom(NaiveDate),
}

impl StartDate {
    /// The symbolic choice behind this start date
    pub const fn kind(&self) -> StartDateType {
        match self {
            Self::Today => StartDateType::Today,
            Self::Tomorrow => StartDateType::Tomorrow,
            Self::NextMonth => StartDateType::NextMonth,
            Self::NextYear => StartDateType::NextYear,
            Self::Custom(_) => StartDateType::Custom,
        }
    }

    /// Resolves to an absolute date relative to `today`.
    ///
    /// Only `NextMonth` and `NextYear` land on the first of a month; the
    /// other choices keep their day, and month iteration normalizes it.
    ///
    /// # Errors
    /// Returns `ConfigError::DateOutOfRange` when the result is not representable.
    pub fn resolve(&self, today: NaiveDate) -> Result<NaiveDate, ConfigError> {
        let resolved = match *self {
            Self::Today => Some(today),
            Self::Tomorrow => today.succ_opt(),
            // Day is forced to 1 before the month is added, otherwise
            // January 31 would roll into March.
            Self::NextMonth => today
                .with_day(u32::from(MIN_DAY))
                .and_then(|first| first.checked_add_months(Months::new(1))),
            Self::NextYear => today.year().checked_add(1).and_then(|year| {
                NaiveDate::from_ymd_opt(year, u32::from(JANUARY), u32::from(MIN_DAY))
            }),
            Self::Custom(date) => Some(date),
        };
        resolved.ok_or(ConfigError::DateOutOfRange { today })
    }
}

/// Inclusive window a custom start date must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartBounds {
    min: NaiveDate,
    max: NaiveDate,
}

impl StartBounds {
    /// From two years before `today` through January 1 of next year. When
    /// today is itself January 1 the window ends today.
    ///
    /// A February 29 lower bound that does not exist rolls forward to
    /// March 1.
    pub fn around(today: NaiveDate) -> Option<Self> {
        let back = u32::try_from(MONTHS_PER_YEAR).ok()? * CUSTOM_START_YEARS_BACK;
        let same_day = today.checked_sub_months(Months::new(back))?;
        let min = if same_day.day() == today.day() {
            same_day
        } else {
            same_day.succ_opt()?
        };
        let max = if today.month() == u32::from(JANUARY) && today.day() == u32::from(MIN_DAY) {
            today
        } else {
            NaiveDate::from_ymd_opt(today.year().checked_add(1)?, u32::from(JANUARY), u32::from(MIN_DAY))?
        };
        Some(Self { min, max })
    }

    pub const fn min(&self) -> NaiveDate {
        self.min
    }

    pub const fn max(&self) -> NaiveDate {
        self.max
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_cases() {
        struct TestCase {
            start:    StartDate,
            today:    NaiveDate,
            expected: NaiveDate,
        }

        let cases = [
            TestCase {
                start:    StartDate::Today,
                today:    date(2022, 6, 15),
                expected: date(2022, 6, 15),
            },
            TestCase {
                start:    StartDate::Tomorrow,
                today:    date(2022, 6, 15),
                expected: date(2022, 6, 16),
            },
            TestCase {
                start:    StartDate::Tomorrow,
                today:    date(2022, 12, 31),
                expected: date(2023, 1, 1),
            },
            TestCase {
                start:    StartDate::Tomorrow,
                today:    date(2024, 2, 28),
                expected: date(2024, 2, 29),
            },
            TestCase {
                start:    StartDate::NextMonth,
                today:    date(2022, 1, 31),
                expected: date(2022, 2, 1),
            },
            TestCase {
                start:    StartDate::NextMonth,
                today:    date(2022, 12, 15),
                expected: date(2023, 1, 1),
            },
            TestCase {
                start:    StartDate::NextYear,
                today:    date(2022, 6, 15),
                expected: date(2023, 1, 1),
            },
            TestCase {
                start:    StartDate::Custom(date(2021, 3, 31)),
                today:    date(2022, 6, 15),
                expected: date(2021, 3, 31),
            },
        ];

        for case in &cases {
            assert_eq!(
                case.start.resolve(case.today).unwrap(),
                case.expected,
                "{:?} from {}",
                case.start,
                case.today
            );
        }
    }

    #[test]
    fn test_next_month_is_always_first_of_month() {
        let mut today = date(2022, 1, 1);
        while today.year() < 2025 {
            let resolved = StartDate::NextMonth.resolve(today).unwrap();
            assert_eq!(resolved.day(), 1, "from {today}");
            assert_eq!(resolved.month0(), (today.month0() + 1) % 12, "from {today}");
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_resolve_overflow() {
        let result = StartDate::Tomorrow.resolve(NaiveDate::MAX);
        assert!(matches!(result, Err(ConfigError::DateOutOfRange { .. })));
    }

    #[test]
    fn test_kind() {
        assert_eq!(StartDate::NextYear.kind(), StartDateType::NextYear);
        assert_eq!(
            StartDate::Custom(date(2022, 1, 1)).kind(),
            StartDateType::Custom
        );
    }

    #[test]
    fn test_bounds_mid_year() {
        let bounds = StartBounds::around(date(2022, 6, 15)).unwrap();
        assert_eq!(bounds.min(), date(2020, 6, 15));
        assert_eq!(bounds.max(), date(2023, 1, 1));
        assert!(bounds.contains(date(2020, 6, 15)));
        assert!(bounds.contains(date(2023, 1, 1)));
        assert!(!bounds.contains(date(2020, 6, 14)));
        assert!(!bounds.contains(date(2023, 1, 2)));
    }

    #[test]
    fn test_bounds_on_new_years_day() {
        let bounds = StartBounds::around(date(2023, 1, 1)).unwrap();
        assert_eq!(bounds.max(), date(2023, 1, 1));
    }

    #[test]
    fn test_bounds_leap_day() {
        let bounds = StartBounds::around(date(2024, 2, 29)).unwrap();
        assert_eq!(bounds.min(), date(2022, 3, 1));
        assert!(!bounds.contains(date(2022, 2, 28)));

        let bounds = StartBounds::around(date(2024, 2, 28)).unwrap();
        assert_eq!(bounds.min(), date(2022, 2, 28));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&StartDate::Custom(date(2023, 5, 10))).unwrap();
        assert_eq!(json, r#"{"type":"custom","date":"2023-05-10"}"#);
        let parsed: StartDate = serde_json::from_str(r#"{"type":"next-month"}"#).unwrap();
        assert_eq!(parsed, StartDate::NextMonth);
    }
}
