//! Plan configuration: the raw [`PlanForm`] a user fills in and the validated,
//! immutable [`PlanConfig`] everything downstream works from.
//!
//! A `PlanConfig` is keyed by coverage type. Each [`Coverage`] variant carries
//! only the sub-fields that coverage uses, so a value left over from a
//! previously selected coverage can never leak into an encoded request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::{
    CoverageType, DurationType, ParseError, ReadingOrder, RestDay, StartDateType,
    format::Locale,
    month::{MonthIter, months_for},
    prelude::*,
    start::{StartBounds, StartDate},
};

/// A user-facing field of the plan form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "coverage-type")]
    CoverageType,
    #[display(fmt = "duration-type")]
    DurationType,
    #[display(fmt = "order-type")]
    OrderType,
    #[display(fmt = "rest-day")]
    RestDay,
    #[display(fmt = "rest-day1")]
    RestDay1,
    #[display(fmt = "rest-day2")]
    RestDay2,
    #[display(fmt = "start-date-type")]
    StartDateType,
    #[display(fmt = "custom-start-date")]
    CustomStartDate,
    #[display(fmt = "locale")]
    Locale,
}

/// Error type for building a plan configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A field required by the selected coverage or start date is unset.
    #[error("Missing required field: {0}")]
    MissingField(Field),

    /// Both new-testament rest days are the same weekday.
    #[error("Rest days must be different, both are {0}")]
    DuplicateRestDay(RestDay),

    /// `everyday` given where a catch-up weekday is required.
    #[error("{field} must be a weekday, got {value}")]
    RestDayNotAllowed { field: Field, value: RestDay },

    /// Custom start date outside the selectable window.
    #[error("Custom start date {date} is outside {min} to {max}")]
    CustomDateOutOfRange {
        date: NaiveDate,
        min:  NaiveDate,
        max:  NaiveDate,
    },

    /// The start date cannot be represented relative to `today`.
    #[error("Start date is out of range relative to {today}")]
    DateOutOfRange { today: NaiveDate },

    /// A field holds an unknown code.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Coverage of a plan together with the options that coverage uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "coverage-type", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum Coverage {
    /// Two distinct catch-up weekdays per week
    NewTestament { rest_days: [RestDay; 2] },
    OldTestament {
        duration: DurationType,
        rest_day: RestDay,
    },
    WholeBible {
        duration: DurationType,
        order:    ReadingOrder,
        rest_day: RestDay,
    },
    NewTestamentAndPsalms { rest_day: RestDay },
}

impl Coverage {
    /// New-testament coverage with two distinct catch-up weekdays.
    ///
    /// # Errors
    /// Returns `ConfigError::RestDayNotAllowed` for `everyday` and
    /// `ConfigError::DuplicateRestDay` when both days are equal.
    pub fn new_testament(first: RestDay, second: RestDay) -> Result<Self, ConfigError> {
        for (field, value) in [(Field::RestDay1, first), (Field::RestDay2, second)] {
            if !value.is_catch_up_day() {
                return Err(ConfigError::RestDayNotAllowed { field, value });
            }
        }
        if first == second {
            return Err(ConfigError::DuplicateRestDay(first));
        }
        Ok(Self::NewTestament {
            rest_days: [first, second],
        })
    }

    /// The coverage code
    pub const fn kind(&self) -> CoverageType {
        match self {
            Self::NewTestament { .. } => CoverageType::NewTestament,
            Self::OldTestament { .. } => CoverageType::OldTestament,
            Self::WholeBible { .. } => CoverageType::WholeBible,
            Self::NewTestamentAndPsalms { .. } => CoverageType::NewTestamentAndPsalms,
        }
    }

    /// Plan length, only present for coverages that offer a choice
    pub const fn duration(&self) -> Option<DurationType> {
        match *self {
            Self::OldTestament { duration, .. } | Self::WholeBible { duration, .. } => {
                Some(duration)
            },
            Self::NewTestament { .. } | Self::NewTestamentAndPsalms { .. } => None,
        }
    }

    /// Reading order, whole-bible only
    pub const fn order(&self) -> Option<ReadingOrder> {
        match *self {
            Self::WholeBible { order, .. } => Some(order),
            _ => None,
        }
    }

    /// Weekdays without new reading; `everyday` contributes nothing.
    pub fn days_to_rest(&self) -> Vec<RestDay> {
        let days: &[RestDay] = match self {
            Self::NewTestament { rest_days } => rest_days,
            Self::OldTestament { rest_day, .. }
            | Self::WholeBible { rest_day, .. }
            | Self::NewTestamentAndPsalms { rest_day } => std::slice::from_ref(rest_day),
        };
        days.iter().copied().filter(|day| day.is_catch_up_day()).collect()
    }
}

/// A validated plan, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlanConfig {
    coverage: Coverage,
    start:    StartDate,
    locale:   Locale,
}

impl PlanConfig {
    /// Builds a plan, checking the cross-field rules that depend on `today`.
    ///
    /// # Errors
    /// Returns `ConfigError::CustomDateOutOfRange` when a custom start date
    /// falls outside [`StartBounds::around`], and re-checks new-testament rest
    /// days built without [`Coverage::new_testament`].
    pub fn new(
        coverage: Coverage,
        start: StartDate,
        locale: Locale,
        today: NaiveDate,
    ) -> Result<Self, ConfigError> {
        if let Coverage::NewTestament {
            rest_days: [first, second],
        } = coverage
        {
            Coverage::new_testament(first, second)?;
        }

        if let StartDate::Custom(date) = start {
            let bounds = StartBounds::around(today).ok_or(ConfigError::DateOutOfRange { today })?;
            if !bounds.contains(date) {
                return Err(ConfigError::CustomDateOutOfRange {
                    date,
                    min: bounds.min(),
                    max: bounds.max(),
                });
            }
        }

        Ok(Self {
            coverage,
            start,
            locale,
        })
    }

    pub const fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    pub const fn start(&self) -> StartDate {
        self.start
    }

    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// See [`resolve_start_date`].
    ///
    /// # Errors
    /// Returns `ConfigError::DateOutOfRange` when the start is not representable.
    pub fn start_date(&self, today: NaiveDate) -> Result<NaiveDate, ConfigError> {
        self.start.resolve(today)
    }

    /// See [`months_to_render`].
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` for a start outside the supported years.
    pub fn months_to_render(&self, start: NaiveDate) -> Result<MonthIter, ParseError> {
        months_for(self.coverage.duration(), start)
    }
}

/// Absolute start date of `config` given `today`.
///
/// # Errors
/// Returns `ConfigError::DateOutOfRange` when the start is not representable.
pub fn resolve_start_date(config: &PlanConfig, today: NaiveDate) -> Result<NaiveDate, ConfigError> {
    config.start_date(today)
}

/// Months to render for `config` when it starts on `start`: twelve per plan
/// year, plus the partial leading month when `start` is not the first.
///
/// # Errors
/// Returns `ParseError::InvalidYear` for a start outside the supported years.
pub fn months_to_render(config: &PlanConfig, start: NaiveDate) -> Result<MonthIter, ParseError> {
    config.months_to_render(start)
}

/// Raw plan choices as collected from a user, before validation.
///
/// Every field is a plain string so that unknown codes surface as errors from
/// [`PlanForm::finalize`] rather than at input time. Empty strings count as
/// unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PlanForm {
    coverage_type:     Option<String>,
    duration_type:     Option<String>,
    order_type:        Option<String>,
    rest_day:          Option<String>,
    rest_day1:         Option<String>,
    rest_day2:         Option<String>,
    start_date_type:   Option<String>,
    custom_start_date: Option<NaiveDate>,
    locale:            Option<String>,
}

impl Default for PlanForm {
    fn default() -> Self {
        Self {
            coverage_type:     Some(CoverageType::NewTestament.to_string()),
            duration_type:     Some(DurationType::OneYear.to_string()),
            order_type:        Some(ReadingOrder::OldTestamentFirst.to_string()),
            rest_day:          Some(RestDay::Everyday.to_string()),
            rest_day1:         Some(RestDay::Sunday.to_string()),
            rest_day2:         Some(RestDay::Saturday.to_string()),
            start_date_type:   Some(StartDateType::Today.to_string()),
            custom_start_date: None,
            locale:            Some(Locale::default().to_string()),
        }
    }
}

impl PlanForm {
    /// A form with every field set, the custom start date included.
    pub fn initialized(today: NaiveDate) -> Self {
        let mut form = Self::default();
        form.initialize(today);
        form
    }

    /// Gives the custom start date its predefined value, `today`, unless one
    /// is already set. Other fields are left alone.
    pub fn initialize(&mut self, today: NaiveDate) -> &mut Self {
        if self.custom_start_date.is_none() {
            self.custom_start_date = Some(today);
        }
        self
    }

    /// Fields [`finalize`](Self::finalize) reads for the current coverage and
    /// start-date type. An unknown coverage contributes no sub-fields.
    pub fn required_fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::CoverageType];
        let coverage = present(self.coverage_type.as_deref()).and_then(|c| c.parse().ok());
        match coverage {
            Some(CoverageType::NewTestament) => fields.extend([Field::RestDay1, Field::RestDay2]),
            Some(CoverageType::OldTestament) => fields.extend([Field::DurationType, Field::RestDay]),
            Some(CoverageType::WholeBible) => {
                fields.extend([Field::DurationType, Field::OrderType, Field::RestDay]);
            },
            Some(CoverageType::NewTestamentAndPsalms) => fields.push(Field::RestDay),
            None => {},
        }

        fields.push(Field::StartDateType);
        let start = present(self.start_date_type.as_deref()).and_then(|s| s.parse().ok());
        if start == Some(StartDateType::Custom) {
            fields.push(Field::CustomStartDate);
        }

        fields.push(Field::Locale);
        fields
    }

    pub fn coverage_type(&self) -> Option<&str> {
        self.coverage_type.as_deref()
    }

    pub fn start_date_type(&self) -> Option<&str> {
        self.start_date_type.as_deref()
    }

    pub const fn custom_start_date(&self) -> Option<NaiveDate> {
        self.custom_start_date
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn set_coverage_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.coverage_type = Some(value.into());
        debug!(
            coverage = ?self.coverage_type,
            required = ?self.required_fields(),
            "coverage type changed"
        );
        self
    }

    pub fn set_duration_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.duration_type = Some(value.into());
        self
    }

    pub fn set_order_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.order_type = Some(value.into());
        self
    }

    pub fn set_rest_day(&mut self, value: impl Into<String>) -> &mut Self {
        self.rest_day = Some(value.into());
        self
    }

    pub fn set_rest_days(
        &mut self,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> &mut Self {
        self.rest_day1 = Some(first.into());
        self.rest_day2 = Some(second.into());
        self
    }

    pub fn set_start_date_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.start_date_type = Some(value.into());
        debug!(
            start = ?self.start_date_type,
            required = ?self.required_fields(),
            "start date type changed"
        );
        self
    }

    pub fn set_custom_start_date(&mut self, date: NaiveDate) -> &mut Self {
        self.custom_start_date = Some(date);
        self
    }

    pub fn set_locale(&mut self, value: impl Into<String>) -> &mut Self {
        self.locale = Some(value.into());
        self
    }

    /// Unsets a field, as a form reset would.
    pub fn clear(&mut self, field: Field) -> &mut Self {
        match field {
            Field::CoverageType => self.coverage_type = None,
            Field::DurationType => self.duration_type = None,
            Field::OrderType => self.order_type = None,
            Field::RestDay => self.rest_day = None,
            Field::RestDay1 => self.rest_day1 = None,
            Field::RestDay2 => self.rest_day2 = None,
            Field::StartDateType => self.start_date_type = None,
            Field::CustomStartDate => self.custom_start_date = None,
            Field::Locale => self.locale = None,
        }
        self
    }

    /// Validates the form into a [`PlanConfig`].
    ///
    /// Only the fields listed by [`required_fields`](Self::required_fields)
    /// are read; a missing one is an error, never replaced by a default.
    ///
    /// # Errors
    /// Returns the first `ConfigError` found.
    pub fn finalize(&self, today: NaiveDate) -> Result<PlanConfig, ConfigError> {
        let coverage = match parse_field::<CoverageType>(Field::CoverageType, &self.coverage_type)? {
            CoverageType::NewTestament => Coverage::new_testament(
                parse_field(Field::RestDay1, &self.rest_day1)?,
                parse_field(Field::RestDay2, &self.rest_day2)?,
            )?,
            CoverageType::OldTestament => Coverage::OldTestament {
                duration: parse_field(Field::DurationType, &self.duration_type)?,
                rest_day: parse_field(Field::RestDay, &self.rest_day)?,
            },
            CoverageType::WholeBible => Coverage::WholeBible {
                duration: parse_field(Field::DurationType, &self.duration_type)?,
                order:    parse_field(Field::OrderType, &self.order_type)?,
                rest_day: parse_field(Field::RestDay, &self.rest_day)?,
            },
            CoverageType::NewTestamentAndPsalms => Coverage::NewTestamentAndPsalms {
                rest_day: parse_field(Field::RestDay, &self.rest_day)?,
            },
        };

        let start = match parse_field::<StartDateType>(Field::StartDateType, &self.start_date_type)? {
            StartDateType::Today => StartDate::Today,
            StartDateType::Tomorrow => StartDate::Tomorrow,
            StartDateType::NextMonth => StartDate::NextMonth,
            StartDateType::NextYear => StartDate::NextYear,
            StartDateType::Custom => StartDate::Custom(
                self.custom_start_date
                    .ok_or(ConfigError::MissingField(Field::CustomStartDate))?,
            ),
        };

        let locale = present(self.locale.as_deref())
            .map(Locale::from)
            .ok_or(ConfigError::MissingField(Field::Locale))?;

        PlanConfig::new(coverage, start, locale, today)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_field<T>(field: Field, value: &Option<String>) -> Result<T, ConfigError>
where
    T: FromStr<Err = ParseError>,
{
    let raw = present(value.as_deref()).ok_or(ConfigError::MissingField(field))?;
    Ok(raw.parse()?)
}
