use crate::consts::MAX_MONTH;
use crate::consts::MAX_YEAR;
use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;
use std::str::FromStr;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(i32::from(value)))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(i32::from(value)));
        }
        Ok(Self(non_zero))
    }

    /// Converts a proleptic Gregorian year as used by `chrono`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` for years outside `1..=MAX_YEAR`.
    pub fn from_gregorian(value: i32) -> Result<Self, ParseError> {
        let narrowed = u16::try_from(value).map_err(|_| ParseError::InvalidYear(value))?;
        Self::new(narrowed)
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A closed set of kebab-case codes shared by the form, the settings file
/// and the renderer query string.
pub trait PlanCode: Copy + 'static {
    /// Name used in error messages
    const FIELD: &'static str;
    /// Every value, in display order
    const ALL: &'static [Self];

    /// The wire code of this value
    fn code(self) -> &'static str;
}

fn parse_code<T: PlanCode>(s: &str) -> Result<T, ParseError> {
    let trimmed = s.trim();
    T::ALL
        .iter()
        .copied()
        .find(|value| value.code() == trimmed)
        .ok_or_else(|| ParseError::InvalidCode {
            field: T::FIELD,
            value: trimmed.to_owned(),
        })
}

/// Declares a code enum together with its `PlanCode`, `Display` and
/// `FromStr` impls.
macro_rules! plan_code {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl PlanCode for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

plan_code! {
    /// Which portion of the text a plan covers
    CoverageType, "coverage type" {
        NewTestament => "new-testament",
        OldTestament => "old-testament",
        WholeBible => "whole-bible",
        NewTestamentAndPsalms => "new-testament-and-psalms",
    }
}

impl CoverageType {
    /// Whether the plan length can be chosen for this coverage
    pub const fn has_duration(self) -> bool {
        matches!(self, Self::OldTestament | Self::WholeBible)
    }
}

impl FromStr for CoverageType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s).map_err(|_| ParseError::UnsupportedCoverageType(s.trim().to_owned()))
    }
}

plan_code! {
    /// Total time to finish a whole-book plan
    DurationType, "duration type" {
        OneYear => "one-year",
        TwoYears => "two-years",
    }
}

impl DurationType {
    /// Number of whole years the plan spans
    pub const fn years(self) -> usize {
        match self {
            Self::OneYear => 1,
            Self::TwoYears => 2,
        }
    }
}

impl FromStr for DurationType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s)
    }
}

plan_code! {
    /// Testament read first in a whole-bible plan
    ReadingOrder, "order type" {
        OldTestamentFirst => "old-testament-first",
        NewTestamentFirst => "new-testament-first",
    }
}

impl FromStr for ReadingOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s)
    }
}

plan_code! {
    /// Day of the week without new reading; `Everyday` means no rest day
    RestDay, "rest day" {
        /// Read every day
        Everyday => "everyday",
        Sunday => "sunday",
        Monday => "monday",
        Tuesday => "tuesday",
        Wednesday => "wednesday",
        Thursday => "thursday",
        Friday => "friday",
        Saturday => "saturday",
    }
}

impl RestDay {
    /// Whether this is an actual weekday usable for catching up
    pub const fn is_catch_up_day(self) -> bool {
        !matches!(self, Self::Everyday)
    }
}

impl FromStr for RestDay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s)
    }
}

plan_code! {
    /// Symbolic choice of the first day of the plan
    StartDateType, "start date type" {
        Today => "today",
        Tomorrow => "tomorrow",
        NextMonth => "next-month",
        NextYear => "next-year",
        Custom => "custom",
    }
}

impl FromStr for StartDateType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s)
    }
}
