use std::{cmp::Ordering, fmt, iter::FusedIterator, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    DECEMBER, DurationType, JANUARY, MAX_YEAR, MIN_DAY, MONTHS_PER_YEAR, ParseError,
    types::{Month, Year},
};

/// One month of the calendar, addressed by year and 1-based month.
///
/// Carries no day component, so stepping from one month to the next can never
/// skip or repeat a month the way a day-preserving date increment does near
/// the end of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    year:  Year,
    month: Month,
}

impl CalendarMonth {
    /// Creates a calendar month from already validated parts
    pub const fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    /// Creates a calendar month from raw numbers
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `ParseError::InvalidMonth` when out of range.
    pub fn from_numbers(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    /// The month containing `date`; the day component is dropped.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the year is outside `1..=MAX_YEAR`.
    pub fn containing(date: NaiveDate) -> Result<Self, ParseError> {
        let month = u8::try_from(date.month()).map_err(|_| ParseError::InvalidMonth(u8::MAX))?;
        Ok(Self {
            year:  Year::from_gregorian(date.year())?,
            month: Month::new(month)?,
        })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    /// First day of this month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year.get()),
            u32::from(self.month.get()),
            u32::from(MIN_DAY),
        )
    }

    /// The following month, wrapping December into January of the next year.
    /// Returns `None` past December of `MAX_YEAR`.
    pub fn succ(&self) -> Option<Self> {
        let (year, month) = if self.month.get() == DECEMBER {
            if self.year.get() >= MAX_YEAR {
                return None;
            }
            (self.year.get() + 1, JANUARY)
        } else {
            (self.year.get(), self.month.get() + 1)
        };
        Self::from_numbers(year, month).ok()
    }
}

impl PartialOrd for CalendarMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarMonth {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month).cmp(&(other.year, other.month))
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year.get(), self.month.get())
    }
}

impl FromStr for CalendarMonth {
    type Err = ParseError;

    /// Parses the `YYYY-MM` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;
        let year = year
            .parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))?;
        let month = month
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))?;
        Self::from_numbers(year, month)
    }
}

/// Number of months a plan occupies on the calendar.
///
/// Twelve per year of the plan, plus one leading month when the plan starts
/// after the first of a month so the partial month is shown as well.
pub fn plan_month_count(duration: Option<DurationType>, start: NaiveDate) -> usize {
    let years = duration.map_or(1, DurationType::years);
    let mut total = MONTHS_PER_YEAR * years;
    if start.day() > u32::from(MIN_DAY) {
        total += 1;
    }
    total
}

/// Lazy, finite sequence of calendar months in chronological order.
///
/// Cloning yields an independent iterator positioned at the same month, so a
/// plan's months can be walked as many times as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthIter {
    next:      Option<CalendarMonth>,
    remaining: usize,
}

impl MonthIter {
    /// `count` consecutive months starting at `first`, cut short at
    /// December of `MAX_YEAR`
    pub fn new(first: CalendarMonth, count: usize) -> Self {
        let available = usize::from(MAX_YEAR - first.year.get()) * MONTHS_PER_YEAR
            + usize::from(DECEMBER - first.month.get())
            + 1;
        Self {
            next:      Some(first),
            remaining: count.min(available),
        }
    }
}

impl Iterator for MonthIter {
    type Item = CalendarMonth;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = current.succ();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for MonthIter {}

impl FusedIterator for MonthIter {}

/// The months to render for a plan of `duration` starting on `start`.
///
/// # Errors
/// Returns `ParseError::InvalidYear` if `start` is outside the supported years.
pub fn months_for(duration: Option<DurationType>, start: NaiveDate) -> Result<MonthIter, ParseError> {
    let first = CalendarMonth::containing(start)?;
    Ok(MonthIter::new(first, plan_month_count(duration, start)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: u16, m: u8) -> CalendarMonth {
        CalendarMonth::from_numbers(y, m).unwrap()
    }

    #[test]
    fn test_containing_drops_day() {
        assert_eq!(CalendarMonth::containing(date(2022, 1, 31)).unwrap(), month(2022, 1));
        assert_eq!(month(2022, 1).first_day(), Some(date(2022, 1, 1)));
    }

    #[test]
    fn test_succ_wraps_year() {
        assert_eq!(month(2022, 11).succ(), Some(month(2022, 12)));
        assert_eq!(month(2022, 12).succ(), Some(month(2023, 1)));
        assert_eq!(month(9999, 12).succ(), None);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(month(2022, 6).to_string(), "2022-06");
        assert_eq!("2022-06".parse::<CalendarMonth>().unwrap(), month(2022, 6));
        assert!(matches!(
            "2022-13".parse::<CalendarMonth>(),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            "June 2022".parse::<CalendarMonth>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_ordering() {
        assert!(month(2022, 12) < month(2023, 1));
        assert!(month(2022, 2) < month(2022, 10));
    }

    #[test]
    fn test_plan_month_count_cases() {
        struct TestCase {
            duration: Option<DurationType>,
            start:    NaiveDate,
            expected: usize,
        }

        let cases = [
            TestCase {
                duration: None,
                start:    date(2022, 6, 1),
                expected: 12,
            },
            TestCase {
                duration: None,
                start:    date(2022, 6, 15),
                expected: 13,
            },
            TestCase {
                duration: Some(DurationType::OneYear),
                start:    date(2022, 1, 1),
                expected: 12,
            },
            TestCase {
                duration: Some(DurationType::OneYear),
                start:    date(2022, 1, 31),
                expected: 13,
            },
            TestCase {
                duration: Some(DurationType::TwoYears),
                start:    date(2022, 3, 1),
                expected: 24,
            },
            TestCase {
                duration: Some(DurationType::TwoYears),
                start:    date(2022, 3, 2),
                expected: 25,
            },
        ];

        for case in &cases {
            assert_eq!(
                plan_month_count(case.duration, case.start),
                case.expected,
                "duration {:?} starting {}",
                case.duration,
                case.start
            );
        }
    }

    #[test]
    fn test_months_for_starts_at_start_month() {
        let months: Vec<_> = months_for(None, date(2022, 6, 15)).unwrap().collect();
        assert_eq!(months.len(), 13);
        assert_eq!(months[0], month(2022, 6));
        assert_eq!(months[1], month(2022, 7));
        assert_eq!(months[12], month(2023, 6));
    }

    #[test]
    fn test_months_are_consecutive() {
        for start in [date(2022, 1, 31), date(2023, 8, 31), date(2024, 2, 29), date(2022, 12, 1)] {
            let months: Vec<_> = months_for(Some(DurationType::TwoYears), start)
                .unwrap()
                .collect();
            for pair in months.windows(2) {
                assert_eq!(pair[0].succ(), Some(pair[1]), "after {}", pair[0]);
                assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn test_month_end_start_does_not_skip_february() {
        let months: Vec<_> = months_for(Some(DurationType::OneYear), date(2022, 1, 31))
            .unwrap()
            .take(3)
            .collect();
        assert_eq!(months, vec![month(2022, 1), month(2022, 2), month(2022, 3)]);
    }

    #[test]
    fn test_iter_is_restartable() {
        let iter = months_for(None, date(2022, 6, 1)).unwrap();
        assert_eq!(iter.len(), 12);
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_iter_stops_at_max_year() {
        let iter = months_for(Some(DurationType::TwoYears), date(9999, 6, 1)).unwrap();
        assert_eq!(iter.len(), 7);
        let months: Vec<_> = iter.collect();
        assert_eq!(months.len(), 7);
        assert_eq!(months.last(), Some(&month(9999, 12)));
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut iter = months_for(None, date(2022, 6, 1)).unwrap();
        iter.next();
        assert_eq!(iter.size_hint(), (11, Some(11)));
        assert_eq!(iter.by_ref().count(), 11);
        assert_eq!(iter.next(), None);
    }
}
