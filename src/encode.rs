//! Query-string encoding of render requests, and decoding on the renderer side.
//!
//! Keys always appear in the same order: `c`, the coverage sub-fields
//! (`r1 r2`, `d r`, `d o r` or `r`), then `y`, `m`, `s` and `l`. Months are
//! addressed absolutely by year and month with the plan start as `YYYYMMDD`.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    CoverageType, KEY_COVERAGE, KEY_DURATION, KEY_LOCALE, KEY_MONTH, KEY_ORDER, KEY_REST_DAY,
    KEY_REST_DAY_1, KEY_REST_DAY_2, KEY_START, KEY_VALUE_SEPARATOR, KEY_YEAR, PAIR_SEPARATOR,
    ParseError, START_STAMP_FORMAT,
    format::Locale,
    month::CalendarMonth,
    plan::{Coverage, PlanConfig},
    types::{Month, Year},
};

/// Everything the renderer needs for one image or export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RenderRequest {
    coverage: Coverage,
    month:    CalendarMonth,
    start:    NaiveDate,
    locale:   Locale,
}

impl RenderRequest {
    /// The request for `month` of `config`, whose plan begins on `start`
    pub fn new(config: &PlanConfig, month: CalendarMonth, start: NaiveDate) -> Self {
        Self {
            coverage: *config.coverage(),
            month,
            start,
            locale: config.locale().clone(),
        }
    }

    pub const fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    pub const fn month(&self) -> CalendarMonth {
        self.month
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Key/value pairs in canonical order, values not yet percent-encoded
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(KEY_COVERAGE, self.coverage.kind().to_string())];
        match self.coverage {
            Coverage::NewTestament {
                rest_days: [first, second],
            } => {
                pairs.push((KEY_REST_DAY_1, first.to_string()));
                pairs.push((KEY_REST_DAY_2, second.to_string()));
            },
            Coverage::OldTestament { duration, rest_day } => {
                pairs.push((KEY_DURATION, duration.to_string()));
                pairs.push((KEY_REST_DAY, rest_day.to_string()));
            },
            Coverage::WholeBible {
                duration,
                order,
                rest_day,
            } => {
                pairs.push((KEY_DURATION, duration.to_string()));
                pairs.push((KEY_ORDER, order.to_string()));
                pairs.push((KEY_REST_DAY, rest_day.to_string()));
            },
            Coverage::NewTestamentAndPsalms { rest_day } => {
                pairs.push((KEY_REST_DAY, rest_day.to_string()));
            },
        }
        pairs.push((KEY_YEAR, self.month.year().to_string()));
        pairs.push((KEY_MONTH, self.month.month().to_string()));
        pairs.push((KEY_START, self.start.format(START_STAMP_FORMAT).to_string()));
        pairs.push((KEY_LOCALE, self.locale.to_string()));
        pairs
    }

    /// The canonical query string, without a leading `?`
    pub fn to_query(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}{KEY_VALUE_SEPARATOR}{}", urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join(PAIR_SEPARATOR)
    }

    /// Decodes a query string as the renderer receives it. Keys may come in
    /// any order and a leading `?` is ignored; keys that are not part of the
    /// request are skipped. A missing `l` falls back to the default locale.
    ///
    /// # Errors
    /// Returns `ParseError::UnsupportedCoverageType` for an unknown `c`,
    /// `ParseError::MissingParameter` when a key the coverage needs is absent,
    /// and the matching `ParseError` for malformed values.
    pub fn from_query(query: &str) -> Result<Self, ParseError> {
        let params = QueryParams::parse(query)?;

        let coverage = match params.get(KEY_COVERAGE)?.parse::<CoverageType>()? {
            CoverageType::NewTestament => {
                Coverage::new_testament(params.value(KEY_REST_DAY_1)?, params.value(KEY_REST_DAY_2)?)
                    .map_err(|e| ParseError::InvalidFormat(e.to_string()))?
            },
            CoverageType::OldTestament => Coverage::OldTestament {
                duration: params.value(KEY_DURATION)?,
                rest_day: params.value(KEY_REST_DAY)?,
            },
            CoverageType::WholeBible => Coverage::WholeBible {
                duration: params.value(KEY_DURATION)?,
                order:    params.value(KEY_ORDER)?,
                rest_day: params.value(KEY_REST_DAY)?,
            },
            CoverageType::NewTestamentAndPsalms => Coverage::NewTestamentAndPsalms {
                rest_day: params.value(KEY_REST_DAY)?,
            },
        };

        let year = params.number::<u16>(KEY_YEAR)?;
        let month = params.number::<u8>(KEY_MONTH)?;
        let month = CalendarMonth::new(Year::new(year)?, Month::new(month)?);

        let stamp = params.get(KEY_START)?;
        let start = NaiveDate::parse_from_str(stamp, START_STAMP_FORMAT)
            .map_err(|_| ParseError::InvalidStartStamp(stamp.to_owned()))?;

        let locale = params
            .get(KEY_LOCALE)
            .ok()
            .filter(|l| !l.is_empty())
            .map_or_else(Locale::default, Locale::from);

        Ok(Self {
            coverage,
            month,
            start,
            locale,
        })
    }
}

impl fmt::Display for RenderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

impl FromStr for RenderRequest {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_query(s)
    }
}

/// Canonical query string for `month` of `config`, whose plan begins on
/// `start`. The same inputs always give the same string.
pub fn encode(config: &PlanConfig, month: CalendarMonth, start: NaiveDate) -> String {
    RenderRequest::new(config, month, start).to_query()
}

/// Decoded `key=value` pairs; the first occurrence of a key wins.
struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    fn parse(query: &str) -> Result<Self, ParseError> {
        let trimmed = query.trim().trim_start_matches('?');
        let mut pairs = Vec::new();
        for pair in trimmed.split(PAIR_SEPARATOR).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once(KEY_VALUE_SEPARATOR).unwrap_or((pair, ""));
            let value = urlencoding::decode(&value.replace('+', " "))
                .map_err(|_| ParseError::InvalidFormat(pair.to_owned()))?
                .into_owned();
            pairs.push((key.to_owned(), value));
        }
        Ok(Self { pairs })
    }

    fn get(&self, key: &'static str) -> Result<&str, ParseError> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .ok_or(ParseError::MissingParameter(key))
    }

    fn value<T>(&self, key: &'static str) -> Result<T, ParseError>
    where
        T: FromStr<Err = ParseError>,
    {
        self.get(key)?.parse()
    }

    fn number<T: FromStr>(&self, key: &'static str) -> Result<T, ParseError> {
        let raw = self.get(key)?;
        raw.trim()
            .parse()
            .map_err(|_| ParseError::InvalidFormat(format!("{key}={raw}")))
    }
}
