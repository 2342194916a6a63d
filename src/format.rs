use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_LOCALE, KOREAN_LOCALE, prelude::*};

/// Display locale handed through to the renderer, e.g. `ko` or `en-US`.
///
/// Surrounding whitespace is dropped however the value is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Deref, Into)]
#[derive(Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Picks the locale for an `Accept-Language` header: Korean when the
    /// header starts with `ko`, the default otherwise.
    pub fn negotiate(accept_language: &str) -> Self {
        if accept_language.trim_start().starts_with(KOREAN_LOCALE) {
            Self::from(KOREAN_LOCALE)
        } else {
            Self::default()
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_korean(&self) -> bool {
        self.0 == KOREAN_LOCALE
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::from(DEFAULT_LOCALE)
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self(value.trim().to_owned())
    }
}

impl From<String> for Locale {
    fn from(value: String) -> Self {
        if value.trim().len() == value.len() {
            Self(value)
        } else {
            Self::from(value.as_str())
        }
    }
}

/// Long display form of a custom start date.
///
/// Empty when `date` is `today`, meaning the picker was never changed.
/// Korean uses `2023년 5월 10일`; everything else gets US style `5/10/2023`.
pub fn format_custom_start_date(date: NaiveDate, today: NaiveDate, locale: &Locale) -> String {
    if date == today {
        return String::new();
    }
    if locale.is_korean() {
        format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
    } else {
        format!("{}/{}/{}", date.month(), date.day(), date.year())
    }
}
