use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{endpoint::Endpoints, plan::PlanForm};

/// Error type for reading the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("reading settings file: {0}")]
    Io(#[from] io::Error),

    #[error("parsing settings file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level settings file.
///
/// ```toml
/// [plan]
/// coverage-type = "whole-bible"
/// duration-type = "two-years"
///
/// [renderer]
/// png = "https://example.com/cpp/img.png"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Plan choices; unset keys keep the form defaults
    pub plan: PlanForm,

    /// Renderer base URLs
    pub renderer: Endpoints,
}

impl Settings {
    /// # Errors
    /// Returns `SettingsError` if the file cannot be read or is not valid settings TOML.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// # Errors
    /// Returns `SettingsError::Toml` on malformed input or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coverage, DurationType, ReadingOrder, RestDay, endpoint::Endpoint};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.renderer.base(Endpoint::Pdf), "/cpp/img.pdf");
    }

    #[test]
    fn test_plan_and_renderer_tables() {
        let settings = Settings::from_toml_str(
            r#"
            [plan]
            coverage-type = "whole-bible"
            duration-type = "two-years"
            order-type = "new-testament-first"
            rest-day = "friday"
            locale = "ko"

            [renderer]
            ics = "https://calendar.example/c.ics"
            "#,
        )
        .unwrap();

        let today = NaiveDate::from_ymd_opt(2022, 6, 15).unwrap();
        let config = settings.plan.finalize(today).unwrap();
        assert_eq!(
            *config.coverage(),
            Coverage::WholeBible {
                duration: DurationType::TwoYears,
                order:    ReadingOrder::NewTestamentFirst,
                rest_day: RestDay::Friday,
            }
        );
        assert!(config.locale().is_korean());
        assert_eq!(settings.renderer.base(Endpoint::Ics), "https://calendar.example/c.ics");
        assert_eq!(settings.renderer.base(Endpoint::Png), "/cpp/img.png");
    }

    #[test]
    fn test_custom_start_type_alone_uses_today() {
        let today = NaiveDate::from_ymd_opt(2022, 6, 15).unwrap();
        let mut settings = Settings::from_toml_str("[plan]\nstart-date-type = \"custom\"\n").unwrap();
        let config = settings.plan.initialize(today).finalize(today).unwrap();
        assert_eq!(config.start(), crate::StartDate::Custom(today));
    }

    #[test]
    fn test_unknown_table_rejected() {
        let result = Settings::from_toml_str("[theme]\ncolour = \"blue\"\n");
        assert!(matches!(result, Err(SettingsError::Toml(_))));
    }

    #[test]
    fn test_unknown_plan_key_rejected() {
        let result = Settings::from_toml_str("[plan]\nrest-day-3 = \"monday\"\n");
        assert!(matches!(result, Err(SettingsError::Toml(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Settings::load(Path::new("/nonexistent/reading-calendar.toml"));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
