use std::path::PathBuf;

use daybudget_core::currency::FormatSettings;
use daybudget_core::errors::Error;

const DEFAULT_SNAPSHOT_PATH: &str = "./daybudget.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub snapshot_path: PathBuf,
    pub log_format: LogFormat,
    pub format_settings: FormatSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let snapshot_path = lookup("DAYBUDGET_SNAPSHOT_PATH")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_PATH.into())
            .into();

        let log_format = match lookup("DAYBUDGET_LOG_FORMAT") {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(value) if value.eq_ignore_ascii_case("text") || value.is_empty() => {
                LogFormat::Text
            }
            Some(value) => {
                return Err(Error::InvalidConfigValue(format!(
                    "DAYBUDGET_LOG_FORMAT must be 'text' or 'json', got '{}'",
                    value
                )))
            }
            None => LogFormat::Text,
        };

        let defaults = FormatSettings::default();
        let decimal_separator =
            lookup("DAYBUDGET_DECIMAL_SEPARATOR").unwrap_or(defaults.decimal_separator);
        let group_separator =
            lookup("DAYBUDGET_GROUP_SEPARATOR").unwrap_or(defaults.group_separator);

        if decimal_separator.is_empty() || decimal_separator == group_separator {
            return Err(Error::InvalidConfigValue(format!(
                "decimal separator '{}' must be non-empty and differ from group separator '{}'",
                decimal_separator, group_separator
            )));
        }

        Ok(Self {
            snapshot_path,
            log_format,
            format_settings: FormatSettings {
                decimal_separator,
                group_separator,
            },
        })
    }
}
