//! Currency identifiers used for display.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The currency the user budgets in.
///
/// Only display formatting looks at this value; amounts are never converted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CurrencyId {
    /// An ISO 4217 code picked from the currency list, e.g. `"EUR"`.
    /// Stored uppercase.
    #[serde(deserialize_with = "deserialize_iso_code")]
    Iso(String),
    /// A free-form symbol typed by the user, e.g. `"₿"`.
    Custom(String),
    /// Bare numbers without any currency mark.
    #[default]
    None,
}

impl CurrencyId {
    pub fn iso(code: impl Into<String>) -> Self {
        CurrencyId::Iso(code.into().to_uppercase())
    }

    pub fn custom(symbol: impl Into<String>) -> Self {
        CurrencyId::Custom(symbol.into())
    }
}

fn deserialize_iso_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    Ok(code.trim().to_uppercase())
}

impl fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyId::Iso(code) => write!(f, "{}", code),
            CurrencyId::Custom(symbol) => write!(f, "{}", symbol),
            CurrencyId::None => write!(f, "-"),
        }
    }
}
