use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::currency::CurrencyId;

/// Renders monetary amounts for the UI.
pub trait CurrencyFormatterTrait: Send + Sync {
    /// Formats `amount` in `currency`.
    ///
    /// With `trim_trailing_zeros`, insignificant fractional zeros are dropped
    /// (`12.50` renders as `12.5`, `12.00` as `12`).
    fn format_currency(
        &self,
        amount: Decimal,
        currency: &CurrencyId,
        trim_trailing_zeros: bool,
    ) -> String;
}

/// Separators used when rendering numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatSettings {
    pub decimal_separator: String,
    pub group_separator: String,
}

impl Default for FormatSettings {
    fn default() -> Self {
        FormatSettings {
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
        }
    }
}

static CURRENCY_SYMBOLS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn get_symbols() -> &'static HashMap<&'static str, &'static str> {
    CURRENCY_SYMBOLS.get_or_init(|| {
        HashMap::from([
            ("USD", "$"),
            ("EUR", "€"),
            ("GBP", "£"),
            ("JPY", "¥"),
            ("CNY", "¥"),
            ("RUB", "₽"),
            ("UAH", "₴"),
            ("INR", "₹"),
            ("KRW", "₩"),
            ("TRY", "₺"),
            ("ILS", "₪"),
            ("KZT", "₸"),
        ])
    })
}

/// Returns the display symbol for an ISO code, if one is known.
pub fn get_currency_symbol(code: &str) -> Option<&'static str> {
    get_symbols().get(code).copied()
}

/// Locale-light formatter: half-even rounding to cents, digit grouping and
/// symbol placement.
#[derive(Debug, Clone, Default)]
pub struct DefaultCurrencyFormatter {
    settings: FormatSettings,
}

impl DefaultCurrencyFormatter {
    pub fn new(settings: FormatSettings) -> Self {
        DefaultCurrencyFormatter { settings }
    }

    pub fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    fn format_number(&self, amount: Decimal, trim_trailing_zeros: bool) -> (bool, String) {
        let mut rounded = amount.round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointNearestEven,
        );
        // -0.00 must not render a minus sign
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }
        let negative = rounded.is_sign_negative();

        let mut magnitude = rounded.abs();
        let text = if trim_trailing_zeros {
            magnitude.normalize().to_string()
        } else {
            magnitude.rescale(DISPLAY_DECIMAL_PRECISION);
            magnitude.to_string()
        };

        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (text.as_str(), None),
        };

        let mut number = group_digits(int_part, &self.settings.group_separator);
        if let Some(frac) = frac_part {
            number.push_str(&self.settings.decimal_separator);
            number.push_str(frac);
        }
        (negative, number)
    }
}

impl CurrencyFormatterTrait for DefaultCurrencyFormatter {
    fn format_currency(
        &self,
        amount: Decimal,
        currency: &CurrencyId,
        trim_trailing_zeros: bool,
    ) -> String {
        let (negative, number) = self.format_number(amount, trim_trailing_zeros);
        let sign = if negative { "-" } else { "" };

        match currency {
            CurrencyId::Iso(code) => match get_currency_symbol(code) {
                Some(symbol) => format!("{}{}{}", sign, symbol, number),
                None => format!("{}{} {}", sign, number, code),
            },
            CurrencyId::Custom(symbol) if !symbol.trim().is_empty() => {
                format!("{}{} {}", sign, number, symbol.trim())
            }
            CurrencyId::Custom(_) | CurrencyId::None => format!("{}{}", sign, number),
        }
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}
