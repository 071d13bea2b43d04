//! Currency module - identifiers and display formatting.

mod currency_formatter;
mod currency_model;

pub use currency_formatter::{
    get_currency_symbol, CurrencyFormatterTrait, DefaultCurrencyFormatter, FormatSettings,
};
pub use currency_model::CurrencyId;
