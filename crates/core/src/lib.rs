//! daybudget core - domain entities, services, and traits.
//!
//! This crate holds the daily budget logic behind the rest-budget pill.
//! It is storage-agnostic: persistence backends implement
//! [`budget::BudgetStoreTrait`], and UI layers subscribe to the
//! evaluator's watch channel.

pub mod budget;
pub mod constants;
pub mod currency;
pub mod errors;
pub mod events;
pub mod spends;
pub mod utils;

pub use budget::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
