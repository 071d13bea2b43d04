//! Spends module - stored period figures and the day-budget projection.

mod day_budget_projection;
mod spends_model;
mod spends_store;

pub use day_budget_projection::{what_budget_for_day, ProjectionOptions};
pub use spends_model::SpendsState;
pub use spends_store::InMemoryBudgetStore;
