//! Budget module - the rest-budget pill evaluation.
//!
//! The calculator holds the arithmetic, the service reads the store and
//! publishes, and the handle serializes keystroke-driven requests.

mod budget_calculator;
mod budget_model;
mod budget_service;
mod budget_traits;
mod evaluator_handle;

pub use budget_calculator::{
    calculate_day_budget, classify, remaining_ratio, DayBudgetFigures, DayBudgetInputs,
};
pub use budget_model::{
    BudgetEvaluation, BudgetSnapshot, DailyBudgetState, EvaluationOutcome, PendingSpend, PillState,
};
pub use budget_service::DailyBudgetEvaluator;
pub use budget_traits::{BudgetStoreTrait, DailyBudgetEvaluatorTrait};
pub use evaluator_handle::EvaluatorHandle;

#[cfg(test)]
mod budget_service_tests;
