//! Daily budget domain models.

use chrono::NaiveDate;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::currency::CurrencyId;
use crate::errors::{Error, Result, ValidationError};

/// Health of today's budget as shown on the rest-budget pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DailyBudgetState {
    /// No budgeting period is active.
    #[default]
    NotSet,
    /// Today's allocation is exceeded but the period still has money left.
    Overdraft,
    /// Nothing remains to distribute over the following days.
    BudgetEnd,
    Normal,
}

impl DailyBudgetState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DailyBudgetState::NotSet => "NOT_SET",
            DailyBudgetState::Overdraft => "OVERDRAFT",
            DailyBudgetState::BudgetEnd => "BUDGET_END",
            DailyBudgetState::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for DailyBudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget figures read from the store for a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    pub total_budget: Decimal,
    pub spent_from_daily_budget: Decimal,
    /// Zero means no daily allocation has been computed yet.
    pub daily_budget: Decimal,
    pub period_end_date: Option<NaiveDate>,
    pub currency: CurrencyId,
}

impl BudgetSnapshot {
    pub fn has_daily_budget(&self) -> bool {
        !self.daily_budget.is_zero()
    }
}

/// Money the user is about to spend but has not committed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct PendingSpend(Decimal);

impl PendingSpend {
    pub const ZERO: PendingSpend = PendingSpend(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(Error::Validation(ValidationError::NegativeAmount(
                amount.to_string(),
            )));
        }
        Ok(PendingSpend(amount.abs()))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl FromStr for PendingSpend {
    type Err = Error;

    /// Parses keyboard input. An empty buffer means nothing is pending and a
    /// trailing separator (`"12."`) is accepted while the user is typing.
    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(PendingSpend::ZERO);
        }
        let normalized = trimmed.replace(',', ".");
        let normalized = normalized.strip_suffix('.').unwrap_or(&normalized);
        if normalized.is_empty() || normalized.contains(char::is_whitespace) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                input.to_string(),
            )));
        }
        let amount = Decimal::from_str(normalized)?;
        PendingSpend::new(amount)
    }
}

impl<'de> Deserialize<'de> for PendingSpend {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        PendingSpend::new(amount).map_err(serde::de::Error::custom)
    }
}

/// Result of one evaluation of today's budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEvaluation {
    pub state: DailyBudgetState,
    /// `max(0, (rest + pending) / daily)`: what remains before the pending spend.
    pub percent_including_pending_spend: Decimal,
    /// `max(0, rest / daily)`: what remains once the pending spend is taken out.
    pub percent_excluding_pending_spend: Decimal,
    pub display_remaining_today: String,
    pub display_next_daily_budget: String,
    /// Unclamped `daily - spent - pending`.
    pub rest_from_day_budget: Decimal,
    /// Unrounded projection for the following days.
    pub next_daily_budget: Decimal,
}

/// The value observers of the rest-budget pill see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillState {
    pub state: DailyBudgetState,
    pub percent_including_pending_spend: Decimal,
    pub percent_excluding_pending_spend: Decimal,
    pub display_remaining_today: String,
    pub display_next_daily_budget: String,
}

impl Default for PillState {
    fn default() -> Self {
        PillState {
            state: DailyBudgetState::NotSet,
            percent_including_pending_spend: Decimal::ONE,
            percent_excluding_pending_spend: Decimal::ONE,
            display_remaining_today: String::new(),
            display_next_daily_budget: String::new(),
        }
    }
}

impl PillState {
    pub fn apply(&mut self, evaluation: &BudgetEvaluation) {
        self.state = evaluation.state;
        self.percent_including_pending_spend = evaluation.percent_including_pending_spend;
        self.percent_excluding_pending_spend = evaluation.percent_excluding_pending_spend;
        self.display_remaining_today = evaluation.display_remaining_today.clone();
        self.display_next_daily_budget = evaluation.display_next_daily_budget.clone();
    }

    /// Progress values for animation, as the UI layer expects floats.
    pub fn progress(&self) -> (f32, f32) {
        (
            self.percent_including_pending_spend.to_f32().unwrap_or(0.0),
            self.percent_excluding_pending_spend.to_f32().unwrap_or(0.0),
        )
    }
}

impl From<&BudgetEvaluation> for PillState {
    fn from(evaluation: &BudgetEvaluation) -> Self {
        let mut pill = PillState::default();
        pill.apply(evaluation);
        pill
    }
}

/// What a single `evaluate` call ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    /// No active period: only the state was reset to `NotSet`.
    NotSet,
    /// Daily budget is zero; nothing was published.
    Skipped,
    Published(BudgetEvaluation),
    /// A newer request already published; this result was discarded.
    Superseded,
}

impl EvaluationOutcome {
    pub fn evaluation(&self) -> Option<&BudgetEvaluation> {
        match self {
            EvaluationOutcome::Published(evaluation) => Some(evaluation),
            _ => None,
        }
    }
}
