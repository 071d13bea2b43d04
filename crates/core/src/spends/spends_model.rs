//! Spends domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::CurrencyId;

/// Everything the store keeps about the current budgeting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SpendsState {
    /// Total budget for the whole period.
    pub budget: Decimal,
    /// Committed spends from days before today.
    pub spent: Decimal,
    /// Today's allocation; zero until one is computed.
    pub daily_budget: Decimal,
    pub spent_from_daily_budget: Decimal,
    pub start_period_date: Option<NaiveDate>,
    pub finish_period_date: Option<NaiveDate>,
    pub currency: CurrencyId,
}

impl SpendsState {
    /// Money left in the period before anything is spent today.
    ///
    /// `None` when the figures are too large to subtract.
    pub fn rest_budget(&self) -> Option<Decimal> {
        self.budget.checked_sub(self.spent)
    }

    pub fn is_period_active(&self) -> bool {
        self.finish_period_date.is_some()
    }
}
