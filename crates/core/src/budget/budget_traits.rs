use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::budget::budget_model::{EvaluationOutcome, PendingSpend, PillState};
use crate::currency::CurrencyId;
use crate::errors::Result;

/// Read access to the stored budget figures.
///
/// Every call returns the latest stored value; callers must not cache
/// results across evaluations.
#[async_trait]
pub trait BudgetStoreTrait: Send + Sync {
    async fn get_budget(&self) -> Result<Decimal>;

    async fn get_spent_from_daily_budget(&self) -> Result<Decimal>;

    async fn get_daily_budget(&self) -> Result<Decimal>;

    async fn get_currency(&self) -> Result<CurrencyId>;

    /// `None` when no budgeting period is active.
    async fn get_finish_period_date(&self) -> Result<Option<NaiveDate>>;

    /// Projects the daily budget for the rest of the period.
    async fn what_budget_for_day(
        &self,
        exclude_current_day: bool,
        apply_today_spends: bool,
        not_committed_spent: Decimal,
    ) -> Result<Decimal>;
}

/// Trait for the rest-budget pill evaluator
#[async_trait]
pub trait DailyBudgetEvaluatorTrait: Send + Sync {
    async fn evaluate(&self, pending_spend: PendingSpend) -> Result<EvaluationOutcome>;

    fn subscribe(&self) -> watch::Receiver<PillState>;

    fn current(&self) -> PillState;
}
