use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::budget::{BudgetStoreTrait, PendingSpend};
use crate::currency::CurrencyId;
use crate::errors::{Error, Result, ValidationError};
use crate::spends::day_budget_projection::{what_budget_for_day, ProjectionOptions};
use crate::spends::SpendsState;
use crate::utils::time_utils::local_today;

/// Budget store kept entirely in memory.
///
/// Reads always see the latest write. "Today" follows the local clock unless
/// pinned with [`InMemoryBudgetStore::with_fixed_today`].
pub struct InMemoryBudgetStore {
    state: RwLock<SpendsState>,
    fixed_today: Option<NaiveDate>,
}

impl InMemoryBudgetStore {
    pub fn new(state: SpendsState) -> Self {
        InMemoryBudgetStore {
            state: RwLock::new(state),
            fixed_today: None,
        }
    }

    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(local_today)
    }

    pub async fn snapshot(&self) -> SpendsState {
        self.state.read().await.clone()
    }

    pub async fn replace(&self, state: SpendsState) {
        *self.state.write().await = state;
    }

    /// Commits a spend against today's allocation.
    pub async fn commit_spend(&self, amount: PendingSpend) -> Result<Decimal> {
        let mut state = self.state.write().await;
        state.spent_from_daily_budget = state
            .spent_from_daily_budget
            .checked_add(amount.amount())
            .ok_or_else(|| {
                Error::Validation(ValidationError::AmountOutOfRange(amount.amount().to_string()))
            })?;
        debug!(
            "Committed spend {}, spent from daily budget now {}",
            amount.amount(),
            state.spent_from_daily_budget
        );
        Ok(state.spent_from_daily_budget)
    }

    pub async fn set_daily_budget(&self, daily_budget: Decimal) -> Result<()> {
        if daily_budget.is_sign_negative() && !daily_budget.is_zero() {
            return Err(Error::Validation(ValidationError::NegativeAmount(
                daily_budget.to_string(),
            )));
        }
        self.state.write().await.daily_budget = daily_budget;
        Ok(())
    }
}

impl Default for InMemoryBudgetStore {
    fn default() -> Self {
        Self::new(SpendsState::default())
    }
}

#[async_trait]
impl BudgetStoreTrait for InMemoryBudgetStore {
    async fn get_budget(&self) -> Result<Decimal> {
        Ok(self.state.read().await.budget)
    }

    async fn get_spent_from_daily_budget(&self) -> Result<Decimal> {
        Ok(self.state.read().await.spent_from_daily_budget)
    }

    async fn get_daily_budget(&self) -> Result<Decimal> {
        Ok(self.state.read().await.daily_budget)
    }

    async fn get_currency(&self) -> Result<CurrencyId> {
        Ok(self.state.read().await.currency.clone())
    }

    async fn get_finish_period_date(&self) -> Result<Option<NaiveDate>> {
        Ok(self.state.read().await.finish_period_date)
    }

    async fn what_budget_for_day(
        &self,
        exclude_current_day: bool,
        apply_today_spends: bool,
        not_committed_spent: Decimal,
    ) -> Result<Decimal> {
        let state = self.state.read().await;
        what_budget_for_day(
            &state,
            self.today(),
            &ProjectionOptions {
                exclude_current_day,
                apply_today_spends,
                not_committed_spent,
            },
        )
    }
}
