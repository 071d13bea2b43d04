use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::budget::budget_calculator::{calculate_day_budget, DayBudgetInputs};
use crate::budget::budget_model::{
    BudgetEvaluation, BudgetSnapshot, DailyBudgetState, EvaluationOutcome, PendingSpend, PillState,
};
use crate::budget::budget_traits::{BudgetStoreTrait, DailyBudgetEvaluatorTrait};
use crate::currency::CurrencyFormatterTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::events::EvaluationPublisher;

/// Derives the rest-budget pill from the stored figures and a pending spend.
pub struct DailyBudgetEvaluator {
    store: Arc<dyn BudgetStoreTrait>,
    formatter: Arc<dyn CurrencyFormatterTrait>,
    publisher: EvaluationPublisher,
    generation: AtomicU64,
}

impl DailyBudgetEvaluator {
    pub fn new(
        store: Arc<dyn BudgetStoreTrait>,
        formatter: Arc<dyn CurrencyFormatterTrait>,
    ) -> Self {
        DailyBudgetEvaluator {
            store,
            formatter,
            publisher: EvaluationPublisher::new(),
            generation: AtomicU64::new(0),
        }
    }

    /// Reads the figures needed for one evaluation.
    ///
    /// Returns `None` without touching the other keys when no period is active.
    async fn read_snapshot(&self) -> Result<Option<BudgetSnapshot>> {
        let Some(period_end_date) = self.store.get_finish_period_date().await? else {
            return Ok(None);
        };

        let (total_budget, spent_from_daily_budget, daily_budget, currency) = futures::try_join!(
            self.store.get_budget(),
            self.store.get_spent_from_daily_budget(),
            self.store.get_daily_budget(),
            self.store.get_currency(),
        )?;

        Ok(Some(BudgetSnapshot {
            total_budget,
            spent_from_daily_budget,
            daily_budget,
            period_end_date: Some(period_end_date),
            currency,
        }))
    }

    fn build_evaluation(
        &self,
        snapshot: &BudgetSnapshot,
        pending_spend: PendingSpend,
        next_daily_budget: Decimal,
    ) -> Result<BudgetEvaluation> {
        let figures = calculate_day_budget(&DayBudgetInputs {
            daily_budget: snapshot.daily_budget,
            spent_from_daily_budget: snapshot.spent_from_daily_budget,
            pending_spend: pending_spend.amount(),
            next_daily_budget,
        })
        .ok_or_else(|| {
            Error::Validation(ValidationError::AmountOutOfRange(format!(
                "day budget {} with {} pending",
                snapshot.daily_budget,
                pending_spend.amount()
            )))
        })?;

        let display_remaining_today =
            self.formatter
                .format_currency(figures.display_rest(), &snapshot.currency, true);
        let display_next_daily_budget = self.formatter.format_currency(
            figures.display_next_daily_budget(),
            &snapshot.currency,
            true,
        );

        Ok(BudgetEvaluation {
            state: figures.state,
            percent_including_pending_spend: figures.percent_including_pending_spend,
            percent_excluding_pending_spend: figures.percent_excluding_pending_spend,
            display_remaining_today,
            display_next_daily_budget,
            rest_from_day_budget: figures.rest_from_day_budget,
            next_daily_budget: figures.next_daily_budget,
        })
    }
}

#[async_trait]
impl DailyBudgetEvaluatorTrait for DailyBudgetEvaluator {
    async fn evaluate(&self, pending_spend: PendingSpend) -> Result<EvaluationOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(snapshot) = self.read_snapshot().await? else {
            debug!("Evaluation #{}: no active period", generation);
            let published = self
                .publisher
                .publish_state(generation, DailyBudgetState::NotSet);
            return Ok(if published {
                EvaluationOutcome::NotSet
            } else {
                EvaluationOutcome::Superseded
            });
        };

        if !snapshot.has_daily_budget() {
            // Prior pill stays visible until a daily budget exists.
            debug!("Evaluation #{}: daily budget not set yet", generation);
            self.publisher.skip(generation);
            return Ok(EvaluationOutcome::Skipped);
        }

        let next_daily_budget = self
            .store
            .what_budget_for_day(true, true, pending_spend.amount())
            .await?;

        let evaluation = self.build_evaluation(&snapshot, pending_spend, next_daily_budget)?;

        debug!(
            "Evaluation #{}: total={} daily={} spent={} pending={} rest={} next={} state={}",
            generation,
            snapshot.total_budget,
            snapshot.daily_budget,
            snapshot.spent_from_daily_budget,
            pending_spend.amount(),
            evaluation.rest_from_day_budget,
            evaluation.next_daily_budget,
            evaluation.state
        );

        if self.publisher.publish(generation, &evaluation) {
            Ok(EvaluationOutcome::Published(evaluation))
        } else {
            debug!("Evaluation #{} superseded by a newer request", generation);
            Ok(EvaluationOutcome::Superseded)
        }
    }

    fn subscribe(&self) -> watch::Receiver<PillState> {
        self.publisher.subscribe()
    }

    fn current(&self) -> PillState {
        self.publisher.current()
    }
}
