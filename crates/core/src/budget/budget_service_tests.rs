//! Unit tests for the daily budget evaluator.

use super::*;
use crate::currency::{CurrencyFormatterTrait, CurrencyId, DefaultCurrencyFormatter};
use crate::errors::{Error, Result, StoreError};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Clone)]
struct MockFigures {
    budget: Decimal,
    spent_from_daily_budget: Decimal,
    daily_budget: Decimal,
    currency: CurrencyId,
    finish_period_date: Option<NaiveDate>,
    next_daily_budget: Decimal,
    fail_reads: bool,
}

impl Default for MockFigures {
    fn default() -> Self {
        MockFigures {
            budget: dec!(3000),
            spent_from_daily_budget: dec!(30),
            daily_budget: dec!(100),
            currency: CurrencyId::iso("USD"),
            finish_period_date: NaiveDate::from_ymd_opt(2024, 6, 30),
            next_daily_budget: dec!(50),
            fail_reads: false,
        }
    }
}

#[derive(Default)]
struct MockBudgetStore {
    figures: Mutex<MockFigures>,
    /// Projection latency per pending amount.
    projection_delays: HashMap<Decimal, Duration>,
    projection_calls: Mutex<Vec<(bool, bool, Decimal)>>,
    figure_reads: AtomicUsize,
}

impl MockBudgetStore {
    fn new(figures: MockFigures) -> Self {
        Self {
            figures: Mutex::new(figures),
            ..Default::default()
        }
    }

    fn with_delay(mut self, pending: Decimal, delay: Duration) -> Self {
        self.projection_delays.insert(pending, delay);
        self
    }

    fn update(&self, f: impl FnOnce(&mut MockFigures)) {
        f(&mut self.figures.lock().unwrap());
    }

    fn figures(&self) -> Result<MockFigures> {
        self.figure_reads.fetch_add(1, Ordering::SeqCst);
        let figures = self.figures.lock().unwrap().clone();
        if figures.fail_reads {
            return Err(Error::Store(StoreError::ReadFailed(
                "disk unavailable".to_string(),
            )));
        }
        Ok(figures)
    }

    fn projection_calls(&self) -> Vec<(bool, bool, Decimal)> {
        self.projection_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BudgetStoreTrait for MockBudgetStore {
    async fn get_budget(&self) -> Result<Decimal> {
        Ok(self.figures()?.budget)
    }

    async fn get_spent_from_daily_budget(&self) -> Result<Decimal> {
        Ok(self.figures()?.spent_from_daily_budget)
    }

    async fn get_daily_budget(&self) -> Result<Decimal> {
        Ok(self.figures()?.daily_budget)
    }

    async fn get_currency(&self) -> Result<CurrencyId> {
        Ok(self.figures()?.currency)
    }

    async fn get_finish_period_date(&self) -> Result<Option<NaiveDate>> {
        Ok(self.figures.lock().unwrap().finish_period_date)
    }

    async fn what_budget_for_day(
        &self,
        exclude_current_day: bool,
        apply_today_spends: bool,
        not_committed_spent: Decimal,
    ) -> Result<Decimal> {
        self.projection_calls.lock().unwrap().push((
            exclude_current_day,
            apply_today_spends,
            not_committed_spent,
        ));
        if let Some(delay) = self.projection_delays.get(&not_committed_spent) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.figures.lock().unwrap().next_daily_budget)
    }
}

/// Echoes its inputs so tests can check what was handed to the formatter.
struct RecordingFormatter;

impl CurrencyFormatterTrait for RecordingFormatter {
    fn format_currency(
        &self,
        amount: Decimal,
        currency: &CurrencyId,
        trim_trailing_zeros: bool,
    ) -> String {
        format!("{}|{}|{}", amount, currency, trim_trailing_zeros)
    }
}

fn evaluator(store: Arc<MockBudgetStore>) -> DailyBudgetEvaluator {
    DailyBudgetEvaluator::new(store, Arc::new(DefaultCurrencyFormatter::default()))
}

fn pending(amount: Decimal) -> PendingSpend {
    PendingSpend::new(amount).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_normal_day_publishes_all_fields() {
    let store = Arc::new(MockBudgetStore::new(MockFigures::default()));
    let evaluator = evaluator(store.clone());
    let mut rx = evaluator.subscribe();

    let outcome = evaluator.evaluate(pending(dec!(20))).await.unwrap();
    let evaluation = outcome.evaluation().expect("published").clone();

    assert_eq!(evaluation.state, DailyBudgetState::Normal);
    assert_eq!(evaluation.rest_from_day_budget, dec!(50));
    assert_eq!(evaluation.percent_excluding_pending_spend, dec!(0.50));
    assert_eq!(evaluation.percent_including_pending_spend, dec!(0.70));
    assert_eq!(evaluation.display_remaining_today, "$50");
    assert_eq!(evaluation.display_next_daily_budget, "$50");

    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), PillState::from(&evaluation));
    assert_eq!(store.projection_calls(), vec![(true, true, dec!(20))]);
}

#[tokio::test]
async fn test_overdraft_clamps_remaining() {
    let store = Arc::new(MockBudgetStore::new(MockFigures {
        spent_from_daily_budget: dec!(90),
        next_daily_budget: dec!(5),
        ..Default::default()
    }));
    let evaluator = evaluator(store);

    let outcome = evaluator.evaluate(pending(dec!(20))).await.unwrap();
    let evaluation = outcome.evaluation().unwrap();

    assert_eq!(evaluation.rest_from_day_budget, dec!(-10));
    assert_eq!(evaluation.state, DailyBudgetState::Overdraft);
    assert_eq!(evaluation.percent_excluding_pending_spend, Decimal::ZERO);
    assert_eq!(evaluation.percent_including_pending_spend, dec!(0.10));
    assert_eq!(evaluation.display_remaining_today, "$0");
    assert!(!evaluation.display_remaining_today.contains('-'));
    assert_eq!(evaluation.display_next_daily_budget, "$5");
}

#[tokio::test]
async fn test_missing_period_sets_not_set_only() {
    let store = Arc::new(MockBudgetStore::new(MockFigures::default()));
    let evaluator = evaluator(store.clone());
    evaluator.evaluate(pending(dec!(20))).await.unwrap();
    let before = evaluator.current();

    store.update(|f| {
        f.finish_period_date = None;
        f.daily_budget = Decimal::ZERO;
        f.next_daily_budget = dec!(-100);
    });
    let reads_before = store.figure_reads.load(Ordering::SeqCst);

    let outcome = evaluator.evaluate(pending(dec!(70))).await.unwrap();
    assert_eq!(outcome, EvaluationOutcome::NotSet);

    let after = evaluator.current();
    assert_eq!(after.state, DailyBudgetState::NotSet);
    assert_eq!(
        after.percent_excluding_pending_spend,
        before.percent_excluding_pending_spend
    );
    assert_eq!(after.display_remaining_today, before.display_remaining_today);
    assert_eq!(after.display_next_daily_budget, before.display_next_daily_budget);

    // The period check gates every other read
    assert_eq!(store.figure_reads.load(Ordering::SeqCst), reads_before);
    assert_eq!(store.projection_calls().len(), 1);
}

#[tokio::test]
async fn test_zero_daily_budget_changes_nothing() {
    let store = Arc::new(MockBudgetStore::new(MockFigures::default()));
    let evaluator = evaluator(store.clone());
    evaluator.evaluate(pending(dec!(10))).await.unwrap();

    let mut rx = evaluator.subscribe();
    let before = evaluator.current();
    store.update(|f| f.daily_budget = Decimal::ZERO);

    let outcome = evaluator.evaluate(pending(dec!(40))).await.unwrap();

    assert_eq!(outcome, EvaluationOutcome::Skipped);
    assert!(!rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), before);
    assert_eq!(store.projection_calls().len(), 1);
}

#[tokio::test]
async fn test_zero_daily_budget_before_first_evaluation_keeps_defaults() {
    let store = Arc::new(MockBudgetStore::new(MockFigures {
        daily_budget: Decimal::ZERO,
        ..Default::default()
    }));
    let evaluator = evaluator(store);

    assert_eq!(
        evaluator.evaluate(PendingSpend::ZERO).await.unwrap(),
        EvaluationOutcome::Skipped
    );
    assert_eq!(evaluator.current(), PillState::default());
}

#[tokio::test]
async fn test_budget_end_wins_even_with_money_left_today() {
    let store = Arc::new(MockBudgetStore::new(MockFigures {
        spent_from_daily_budget: Decimal::ZERO,
        next_daily_budget: Decimal::ZERO,
        ..Default::default()
    }));
    let evaluator = evaluator(store);

    let outcome = evaluator.evaluate(PendingSpend::ZERO).await.unwrap();
    let evaluation = outcome.evaluation().unwrap();

    assert_eq!(evaluation.state, DailyBudgetState::BudgetEnd);
    assert_eq!(evaluation.percent_excluding_pending_spend, dec!(1.00));
    assert_eq!(evaluation.percent_including_pending_spend, dec!(1.00));
    assert_eq!(evaluation.display_remaining_today, "$100");
    assert_eq!(evaluation.display_next_daily_budget, "$0");
}

#[tokio::test]
async fn test_formatter_receives_clamped_and_rounded_values() {
    let store = Arc::new(MockBudgetStore::new(MockFigures {
        spent_from_daily_budget: dec!(95),
        next_daily_budget: dec!(42.5),
        currency: CurrencyId::custom("coins"),
        ..Default::default()
    }));
    let evaluator = DailyBudgetEvaluator::new(store.clone(), Arc::new(RecordingFormatter));

    let outcome = evaluator.evaluate(pending(dec!(10))).await.unwrap();
    let evaluation = outcome.evaluation().unwrap();
    assert_eq!(evaluation.display_remaining_today, "0|coins|true");
    assert_eq!(evaluation.display_next_daily_budget, "42|coins|true");

    store.update(|f| f.next_daily_budget = dec!(-12.6));
    let outcome = evaluator.evaluate(pending(dec!(10))).await.unwrap();
    let evaluation = outcome.evaluation().unwrap();
    assert_eq!(evaluation.state, DailyBudgetState::BudgetEnd);
    assert_eq!(evaluation.display_next_daily_budget, "0|coins|true");
}

#[tokio::test]
async fn test_store_failure_propagates_without_publishing() {
    let store = Arc::new(MockBudgetStore::new(MockFigures {
        fail_reads: true,
        ..Default::default()
    }));
    let evaluator = evaluator(store.clone());
    let rx = evaluator.subscribe();

    let result = evaluator.evaluate(pending(dec!(5))).await;

    assert!(matches!(
        result,
        Err(Error::Store(StoreError::ReadFailed(_)))
    ));
    assert!(!rx.has_changed().unwrap());
    assert!(store.projection_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slow_older_request_cannot_overwrite_newer_one() {
    let store = Arc::new(
        MockBudgetStore::new(MockFigures::default())
            .with_delay(dec!(10), Duration::from_millis(100))
            .with_delay(dec!(20), Duration::from_millis(10)),
    );
    let evaluator = evaluator(store);

    let (older, newer) = tokio::join!(
        evaluator.evaluate(pending(dec!(10))),
        evaluator.evaluate(pending(dec!(20)))
    );

    assert_eq!(older.unwrap(), EvaluationOutcome::Superseded);
    assert!(matches!(newer.unwrap(), EvaluationOutcome::Published(_)));
    assert_eq!(
        evaluator.current().percent_excluding_pending_spend,
        dec!(0.50)
    );
}

#[tokio::test(start_paused = true)]
async fn test_handle_restarts_on_new_request() {
    let store = Arc::new(
        MockBudgetStore::new(MockFigures::default())
            .with_delay(dec!(10), Duration::from_millis(100))
            .with_delay(dec!(20), Duration::from_millis(100)),
    );
    let evaluator: Arc<dyn DailyBudgetEvaluatorTrait> = Arc::new(evaluator(store));
    let handle = EvaluatorHandle::new(evaluator.clone(), tokio::runtime::Handle::current());
    let mut rx = handle.subscribe();

    handle.request(pending(dec!(10)));
    tokio::task::yield_now().await;
    handle.request(pending(dec!(20)));

    rx.changed().await.unwrap();
    let pill = rx.borrow_and_update().clone();
    assert_eq!(pill.percent_excluding_pending_spend, dec!(0.50));
    assert_eq!(pill.display_remaining_today, "$50");

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!rx.has_changed().unwrap());
    assert!(handle.is_idle());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_request_never_publishes() {
    let store = Arc::new(
        MockBudgetStore::new(MockFigures::default())
            .with_delay(dec!(10), Duration::from_millis(100)),
    );
    let evaluator: Arc<dyn DailyBudgetEvaluatorTrait> = Arc::new(evaluator(store.clone()));
    let handle = EvaluatorHandle::new(evaluator.clone(), tokio::runtime::Handle::current());

    handle.request(pending(dec!(10)));
    tokio::task::yield_now().await;
    handle.cancel();

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(evaluator.current(), PillState::default());
    assert!(handle.is_idle());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_cancels_in_flight_work() {
    let store = Arc::new(
        MockBudgetStore::new(MockFigures::default())
            .with_delay(dec!(10), Duration::from_millis(100)),
    );
    let evaluator: Arc<dyn DailyBudgetEvaluatorTrait> = Arc::new(evaluator(store));

    {
        let handle = EvaluatorHandle::new(evaluator.clone(), tokio::runtime::Handle::current());
        handle.request(pending(dec!(10)));
        tokio::task::yield_now().await;
    }

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(evaluator.current(), PillState::default());
}
