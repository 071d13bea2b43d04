//! Cancel-and-restart driver for keystroke-triggered evaluations.

use std::sync::{Arc, Mutex};

use log::warn;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::budget::budget_model::{PendingSpend, PillState};
use crate::budget::budget_traits::DailyBudgetEvaluatorTrait;

/// Runs evaluations on an explicit runtime, keeping at most one in flight.
///
/// A new request aborts the previous one before it can publish. Dropping
/// the handle aborts whatever is still running.
pub struct EvaluatorHandle {
    evaluator: Arc<dyn DailyBudgetEvaluatorTrait>,
    runtime: Handle,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl EvaluatorHandle {
    pub fn new(evaluator: Arc<dyn DailyBudgetEvaluatorTrait>, runtime: Handle) -> Self {
        EvaluatorHandle {
            evaluator,
            runtime,
            in_flight: Mutex::new(None),
        }
    }

    /// Schedules an evaluation for `pending_spend`, cancelling the previous one.
    pub fn request(&self, pending_spend: PendingSpend) {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = in_flight.take() {
            previous.abort();
        }

        let evaluator = self.evaluator.clone();
        *in_flight = Some(self.runtime.spawn(async move {
            if let Err(e) = evaluator.evaluate(pending_spend).await {
                warn!(
                    "Failed to evaluate daily budget for pending spend {}: {}",
                    pending_spend.amount(),
                    e
                );
            }
        }));
    }

    /// Aborts the in-flight evaluation, if any.
    pub fn cancel(&self) {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = in_flight.take() {
            previous.abort();
        }
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map_or(true, |task| task.is_finished())
    }

    pub fn subscribe(&self) -> watch::Receiver<PillState> {
        self.evaluator.subscribe()
    }
}

impl Drop for EvaluatorHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
