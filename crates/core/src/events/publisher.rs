//! Ordered publishing of pill state to observers.

use std::sync::Mutex;

use tokio::sync::watch;

use crate::budget::{BudgetEvaluation, DailyBudgetState, PillState};

/// Fans the latest [`PillState`] out to any number of observers.
///
/// Every publish carries the generation of the request that produced it.
/// A value from an older generation than the last accepted one is dropped,
/// so observers never go back to an earlier keystroke's result.
pub struct EvaluationPublisher {
    sender: watch::Sender<PillState>,
    last_generation: Mutex<u64>,
}

impl EvaluationPublisher {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(PillState::default());
        Self {
            sender,
            last_generation: Mutex::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PillState> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> PillState {
        self.sender.borrow().clone()
    }

    /// Replaces all five observed fields in one step.
    pub fn publish(&self, generation: u64, evaluation: &BudgetEvaluation) -> bool {
        self.accept(generation, |pill| pill.apply(evaluation))
    }

    /// Sets only the state, leaving the rest of the pill untouched.
    pub fn publish_state(&self, generation: u64, state: DailyBudgetState) -> bool {
        self.accept(generation, |pill| pill.state = state)
    }

    /// Records that `generation` finished without producing a value.
    ///
    /// Older requests still in flight can no longer publish afterwards.
    pub fn skip(&self, generation: u64) -> bool {
        let mut last = self
            .last_generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if generation < *last {
            return false;
        }
        *last = generation;
        true
    }

    fn accept(&self, generation: u64, update: impl FnOnce(&mut PillState)) -> bool {
        let mut last = self
            .last_generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if generation < *last {
            return false;
        }
        *last = generation;
        // Lagging or absent observers never block the producer.
        self.sender.send_modify(update);
        true
    }
}

impl Default for EvaluationPublisher {
    fn default() -> Self {
        Self::new()
    }
}
