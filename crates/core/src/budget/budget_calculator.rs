//! Pure arithmetic behind the rest-budget pill.
//!
//! Everything here works on exact decimals. Rounding only happens when the
//! ratios are quantized and when the next daily budget is prepared for display.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::budget::budget_model::DailyBudgetState;
use crate::constants::{NEXT_DAILY_BUDGET_PRECISION, PERCENT_DECIMAL_PRECISION};

/// Inputs for one day-budget calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayBudgetInputs {
    pub daily_budget: Decimal,
    pub spent_from_daily_budget: Decimal,
    pub pending_spend: Decimal,
    pub next_daily_budget: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayBudgetFigures {
    pub state: DailyBudgetState,
    pub rest_from_day_budget: Decimal,
    pub next_daily_budget: Decimal,
    pub percent_including_pending_spend: Decimal,
    pub percent_excluding_pending_spend: Decimal,
}

impl DayBudgetFigures {
    /// Remaining amount for today as shown to the user.
    pub fn display_rest(&self) -> Decimal {
        self.rest_from_day_budget.max(Decimal::ZERO)
    }

    /// Next daily budget rounded to whole units as shown to the user.
    pub fn display_next_daily_budget(&self) -> Decimal {
        self.next_daily_budget
            .round_dp_with_strategy(
                NEXT_DAILY_BUDGET_PRECISION,
                RoundingStrategy::MidpointNearestEven,
            )
            .max(Decimal::ZERO)
    }
}

/// `BudgetEnd` wins over `Overdraft`.
pub fn classify(rest_from_day_budget: Decimal, next_daily_budget: Decimal) -> DailyBudgetState {
    let is_budget_end = next_daily_budget <= Decimal::ZERO;
    let is_overdraft = rest_from_day_budget < Decimal::ZERO;

    if is_budget_end {
        DailyBudgetState::BudgetEnd
    } else if is_overdraft {
        DailyBudgetState::Overdraft
    } else {
        DailyBudgetState::Normal
    }
}

/// `amount / daily_budget` rounded half-even to two places, never below zero.
///
/// Returns `None` for a zero daily budget.
pub fn remaining_ratio(amount: Decimal, daily_budget: Decimal) -> Option<Decimal> {
    let ratio = amount.checked_div(daily_budget)?;
    let ratio = ratio
        .round_dp_with_strategy(PERCENT_DECIMAL_PRECISION, RoundingStrategy::MidpointNearestEven)
        .max(Decimal::ZERO);
    // -0.00 after rounding a tiny negative ratio
    Some(if ratio.is_zero() { Decimal::ZERO } else { ratio })
}

/// Computes today's figures.
///
/// Returns `None` while the daily budget is unset or when the amounts are too
/// large to combine.
pub fn calculate_day_budget(inputs: &DayBudgetInputs) -> Option<DayBudgetFigures> {
    if inputs.daily_budget.is_zero() {
        return None;
    }

    let rest_from_day_budget = inputs
        .daily_budget
        .checked_sub(inputs.spent_from_daily_budget)?
        .checked_sub(inputs.pending_spend)?;

    let percent_excluding_pending_spend =
        remaining_ratio(rest_from_day_budget, inputs.daily_budget)?;
    let percent_including_pending_spend = remaining_ratio(
        rest_from_day_budget.checked_add(inputs.pending_spend)?,
        inputs.daily_budget,
    )?;

    Some(DayBudgetFigures {
        state: classify(rest_from_day_budget, inputs.next_daily_budget),
        rest_from_day_budget,
        next_daily_budget: inputs.next_daily_budget,
        percent_including_pending_spend,
        percent_excluding_pending_spend,
    })
}
