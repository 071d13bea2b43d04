use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::PROJECTION_DECIMAL_PRECISION;
use crate::errors::{Error, Result, ValidationError};
use crate::spends::SpendsState;
use crate::utils::time_utils::count_days_inclusive;

/// Flags for [`what_budget_for_day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectionOptions {
    /// Leave today out of the remaining-days count.
    pub exclude_current_day: bool,
    /// Deduct what was spent today, plus the uncommitted amount.
    pub apply_today_spends: bool,
    pub not_committed_spent: Decimal,
}

/// Spreads the money left in the period evenly over the remaining days.
///
/// When today's spends are not applied but today is excluded, today's whole
/// allocation is treated as already reserved. With no remaining days the
/// full rest is returned undivided; with no active period the result is zero.
///
/// Fails with [`ValidationError::AmountOutOfRange`] when the amounts overflow.
pub fn what_budget_for_day(
    state: &SpendsState,
    today: NaiveDate,
    options: &ProjectionOptions,
) -> Result<Decimal> {
    let Some(finish_date) = state.finish_period_date else {
        return Ok(Decimal::ZERO);
    };

    let mut rest_days = count_days_inclusive(today, finish_date);
    if options.exclude_current_day {
        rest_days = rest_days.saturating_sub(1);
    }

    let rest_budget = if options.apply_today_spends {
        state.rest_budget().and_then(|rest| {
            state
                .spent_from_daily_budget
                .checked_add(options.not_committed_spent)
                .and_then(|spent_today| rest.checked_sub(spent_today))
        })
    } else if options.exclude_current_day {
        state
            .rest_budget()
            .and_then(|rest| rest.checked_sub(state.daily_budget))
    } else {
        state.rest_budget()
    };
    let rest_budget = rest_budget.ok_or_else(|| {
        Error::Validation(ValidationError::AmountOutOfRange(format!(
            "period rest with {} pending",
            options.not_committed_spent
        )))
    })?;

    if rest_days == 0 {
        return Ok(rest_budget);
    }

    Ok((rest_budget / Decimal::from(rest_days)).round_dp_with_strategy(
        PROJECTION_DECIMAL_PRECISION,
        RoundingStrategy::MidpointNearestEven,
    ))
}
