/// Fractional digits kept on the pill percentages.
pub const PERCENT_DECIMAL_PRECISION: u32 = 2;

/// Fractional digits shown for the recommended next daily budget.
pub const NEXT_DAILY_BUDGET_PRECISION: u32 = 0;

/// Fractional digits kept by the day-budget projection.
pub const PROJECTION_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
