//! Rounding and calendar constants shared by the calculators.
//!
//! Money rounds to cents, intermediate percentages to four places and the
//! income tax to whole units. All rounding is half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Days in the statutory year.
pub const DAYS_PER_YEAR: u32 = 365;

/// Days in the statutory month.
pub const DAYS_PER_MONTH: u32 = 30;

/// Months over which one-off costs are amortized.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Rounds a monetary amount to cents.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an intermediate percentage to four decimal places.
pub fn round_percent(percent: Decimal) -> Decimal {
    percent.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole currency units.
pub fn round_whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a percentage (expressed as 0–100) to an amount, unrounded.
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / Decimal::ONE_HUNDRED
}

/// Expresses a number of days as a percentage of the statutory year.
pub fn days_as_year_percent(days: u32) -> Decimal {
    round_percent(Decimal::from(days) / Decimal::from(DAYS_PER_YEAR) * Decimal::ONE_HUNDRED)
}
