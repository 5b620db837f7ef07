//! Decimal helpers shared by every monetary computation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CoreError;

/// Number of decimal places kept for stored and displayed amounts.
pub const MONEY_SCALE: u32 = 2;

/// Round an amount to [`MONEY_SCALE`] places, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Apply a percentage to an amount and round the result.
pub fn percentage_of(amount: Decimal, percentage: Decimal) -> Decimal {
    round_money(amount * percentage / Decimal::ONE_HUNDRED)
}

/// Reject negative amounts. `field` names the input in the error message.
pub fn validate_non_negative(value: Decimal, field: &str) -> Result<(), CoreError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than or equal to 0"
        )));
    }
    Ok(())
}
