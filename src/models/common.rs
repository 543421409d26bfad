use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Largest value a `decimal(10, 2)` money column holds.
pub const MAX_AMOUNT: Decimal = dec!(99999999.99);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Rejects amounts the money columns would refuse or silently round:
/// negatives, more than two decimal places, or above [`MAX_AMOUNT`].
pub fn check_amount(what: &str, amount: Decimal) -> Result<(), String> {
    if amount < Decimal::ZERO {
        return Err(format!("{} must not be negative", what));
    }
    if amount.normalize().scale() > 2 {
        return Err(format!("{} has more than two decimal places", what));
    }
    if amount > MAX_AMOUNT {
        return Err(format!("{} exceeds {}", what, MAX_AMOUNT));
    }
    Ok(())
}
