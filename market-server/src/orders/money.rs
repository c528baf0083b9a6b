//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic on monetary values goes through `Decimal` and is rounded
//! to 2 decimal places (half-up) before being stored or serialized as f64.

use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::*;
use shared::{AppError, AppResult, ErrorCode};

/// Rounding for monetary values (2 decimal places)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Validate that an f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{} must be a finite number, got {}", field_name, value),
        ));
    }
    Ok(())
}

fn to_decimal(value: f64, field_name: &str) -> AppResult<Decimal> {
    require_finite(value, field_name)?;
    Decimal::try_from(value).map_err(|_| {
        AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{} is not representable: {}", field_name, value),
        )
    })
}

/// Round a decimal to 2 places (half-up) and convert back to f64
pub fn round2(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Validate a line quantity
pub fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity <= 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("quantity must be positive, got {}", quantity),
        ));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"),
        ));
    }
    Ok(())
}

/// Compute a line amount: `quantity × price`, validated and rounded
pub fn line_amount(price: f64, quantity: i32) -> AppResult<f64> {
    require_finite(price, "price")?;
    if price < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("price must be non-negative, got {}", price),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("price exceeds maximum allowed ({MAX_PRICE}), got {price}"),
        ));
    }
    validate_quantity(quantity)?;

    let price = to_decimal(price, "price")?;
    Ok(round2(price * Decimal::from(quantity)))
}

/// Sum already-rounded line amounts into an order total
pub fn sum_amounts<I: IntoIterator<Item = f64>>(amounts: I) -> f64 {
    let total = amounts
        .into_iter()
        .filter_map(|a| Decimal::try_from(a).ok())
        .sum::<Decimal>();
    round2(total)
}

/// Validate a payment amount offered by the client
pub fn validate_payment_amount(amount: f64) -> AppResult<()> {
    require_finite(amount, "amount")?;
    if amount < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("amount must be non-negative, got {}", amount),
        ));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("amount exceeds maximum allowed ({MAX_PAYMENT_AMOUNT}), got {amount}"),
        ));
    }
    Ok(())
}

/// Apply a flat discount. The result is NOT floored at zero: a discount
/// larger than the amount yields a negative payable value.
pub fn apply_discount(amount: f64, discount: f64) -> AppResult<f64> {
    let amount = to_decimal(amount, "amount")?;
    let discount = to_decimal(discount, "discount")?;
    Ok(round2(amount - discount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_amount() {
        assert_eq!(line_amount(10.0, 2).unwrap(), 20.0);
        assert_eq!(line_amount(3.33, 3).unwrap(), 9.99);
        // rounding happens per line
        assert_eq!(line_amount(0.105, 1).unwrap(), 0.11);
    }

    #[test]
    fn test_line_amount_rejects_bad_input() {
        assert!(line_amount(-1.0, 1).is_err());
        assert!(line_amount(f64::NAN, 1).is_err());
        assert!(line_amount(f64::INFINITY, 1).is_err());
        assert!(line_amount(10.0, 0).is_err());
        assert!(line_amount(10.0, -3).is_err());
        assert!(line_amount(10.0, 10_000).is_err());
        assert!(line_amount(2_000_000.0, 1).is_err());
    }

    #[test]
    fn test_sum_amounts() {
        assert_eq!(sum_amounts([20.0, 5.0]), 25.0);
        assert_eq!(sum_amounts([0.1, 0.2]), 0.3);
        assert_eq!(sum_amounts(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_discount_not_floored() {
        assert_eq!(apply_discount(25.0, 5.0).unwrap(), 20.0);
        // a discount larger than the amount goes negative, by contract
        assert_eq!(apply_discount(10.0, 15.0).unwrap(), -5.0);
    }
}
