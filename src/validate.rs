//! Parsing of user-entered values into explicit accept/reject outcomes.

use crate::error::Rejection;
use crate::model::{Amount, Category};
use rust_decimal::Decimal;
use std::str::FromStr;

/// The largest amount accepted from input or files. Sums of amounts this size stay far from the
/// limits of `Decimal` and are exact in the `f64` used for charts.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Parses an amount that must be a number greater than or equal to zero.
pub fn parse_amount(input: &str) -> Result<Amount, Rejection> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Rejection::Empty);
    }
    let amount =
        Amount::from_str(trimmed).map_err(|_| Rejection::NotANumber(trimmed.to_string()))?;
    if amount.is_negative() {
        return Err(Rejection::Negative(trimmed.to_string()));
    }
    check_limit(amount, trimmed)
}

/// Rejects amounts whose magnitude is above `MAX_AMOUNT`.
pub(crate) fn check_limit(amount: Amount, input: &str) -> Result<Amount, Rejection> {
    if amount.value().abs() > MAX_AMOUNT {
        return Err(Rejection::TooLarge(input.to_string()));
    }
    Ok(amount)
}

/// Parses a category name, see `Category::from_str`.
pub fn parse_category(input: &str) -> Result<Category, Rejection> {
    Category::from_str(input)
}

/// Returns true if `input` is the token that ends transaction entry, in any letter case.
pub fn is_done(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("done")
}
