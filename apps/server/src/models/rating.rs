//! Rating derivation
//!
//! `rating = round(80 * speed * k / (MAX_PROD_YEAR - year + 1), 2)` where `k` is 0.5 for
//! used ships and 1.0 otherwise. Rounding is half-up and done in decimal arithmetic.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Earliest accepted production year.
pub const MIN_PROD_YEAR: i32 = 2800;
/// Latest accepted production year; also the "current" year of the rating formula.
pub const MAX_PROD_YEAR: i32 = 3019;

const SPEED_FACTOR: i64 = 80;

pub fn derive_rating(speed: f64, is_used: bool, prod_year: i32) -> f64 {
    let speed = Decimal::from_f64(speed).unwrap_or(Decimal::ZERO);
    let usage = if is_used {
        Decimal::new(5, 1)
    } else {
        Decimal::ONE
    };
    // Years past MAX_PROD_YEAR never pass validation; clamp so the divisor stays positive.
    let age = i64::from((MAX_PROD_YEAR - prod_year + 1).max(1));

    let rating = Decimal::from(SPEED_FACTOR) * speed * usage / Decimal::from(age);

    rating
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}
