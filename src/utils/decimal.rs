//! Decimal helpers for broker-normalized rounding.

use rust_decimal::Decimal;

/// Round a value to the nearest multiple of `step`.
///
/// Brokers only accept volumes quantized to the instrument's step; a zero
/// step leaves the value untouched.
pub fn round_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step == Decimal::ZERO {
        return value;
    }
    (value / step).round() * step
}
