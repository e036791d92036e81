//! Percentage-of-equity risk to broker lot conversion.
//!
//! Pure arithmetic over caller-supplied account and instrument data, so the
//! conversion is testable without any live connectivity.

use super::InstrumentMetadata;
use crate::utils::decimal::round_to_step;
use rust_decimal::Decimal;
use thiserror::Error;

/// Why a risk fraction could not be turned into a lot volume.
///
/// Sizing never degrades to a zero or default volume; an order that cannot
/// be sized must not reach the execution port at all.
#[derive(Debug, Error, PartialEq)]
pub enum SizingError {
    #[error("order has no stop loss; risk cannot be sized without a stop distance")]
    MissingStopLoss,
    #[error("stop distance is zero; entry and stop loss coincide")]
    ZeroStopDistance,
    #[error("account balance is zero")]
    ZeroBalance,
    #[error("instrument metadata has zero {0}")]
    InvalidMetadata(&'static str),
    #[error("computed volume {0} is not positive")]
    NonPositiveVolume(Decimal),
}

/// Convert a risk fraction into lots.
///
/// `reference_price` is the order's limit price when set, otherwise the
/// live market quote supplied by the caller. The raw volume
/// `balance * risk / (money_per_point * stop_distance_points)` is rounded
/// to the nearest volume step, floored at the broker minimum, and quoted
/// to two decimals.
pub fn risk_to_volume(
    risk: Decimal,
    reference_price: Decimal,
    stop_loss: Option<Decimal>,
    balance: Decimal,
    meta: &InstrumentMetadata,
) -> Result<Decimal, SizingError> {
    if balance <= Decimal::ZERO {
        return Err(SizingError::ZeroBalance);
    }
    if meta.tick_size <= Decimal::ZERO {
        return Err(SizingError::InvalidMetadata("tick_size"));
    }
    if meta.point_size <= Decimal::ZERO {
        return Err(SizingError::InvalidMetadata("point_size"));
    }

    let sl = stop_loss.ok_or(SizingError::MissingStopLoss)?;

    let money_per_point = meta.tick_value / meta.tick_size * meta.point_size;
    if money_per_point <= Decimal::ZERO {
        return Err(SizingError::InvalidMetadata("tick_value"));
    }

    let stop_distance_points = (reference_price - sl).abs() / meta.point_size;
    if stop_distance_points.is_zero() {
        return Err(SizingError::ZeroStopDistance);
    }

    let raw_volume = balance * risk / (money_per_point * stop_distance_points);
    let volume = round_to_step(raw_volume, meta.volume_step)
        .max(meta.volume_min)
        .round_dp(2);

    if volume <= Decimal::ZERO {
        return Err(SizingError::NonPositiveVolume(volume));
    }
    Ok(volume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Gold-like instrument: one point is one cent, $1 per point per lot.
    fn gold() -> InstrumentMetadata {
        InstrumentMetadata {
            tick_value: dec!(1),
            tick_size: dec!(0.01),
            point_size: dec!(0.01),
            volume_step: dec!(0.01),
            volume_min: dec!(0.01),
        }
    }

    #[test]
    fn test_sizes_from_stop_distance() {
        // $100 at risk over 900 points at $1/point -> 0.11 lots
        let volume = risk_to_volume(
            dec!(0.01),
            dec!(3322),
            Some(dec!(3313)),
            dec!(10000),
            &gold(),
        )
        .unwrap();
        assert_eq!(volume, dec!(0.11));
    }

    #[test]
    fn test_tiny_risk_floors_at_minimum_volume() {
        let volume = risk_to_volume(
            dec!(0.0001),
            dec!(3322),
            Some(dec!(3313)),
            dec!(100),
            &gold(),
        )
        .unwrap();
        assert_eq!(volume, dec!(0.01));
    }

    #[test]
    fn test_zero_stop_distance_fails() {
        let err = risk_to_volume(
            dec!(0.01),
            dec!(3322),
            Some(dec!(3322)),
            dec!(10000),
            &gold(),
        )
        .unwrap_err();
        assert_eq!(err, SizingError::ZeroStopDistance);
    }

    #[test]
    fn test_missing_stop_loss_fails() {
        let err = risk_to_volume(dec!(0.01), dec!(3322), None, dec!(10000), &gold()).unwrap_err();
        assert_eq!(err, SizingError::MissingStopLoss);
    }

    #[test]
    fn test_zero_balance_fails() {
        let err = risk_to_volume(
            dec!(0.01),
            dec!(3322),
            Some(dec!(3313)),
            Decimal::ZERO,
            &gold(),
        )
        .unwrap_err();
        assert_eq!(err, SizingError::ZeroBalance);
    }

    #[test]
    fn test_degenerate_metadata_fails() {
        let mut meta = gold();
        meta.tick_size = Decimal::ZERO;
        let err = risk_to_volume(dec!(0.01), dec!(3322), Some(dec!(3313)), dec!(10000), &meta)
            .unwrap_err();
        assert_eq!(err, SizingError::InvalidMetadata("tick_size"));
    }

    #[test]
    fn test_volume_quantized_to_step() {
        let mut meta = gold();
        meta.volume_step = dec!(0.1);
        // raw 0.111 lots snaps to the 0.1 step
        let volume = risk_to_volume(
            dec!(0.01),
            dec!(3322),
            Some(dec!(3313)),
            dec!(10000),
            &meta,
        )
        .unwrap();
        assert_eq!(volume, dec!(0.1));
    }

    #[test]
    fn test_direction_does_not_matter() {
        // stop above the reference (a sell) sizes the same as below
        let below = risk_to_volume(dec!(0.01), dec!(3322), Some(dec!(3313)), dec!(10000), &gold());
        let above = risk_to_volume(dec!(0.01), dec!(3313), Some(dec!(3322)), dec!(10000), &gold());
        assert_eq!(below, above);
    }
}
