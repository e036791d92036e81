//! Uniform allocation: every target carries the same share.

use super::{RiskAllocator, RISK_DP};
use crate::signal::Signal;
use rust_decimal::Decimal;

/// Splits the budget evenly across targets.
///
/// Each share is rounded to three decimals independently, so the sum can
/// fall short of the total by up to n rounding steps. Strategies that need
/// the sum exact use [`super::FibonacciRisk`]'s residual correction.
#[derive(Debug, Clone)]
pub struct EqualRisk {
    total: Decimal,
}

impl EqualRisk {
    pub fn new(total: Decimal) -> Self {
        Self { total }
    }
}

impl RiskAllocator for EqualRisk {
    fn total_risk(&self) -> Decimal {
        self.total
    }

    fn per_target_risks(&self, signal: &Signal) -> Vec<Decimal> {
        let n = signal.targets.len();
        if n == 0 {
            return Vec::new();
        }
        let share = (self.total / Decimal::from(n as u64)).round_dp(RISK_DP);
        vec![share; n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::testutil::signal_with_targets;
    use rust_decimal_macros::dec;

    #[test]
    fn test_even_split() {
        let risks = EqualRisk::new(dec!(1.2)).per_target_risks(&signal_with_targets(3));
        assert_eq!(risks, vec![dec!(0.4), dec!(0.4), dec!(0.4)]);
    }

    #[test]
    fn test_truncating_split_stays_within_tolerance() {
        let risks = EqualRisk::new(dec!(1.0)).per_target_risks(&signal_with_targets(3));
        assert_eq!(risks, vec![dec!(0.333), dec!(0.333), dec!(0.333)]);
        let sum: Decimal = risks.iter().copied().sum();
        assert!((dec!(1.0) - sum).abs() <= dec!(0.001));
    }

    #[test]
    fn test_no_targets_allocates_nothing() {
        assert!(EqualRisk::new(dec!(1.0))
            .per_target_risks(&signal_with_targets(0))
            .is_empty());
    }

    #[test]
    fn test_single_target_gets_everything() {
        let risks = EqualRisk::new(dec!(0.01)).per_target_risks(&signal_with_targets(1));
        assert_eq!(risks, vec![dec!(0.01)]);
    }
}
