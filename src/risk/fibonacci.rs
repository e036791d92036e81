//! Fibonacci-weighted allocation.

use super::{RiskAllocator, RISK_DP};
use crate::signal::Signal;
use rust_decimal::Decimal;

/// Weights targets by the Fibonacci sequence `1, 1, 2, 3, 5, …`.
///
/// With `reverse` set, the weight sequence is flipped so the nearest target
/// absorbs the largest share instead of the smallest. The rounding residual
/// is folded into the last element of the (possibly reversed) sequence,
/// which keeps the fraction sum equal to the total exactly. Which target
/// absorbs the residual is part of the contract: correction happens after
/// reversal, on the final position.
#[derive(Debug, Clone)]
pub struct FibonacciRisk {
    total: Decimal,
    reverse: bool,
}

impl FibonacciRisk {
    pub fn new(total: Decimal, reverse: bool) -> Self {
        Self { total, reverse }
    }
}

impl RiskAllocator for FibonacciRisk {
    fn total_risk(&self) -> Decimal {
        self.total
    }

    fn per_target_risks(&self, signal: &Signal) -> Vec<Decimal> {
        let n = signal.targets.len();
        if n == 0 {
            return Vec::new();
        }

        let fibs = fibonacci(n);
        let fib_sum = Decimal::from(fibs.iter().sum::<u64>());
        let mut weights: Vec<Decimal> = fibs
            .iter()
            .map(|&f| (self.total * Decimal::from(f) / fib_sum).round_dp(RISK_DP))
            .collect();

        if self.reverse {
            weights.reverse();
        }

        let residual = self.total - weights.iter().copied().sum::<Decimal>();
        if let Some(last) = weights.last_mut() {
            *last += residual;
        }
        weights
    }
}

/// First `n` Fibonacci numbers starting `1, 1, 2, 3, 5, …`.
fn fibonacci(n: usize) -> Vec<u64> {
    let mut seq = Vec::with_capacity(n);
    let (mut a, mut b) = (1u64, 1u64);
    for _ in 0..n {
        seq.push(a);
        (a, b) = (b, a + b);
    }
    seq
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::testutil::signal_with_targets;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fibonacci_sequence() {
        assert_eq!(fibonacci(0), Vec::<u64>::new());
        assert_eq!(fibonacci(1), vec![1]);
        assert_eq!(fibonacci(6), vec![1, 1, 2, 3, 5, 8]);
    }

    #[test]
    fn test_forward_weights() {
        let risks = FibonacciRisk::new(dec!(1.0), false).per_target_risks(&signal_with_targets(5));
        assert_eq!(
            risks,
            vec![dec!(0.083), dec!(0.083), dec!(0.167), dec!(0.25), dec!(0.417)]
        );
    }

    #[test]
    fn test_reversed_weights() {
        let risks = FibonacciRisk::new(dec!(1.0), true).per_target_risks(&signal_with_targets(5));
        assert_eq!(
            risks,
            vec![dec!(0.417), dec!(0.25), dec!(0.167), dec!(0.083), dec!(0.083)]
        );
    }

    #[test]
    fn test_sum_is_exact_after_residual_correction() {
        for n in 1..=8 {
            for reverse in [false, true] {
                let risks =
                    FibonacciRisk::new(dec!(1.0), reverse).per_target_risks(&signal_with_targets(n));
                assert_eq!(risks.len(), n);
                let sum: Decimal = risks.iter().copied().sum();
                assert_eq!(sum, dec!(1.0), "n={n} reverse={reverse}");
            }
        }
    }

    #[test]
    fn test_residual_lands_on_last_element_after_reversal() {
        // n=4: rounded weights 0.143, 0.143, 0.286, 0.429 sum to 1.001,
        // so the residual of -0.001 must come off the final position.
        let forward = FibonacciRisk::new(dec!(1.0), false).per_target_risks(&signal_with_targets(4));
        assert_eq!(
            forward,
            vec![dec!(0.143), dec!(0.143), dec!(0.286), dec!(0.428)]
        );

        let reversed = FibonacciRisk::new(dec!(1.0), true).per_target_risks(&signal_with_targets(4));
        assert_eq!(
            reversed,
            vec![dec!(0.429), dec!(0.286), dec!(0.143), dec!(0.142)]
        );
    }

    #[test]
    fn test_reversal_round_trips_without_residual() {
        // n=5 rounds to an exact sum, so forward and reversed sequences are
        // mirror images of each other.
        let forward = FibonacciRisk::new(dec!(1.0), false).per_target_risks(&signal_with_targets(5));
        let mut reversed =
            FibonacciRisk::new(dec!(1.0), true).per_target_risks(&signal_with_targets(5));
        reversed.reverse();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_no_targets_allocates_nothing() {
        assert!(FibonacciRisk::new(dec!(1.0), true)
            .per_target_risks(&signal_with_targets(0))
            .is_empty());
    }
}
