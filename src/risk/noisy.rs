//! Weight perturbation for spreading otherwise-identical submissions.

use super::{RiskAllocator, RISK_DP};
use crate::signal::Signal;
use rand::rngs::StdRng;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::sync::Mutex;

/// Decorates an allocator with uniform relative noise on each weight.
///
/// Every weight is scaled by `1 + u` with `u` drawn from
/// `[-level, +level]`, then re-rounded to three decimals. The fraction sum
/// is only approximately preserved (within `n * level * total` plus
/// rounding), which is the point: identical signals no longer produce
/// byte-identical broker submissions.
///
/// The random source is injected so tests can seed it.
pub struct NoisyRisk {
    inner: Box<dyn RiskAllocator>,
    level: f64,
    rng: Mutex<StdRng>,
}

impl NoisyRisk {
    pub fn new(inner: Box<dyn RiskAllocator>, level: f64, rng: StdRng) -> Self {
        Self {
            inner,
            level,
            rng: Mutex::new(rng),
        }
    }
}

impl RiskAllocator for NoisyRisk {
    fn total_risk(&self) -> Decimal {
        self.inner.total_risk()
    }

    fn per_target_risks(&self, signal: &Signal) -> Vec<Decimal> {
        let mut rng = self.rng.lock().expect("noise rng lock poisoned");
        self.inner
            .per_target_risks(signal)
            .into_iter()
            .map(|weight| {
                let factor = 1.0 + rng.gen_range(-self.level..=self.level);
                let factor = Decimal::from_f64(factor).unwrap_or(Decimal::ONE);
                (weight * factor).round_dp(RISK_DP)
            })
            .collect()
    }
}
