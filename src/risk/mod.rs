//! Risk-budget allocation across profit targets.
//!
//! A signal with n targets gets its configured total risk split into n
//! fractions, one per target. Strategies differ in how the budget is
//! weighted; all of them keep the fraction sum pinned to the total.

mod equal;
mod fibonacci;
mod noisy;

pub use equal::EqualRisk;
pub use fibonacci::FibonacciRisk;
pub use noisy::NoisyRisk;

use crate::config::{RiskConfig, RiskStrategyKind};
use crate::signal::Signal;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;

/// Fractions are quoted to three decimal places throughout.
pub(crate) const RISK_DP: u32 = 3;

/// Splits a total equity-risk budget across a signal's targets.
pub trait RiskAllocator: Send + Sync {
    /// Total risk budget (fraction of equity) committed to one signal.
    fn total_risk(&self) -> Decimal;

    /// Per-target risk fractions, same length and order as `signal.targets`.
    /// Empty when the signal has no targets.
    fn per_target_risks(&self, signal: &Signal) -> Vec<Decimal>;
}

/// Build the configured allocator, optionally wrapped in weight noise.
pub fn from_config(cfg: &RiskConfig) -> Box<dyn RiskAllocator> {
    let base: Box<dyn RiskAllocator> = match cfg.strategy {
        RiskStrategyKind::Equal => Box::new(EqualRisk::new(cfg.risk_per_trade)),
        RiskStrategyKind::Fibonacci => {
            Box::new(FibonacciRisk::new(cfg.risk_per_trade, cfg.reverse))
        }
    };

    match cfg.noise_level {
        Some(level) if level > 0.0 => {
            let rng = match cfg.noise_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Box::new(NoisyRisk::new(base, level, rng))
        }
        _ => base,
    }
}
