//! Configuration management for the signal copier.
//!
//! Loads settings from environment variables and config files.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bot credentials and the channel to listen on
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Risk budget and allocation strategy
    #[serde(default)]
    pub risk: RiskConfig,
    /// Paper-terminal parameters
    #[serde(default)]
    pub terminal: TerminalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token for the Bot API
    #[serde(default)]
    pub token: String,
    /// Only messages from this chat are processed
    #[serde(default)]
    pub chat_id: i64,
}

/// Which allocation strategy splits the risk budget across targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStrategyKind {
    Equal,
    Fibonacci,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Total fraction of equity at risk per signal (0.0-1.0)
    #[serde(default = "default_risk_per_trade")]
    pub risk_per_trade: Decimal,
    #[serde(default = "default_strategy")]
    pub strategy: RiskStrategyKind,
    /// Flip the weight sequence so the nearest target carries the most
    #[serde(default = "default_reverse")]
    pub reverse: bool,
    /// Relative weight perturbation (e.g. 0.05 = ±5%); off when absent
    #[serde(default)]
    pub noise_level: Option<f64>,
    /// Seed for the noise source; random when absent
    #[serde(default)]
    pub noise_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Starting balance for the paper terminal
    #[serde(default = "default_paper_balance")]
    pub paper_balance: Decimal,
}

fn default_risk_per_trade() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

fn default_strategy() -> RiskStrategyKind {
    RiskStrategyKind::Fibonacci
}

fn default_reverse() -> bool {
    true
}

fn default_paper_balance() -> Decimal {
    Decimal::new(10_000, 0)
}

impl Config {
    /// Load configuration from environment variables and config files.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::default().separator("__").prefix("COPIER"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.risk.risk_per_trade > Decimal::ZERO && self.risk.risk_per_trade <= Decimal::ONE,
            "risk_per_trade must be between 0 and 1"
        );

        if let Some(level) = self.risk.noise_level {
            anyhow::ensure!(
                (0.0..1.0).contains(&level),
                "noise_level must be in [0, 1)"
            );
        }

        anyhow::ensure!(
            self.terminal.paper_balance > Decimal::ZERO,
            "paper_balance must be positive"
        );

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig::default(),
            risk: RiskConfig::default(),
            terminal: TerminalConfig::default(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_id: 0,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_per_trade: default_risk_per_trade(),
            strategy: default_strategy(),
            reverse: default_reverse(),
            noise_level: None,
            noise_seed: None,
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            paper_balance: default_paper_balance(),
        }
    }
}
