//! # Signal Copier
//!
//! Converts free-text trading alerts from a Telegram channel into
//! risk-sized brokerage orders.
//!
//! ## Architecture
//!
//! - `config`: configuration management and validation
//! - `signal`: free-text signal extraction
//! - `risk`: risk-budget allocation across profit targets
//! - `order`: per-target draft order construction
//! - `terminal`: trading-terminal port, symbol resolution, lot sizing
//! - `telegram`: Bot API long-polling gateway
//! - `pipeline`: end-to-end message handling
//! - `utils`: shared decimal arithmetic

pub mod config;
pub mod order;
pub mod pipeline;
pub mod risk;
pub mod signal;
pub mod telegram;
pub mod terminal;
pub mod utils;

pub use config::Config;
