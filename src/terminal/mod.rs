//! Trading-terminal boundary.
//!
//! The core never talks to a broker directly: account data, instrument
//! metadata, quotes and order submission all go through the
//! [`TradingTerminal`] port. Symbol resolution and lot sizing live here
//! too, since both are defined by broker data.

mod paper;
mod resolver;
mod sizing;
mod types;

pub use paper::PaperTerminal;
pub use resolver::{ResolveError, SymbolResolver};
pub use sizing::{risk_to_volume, SizingError};
pub use types::{magic_from_clock, InstrumentMetadata, OrderResult, SizedOrder};

use crate::signal::Side;
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Narrow port onto the trading terminal.
///
/// Implementations own session lifecycle, retries and rate limiting; the
/// core queries data on demand and submits one finalized order per call.
#[async_trait]
pub trait TradingTerminal: Send + Sync {
    /// Current account balance in the deposit currency.
    async fn balance(&self) -> Result<Decimal>;

    /// Every symbol the broker knows, used to seed the [`SymbolResolver`].
    async fn symbol_names(&self) -> Result<Vec<String>>;

    async fn instrument_metadata(&self, symbol: &str) -> Result<InstrumentMetadata>;

    /// Live quote on the side the order would hit: ask for buys, bid for
    /// sells.
    async fn market_price(&self, symbol: &str, side: Side) -> Result<Decimal>;

    /// Submit one finalized order.
    async fn execute(&self, order: &SizedOrder) -> Result<OrderResult>;
}
