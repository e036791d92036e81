//! In-memory terminal for paper trading and tests.

use super::{InstrumentMetadata, OrderResult, SizedOrder, TradingTerminal};
use crate::signal::Side;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::info;

/// Brokers cap order comments; the paper terminal mirrors that.
const COMMENT_LIMIT: usize = 30;

/// One simulated instrument: metadata plus a static two-sided quote.
#[derive(Debug, Clone)]
struct PaperInstrument {
    metadata: InstrumentMetadata,
    bid: Decimal,
    ask: Decimal,
}

/// Simulated trading terminal.
///
/// Fills every well-formed order immediately and records it for
/// inspection. Orders with a non-positive volume or an unknown symbol are
/// rejected the way a real terminal would reject them.
pub struct PaperTerminal {
    balance: Decimal,
    instruments: HashMap<String, PaperInstrument>,
    fills: RwLock<Vec<SizedOrder>>,
    next_ticket: AtomicU64,
}

impl PaperTerminal {
    pub fn new(balance: Decimal) -> Self {
        Self {
            balance,
            instruments: HashMap::new(),
            fills: RwLock::new(Vec::new()),
            next_ticket: AtomicU64::new(1),
        }
    }

    /// Register an instrument with its metadata and a static quote.
    pub fn with_instrument(
        mut self,
        symbol: impl Into<String>,
        metadata: InstrumentMetadata,
        bid: Decimal,
        ask: Decimal,
    ) -> Self {
        self.instruments
            .insert(symbol.into(), PaperInstrument { metadata, bid, ask });
        self
    }

    /// Orders filled so far, in submission order.
    pub async fn fills(&self) -> Vec<SizedOrder> {
        self.fills.read().await.clone()
    }
}

#[async_trait]
impl TradingTerminal for PaperTerminal {
    async fn balance(&self) -> Result<Decimal> {
        Ok(self.balance)
    }

    async fn symbol_names(&self) -> Result<Vec<String>> {
        Ok(self.instruments.keys().cloned().collect())
    }

    async fn instrument_metadata(&self, symbol: &str) -> Result<InstrumentMetadata> {
        self.instruments
            .get(symbol)
            .map(|instrument| instrument.metadata)
            .ok_or_else(|| anyhow!("unknown symbol {symbol}"))
    }

    async fn market_price(&self, symbol: &str, side: Side) -> Result<Decimal> {
        let instrument = self
            .instruments
            .get(symbol)
            .ok_or_else(|| anyhow!("no quote for {symbol}"))?;
        Ok(match side {
            Side::Buy => instrument.ask,
            Side::Sell => instrument.bid,
        })
    }

    async fn execute(&self, order: &SizedOrder) -> Result<OrderResult> {
        if order.volume <= Decimal::ZERO {
            return Ok(OrderResult::rejected(format!(
                "volume {} is not positive",
                order.volume
            )));
        }
        if !self.instruments.contains_key(&order.symbol) {
            return Ok(OrderResult::rejected(format!(
                "cannot select {}",
                order.symbol
            )));
        }

        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst);
        let mut fill = order.clone();
        fill.comment = fill.comment.chars().take(COMMENT_LIMIT).collect();
        info!(
            symbol = %fill.symbol,
            side = %fill.side,
            volume = %fill.volume,
            ticket,
            "Paper fill"
        );
        self.fills.write().await.push(fill);
        Ok(OrderResult::filled(ticket))
    }
}
