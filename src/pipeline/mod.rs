//! End-to-end message handling: parse, allocate, size, execute.

use crate::order::{Order, OrderGenerator};
use crate::signal::SignalParser;
use crate::terminal::{
    magic_from_clock, risk_to_volume, OrderResult, SizedOrder, SymbolResolver, TradingTerminal,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Drives one raw channel message through the whole pipeline.
///
/// Orders of a signal are submitted serially; the terminal owns whatever
/// retry or rate-limit policy applies beyond that.
pub struct SignalPipeline {
    parser: SignalParser,
    generator: OrderGenerator,
    resolver: SymbolResolver,
    terminal: Arc<dyn TradingTerminal>,
}

impl SignalPipeline {
    /// Build the pipeline, seeding the symbol resolver from the terminal's
    /// symbol table.
    pub async fn connect(
        generator: OrderGenerator,
        terminal: Arc<dyn TradingTerminal>,
    ) -> Result<Self> {
        let names = terminal
            .symbol_names()
            .await
            .context("Failed to load broker symbol table")?;
        Ok(Self {
            parser: SignalParser::new(),
            generator,
            resolver: SymbolResolver::new(names),
            terminal,
        })
    }

    /// Handle one raw message. Non-signal text yields an empty outcome
    /// list; a failed order is reported in its outcome without aborting
    /// the signal's remaining orders.
    pub async fn handle_message(&self, text: &str) -> Result<Vec<OrderResult>> {
        let Some(signal) = self.parser.parse(text) else {
            debug!("Message did not parse as a signal");
            return Ok(Vec::new());
        };
        info!(
            symbol = %signal.symbol,
            side = %signal.side,
            order_type = %signal.order_type,
            entry = %signal.entry,
            targets = signal.targets.len(),
            "Parsed signal"
        );

        let orders = self.generator.generate(&signal);
        if orders.is_empty() {
            info!(symbol = %signal.symbol, "Signal produced no orders");
            return Ok(Vec::new());
        }

        let mut outcomes = Vec::with_capacity(orders.len());
        for order in &orders {
            let outcome = match self.submit(order).await {
                Ok(result) => result,
                Err(e) => {
                    error!(symbol = %order.symbol, error = %e, "Order submission failed");
                    OrderResult::rejected(e.to_string())
                }
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    async fn submit(&self, order: &Order) -> Result<OrderResult> {
        let symbol = self.resolver.resolve(&order.symbol)?;
        let metadata = self.terminal.instrument_metadata(&symbol).await?;
        let balance = self.terminal.balance().await?;

        let reference_price = match order.price {
            Some(price) => price,
            None => self.terminal.market_price(&symbol, order.side).await?,
        };

        let volume = risk_to_volume(order.risk, reference_price, order.sl, balance, &metadata)?;
        debug!(%symbol, %volume, risk = %order.risk, "Sized order");

        let sized = SizedOrder {
            symbol,
            side: order.side,
            order_type: order.order_type,
            volume,
            price: order.price,
            sl: order.sl,
            tp: order.tp,
            comment: order.comment.clone(),
            magic: magic_from_clock(),
        };
        self.terminal.execute(&sized).await
    }
}
