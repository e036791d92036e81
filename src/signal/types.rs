//! Parsed signal types.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// How the entry should be placed at the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "limit"),
            OrderType::Market => write!(f, "market"),
        }
    }
}

/// One take-profit level within a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Target {
    pub price: Decimal,
}

/// Structured trading instruction extracted from a free-text channel message.
///
/// Created once per parsed message and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    /// Abstract instrument code, e.g. "XAUUSD". Broker-specific naming is
    /// resolved later, per order.
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub entry: Decimal,
    /// Take-profit levels in message order. May be empty.
    pub targets: Vec<Target>,
    /// Absent stop-loss is a valid state, not a parse failure.
    pub stop_loss: Option<Decimal>,
    /// Trader tag extracted from the message, empty when none was given.
    pub comment: String,
    /// The original message text, kept for audit logging.
    pub raw_source: String,
}
