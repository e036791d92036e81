//! Draft order construction from parsed signals.

mod generator;

pub use generator::OrderGenerator;

use crate::signal::{OrderType, Side};
use rust_decimal::Decimal;
use serde::Serialize;

/// Draft order carrying an equity-risk fraction.
///
/// One draft per target. The risk fraction is turned into a broker lot
/// volume later, against live account and instrument data; until then the
/// order is a pure value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    /// Abstract instrument code, not yet broker-resolved.
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    /// Fraction of account equity at risk on this order.
    pub risk: Decimal,
    /// Entry price for limit orders, `None` for market orders.
    pub price: Option<Decimal>,
    pub sl: Option<Decimal>,
    pub tp: Option<Decimal>,
    /// Trader tag plus the order's position among its siblings, "Lily 2of3".
    pub comment: String,
}
