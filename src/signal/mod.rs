//! Signal extraction from free-text channel messages.
//!
//! A [`Signal`] is the structured form of one alert: instrument, side,
//! entry, take-profit targets, optional stop-loss and a trader tag.

mod parser;
mod types;

pub use parser::SignalParser;
pub use types::{OrderType, Side, Signal, Target};
