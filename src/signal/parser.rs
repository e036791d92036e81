//! Free-text signal extraction.
//!
//! Channel messages arrive in loosely consistent formats: varying emoji
//! decorations, optional fields, entry prices written as ranges. The parser
//! is forgiving: anything that does not look like a tradeable instruction
//! yields `None` rather than an error, so the message stream keeps flowing
//! regardless of how much noise the channel produces.

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use super::{OrderType, Side, Signal, Target};

/// Header shape: instrument code, dash, side, optional order-type keyword.
/// "XAUUSD - SELL NOW" carries no keyword and falls back to a market order.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Z]{3,6})\s*-\s*(BUY|SELL)\s*(LIMIT|MARKET)?").expect("header pattern")
});

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("number pattern"));

/// A line that is one numeric token and nothing else.
static PURE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("pure number pattern"));

const TRADER_MARKER: &str = "Trader:";

/// Extracts [`Signal`]s from raw channel messages.
#[derive(Debug, Default)]
pub struct SignalParser;

impl SignalParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one message. Returns `None` for anything that is not a
    /// tradeable signal; most channel traffic is expected to fall through.
    pub fn parse(&self, text: &str) -> Option<Signal> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let header = HEADER.captures(lines.first()?)?;
        let symbol = header.get(1)?.as_str().to_uppercase();
        let side = match header.get(2)?.as_str().to_ascii_lowercase().as_str() {
            "buy" => Side::Buy,
            _ => Side::Sell,
        };
        let order_type = match header.get(3) {
            Some(kind) if kind.as_str().eq_ignore_ascii_case("limit") => OrderType::Limit,
            _ => OrderType::Market,
        };

        // A ranged entry like "3322/3319" or "3275-3280" uses the first price.
        let entry = first_number(find_line(&lines, "entry")?)?;

        let stop_loss = find_line(&lines, "stoploss").and_then(first_number);

        let targets = collect_targets(&lines)?;

        Some(Signal {
            symbol,
            side,
            order_type,
            entry,
            targets,
            stop_loss,
            comment: trader_comment(&lines),
            raw_source: text.to_string(),
        })
    }
}

/// First line containing `keyword`, case-insensitively.
fn find_line<'a>(lines: &[&'a str], keyword: &str) -> Option<&'a str> {
    lines
        .iter()
        .copied()
        .find(|line| line.to_lowercase().contains(keyword))
}

fn first_number(line: &str) -> Option<Decimal> {
    NUMBER.find(line).and_then(|m| m.as_str().parse().ok())
}

/// Lines immediately following the "Targets" header that are exactly one
/// numeric token, stopping at the first line that is anything else. A header
/// with no numeric lines underneath is an empty (still valid) target list.
fn collect_targets(lines: &[&str]) -> Option<Vec<Target>> {
    let header_idx = lines
        .iter()
        .position(|line| line.to_lowercase().contains("target"))?;

    let mut targets = Vec::new();
    for line in &lines[header_idx + 1..] {
        if !PURE_NUMBER.is_match(line) {
            break;
        }
        targets.push(Target {
            price: line.parse().ok()?,
        });
    }
    Some(targets)
}

/// Trader tag from the last "Trader:" line, reduced to ASCII alphanumerics
/// and spaces so emoji framing never leaks into broker comments.
fn trader_comment(lines: &[&str]) -> String {
    let Some(line) = lines.iter().rev().find(|line| line.contains(TRADER_MARKER)) else {
        return String::new();
    };
    let Some((_, rest)) = line.split_once(TRADER_MARKER) else {
        return String::new();
    };
    rest.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}
