//! Broker symbol-name resolution.
//!
//! Brokers decorate instrument names with account-type prefixes and
//! suffixes ("XAUUSDb", "m.EURUSD"). Signals carry the bare code, so each
//! order needs the broker's actual spelling before submission.

use regex::Regex;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("symbol '{0}' not found in broker symbol list")]
    NotFound(String),
}

/// Maps abstract instrument codes onto the broker's symbol table.
///
/// Lookups are cached for the process lifetime; the table is static per
/// session and entries are never invalidated, so the cache is append-only.
pub struct SymbolResolver {
    known: Vec<String>,
    cache: RwLock<HashMap<String, String>>,
}

impl SymbolResolver {
    /// Build a resolver over the broker's symbol table, typically captured
    /// once at session start.
    pub fn new(known: Vec<String>) -> Self {
        Self {
            known,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a bare code like "XAUUSD" to the broker's spelling.
    ///
    /// Preference order: exact match, then any symbol containing the code,
    /// then a case-insensitive match allowing letter decorations around the
    /// code. Among candidates the shortest (least decorated) name wins.
    pub fn resolve(&self, code: &str) -> Result<String, ResolveError> {
        if let Some(hit) = self.cache.read().expect("symbol cache poisoned").get(code) {
            return Ok(hit.clone());
        }

        let resolved = self.lookup(code)?;
        info!(code, symbol = %resolved, "Resolved broker symbol");
        self.cache
            .write()
            .expect("symbol cache poisoned")
            .insert(code.to_string(), resolved.clone());
        Ok(resolved)
    }

    fn lookup(&self, code: &str) -> Result<String, ResolveError> {
        if self.known.iter().any(|name| name == code) {
            return Ok(code.to_string());
        }

        let mut candidates: Vec<&String> =
            self.known.iter().filter(|name| name.contains(code)).collect();

        if candidates.is_empty() {
            let pattern = Regex::new(&format!("(?i)^[a-z]*{}[a-z]*$", regex::escape(code)))
                .expect("escaped code is a valid pattern");
            candidates = self.known.iter().filter(|name| pattern.is_match(name)).collect();
        }

        candidates
            .into_iter()
            .min_by_key(|name| name.len())
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(code.to_string()))
    }
}
