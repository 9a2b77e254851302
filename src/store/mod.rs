//! Durable storage for the [`Ledger`] document.
//!
//! Every backend reads and writes the same JSON document:
//!
//! ```json
//! { "shareholders": [ { "name": "Alice", "shares": 30.0 } ], "total_profit": "1000" }
//! ```
//!
//! A missing document loads as an empty ledger. A document that exists but
//! does not parse, or that holds records breaking the registry invariants,
//! is reported as [`PersistenceError::Corrupt`].
pub mod disk;
pub mod memory;

use crate::core::registry::Ledger;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use disk::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access ledger document at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ledger document at {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

/// A place a ledger can be loaded from and saved to.
pub trait LedgerStore {
    /// Reads the stored ledger, or an empty one if nothing was stored yet.
    fn load(&self) -> Result<Ledger, PersistenceError>;

    /// Replaces the stored ledger. On failure the previous document is kept.
    fn save(&self, ledger: &Ledger) -> Result<(), PersistenceError>;
}

pub(crate) fn encode(path: &Path, ledger: &Ledger) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(ledger).map_err(|e| PersistenceError::Io {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub(crate) fn decode(path: &Path, text: &str) -> Result<Ledger, PersistenceError> {
    let corrupt = |reason: String| PersistenceError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    let ledger: Ledger = serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))?;
    ledger.validate().map_err(|e| corrupt(e.to_string()))?;
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_wrong_types() {
        let path = Path::new("ledger.json");
        for text in [
            "not json",
            "42",
            r#"{"shareholders": {}}"#,
            r#"{"shareholders": [{"name": "A", "shares": "30"}]}"#,
            r#"{"shareholders": [], "total_profit": 1000}"#,
        ] {
            assert!(
                matches!(decode(path, text), Err(PersistenceError::Corrupt { .. })),
                "expected Corrupt for {text}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_invariant_violations() {
        let path = Path::new("ledger.json");
        let text = r#"{"shareholders": [{"name": "A", "shares": 0}], "total_profit": ""}"#;
        let err = decode(path, text).unwrap_err();
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn test_decode_accepts_integer_shares() {
        let path = Path::new("ledger.json");
        let text = r#"{"shareholders": [{"name": "A", "shares": 30}], "total_profit": "1000"}"#;
        let ledger = decode(path, text).unwrap();
        assert_eq!(ledger.records()[0].shares, 30.0);
        assert_eq!(ledger.total_profit().as_str(), "1000");
    }

    #[test]
    fn test_encode_writes_non_ascii_names_raw() {
        let mut ledger = Ledger::new();
        ledger.add("محمد", "10").unwrap();
        let text = encode(Path::new("ledger.json"), &ledger).unwrap();
        assert!(text.contains("محمد"));
        assert!(text.contains("  \"shareholders\""));
    }
}
