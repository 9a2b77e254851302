//! Shareholder records and the validation rules every stored record obeys.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single (name, share count) entry in the registry.
///
/// Records have no identity of their own: they are addressed by their
/// position in the registry, and that position shifts when an earlier
/// record is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareholderRecord {
    pub name: String,
    pub shares: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("index {index} is out of range for a registry of {len} record(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ShareholderRecord {
    /// Builds a record from raw user input.
    ///
    /// The name is trimmed and must not be empty. The share text must parse
    /// as a finite number greater than zero.
    pub fn parse(name: &str, shares_text: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidInput(
                "shareholder name must not be empty".to_string(),
            ));
        }

        let shares = parse_shares(shares_text)?;
        Ok(Self {
            name: name.to_string(),
            shares,
        })
    }

    /// Checks the registry invariants on an already-built record, e.g. one
    /// read back from disk.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidInput(
                "shareholder name must not be empty".to_string(),
            ));
        }
        if !self.shares.is_finite() || self.shares <= 0.0 {
            return Err(ValidationError::InvalidInput(format!(
                "share count for '{}' must be a positive number, got {}",
                self.name, self.shares
            )));
        }
        Ok(())
    }
}

fn parse_shares(shares_text: &str) -> Result<f64, ValidationError> {
    let trimmed = shares_text.trim();
    let shares: f64 = trimmed.parse().map_err(|_| {
        ValidationError::InvalidInput(format!("'{trimmed}' is not a valid share count"))
    })?;

    if !shares.is_finite() || shares <= 0.0 {
        return Err(ValidationError::InvalidInput(format!(
            "share count must be a positive number, got '{trimmed}'"
        )));
    }
    Ok(shares)
}
