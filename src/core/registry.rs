//! The shareholder registry together with its profit declaration.
//!
//! A [`Ledger`] is the unit that gets persisted: the ordered list of
//! shareholder records plus the raw profit text the user entered. Records are
//! addressed by position. Deleting a record shifts every later record down by
//! one, so an index obtained before a delete must not be reused after it.
use crate::core::record::{ShareholderRecord, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Raw, unparsed total-profit text, kept verbatim (including empty and
/// non-numeric text).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfitDeclaration(String);

impl ProfitDeclaration {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    shareholders: Vec<ShareholderRecord>,
    #[serde(default)]
    total_profit: ProfitDeclaration,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shareholder built from raw input. New records always go last.
    pub fn add(&mut self, name: &str, shares_text: &str) -> Result<(), ValidationError> {
        let record = ShareholderRecord::parse(name, shares_text)?;
        info!(name = %record.name, shares = record.shares, "Adding shareholder");
        self.shareholders.push(record);
        Ok(())
    }

    /// Replaces the record at `index` in place.
    pub fn update(
        &mut self,
        index: usize,
        name: &str,
        shares_text: &str,
    ) -> Result<(), ValidationError> {
        self.check_index(index)?;
        let record = ShareholderRecord::parse(name, shares_text)?;
        info!(index, name = %record.name, shares = record.shares, "Updating shareholder");
        self.shareholders[index] = record;
        Ok(())
    }

    /// Removes and returns the record at `index`.
    pub fn delete(&mut self, index: usize) -> Result<ShareholderRecord, ValidationError> {
        self.check_index(index)?;
        let removed = self.shareholders.remove(index);
        info!(index, name = %removed.name, "Deleted shareholder");
        Ok(removed)
    }

    /// Clears all records and the profit declaration.
    pub fn reset(&mut self) {
        self.shareholders.clear();
        self.total_profit.clear();
        info!("Ledger reset");
    }

    pub fn snapshot(&self) -> Vec<ShareholderRecord> {
        self.shareholders.clone()
    }

    pub fn records(&self) -> &[ShareholderRecord] {
        &self.shareholders
    }

    pub fn set_total_profit(&mut self, text: impl Into<String>) {
        self.total_profit = ProfitDeclaration::new(text);
    }

    pub fn total_profit(&self) -> &ProfitDeclaration {
        &self.total_profit
    }

    pub fn len(&self) -> usize {
        self.shareholders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shareholders.is_empty()
    }

    /// Checks every record against the registry invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.shareholders
            .iter()
            .try_for_each(ShareholderRecord::validate)
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.shareholders.len() {
            return Err(ValidationError::IndexOutOfRange {
                index,
                len: self.shareholders.len(),
            });
        }
        Ok(())
    }
}
