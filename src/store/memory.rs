use crate::core::registry::Ledger;
use crate::store::{LedgerStore, PersistenceError, decode, encode};
use std::cell::{Cell, RefCell};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const MEMORY_PATH: &str = "<memory>";

/// In-memory ledger store.
///
/// Keeps the serialized document text, so loads and saves go through the
/// same JSON codec as the file store. Useful for ephemeral sessions and
/// tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<String>>,
    read_only: Cell<bool>,
}

impl MemoryStore {
    /// Creates an empty store, equivalent to a missing document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with raw document text.
    pub fn with_document(text: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(text.into())),
            read_only: Cell::new(false),
        }
    }

    /// Overwrites the stored document text, as another writer would.
    pub fn set_document(&self, text: impl Into<String>) {
        *self.document.borrow_mut() = Some(text.into());
    }

    /// Makes subsequent saves fail with an I/O error.
    #[cfg(test)]
    pub(crate) fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// The raw document text as last saved, if any.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    fn path() -> PathBuf {
        Path::new(MEMORY_PATH).to_path_buf()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Ledger, PersistenceError> {
        match self.document.borrow().as_deref() {
            Some(text) => decode(&Self::path(), text),
            None => {
                debug!("Memory store is empty");
                Ok(Ledger::new())
            }
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<(), PersistenceError> {
        if self.read_only.get() {
            return Err(PersistenceError::Io {
                path: Self::path(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
            });
        }
        let text = encode(&Self::path(), ledger)?;
        *self.document.borrow_mut() = Some(text);
        debug!("Memory store PUT {} shareholder(s)", ledger.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_empty_ledger() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), Ledger::new());
        assert!(store.document().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::new();
        ledger.add("Alice", "30").unwrap();
        ledger.set_total_profit("");

        store.save(&ledger).unwrap();
        assert_eq!(store.load().unwrap(), ledger);
        assert!(store.document().unwrap().contains("\"total_profit\": \"\""));
    }

    #[test]
    fn test_read_only_save_keeps_document() {
        let store = MemoryStore::with_document(r#"{"shareholders": [], "total_profit": "5"}"#);
        store.set_read_only(true);

        let err = store.save(&Ledger::new()).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
        assert_eq!(store.load().unwrap().total_profit().as_str(), "5");
    }

    #[test]
    fn test_corrupt_document() {
        let store = MemoryStore::with_document("{oops");
        assert!(matches!(
            store.load(),
            Err(PersistenceError::Corrupt { .. })
        ));
    }
}
