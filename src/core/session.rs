//! Caller-owned controller tying a [`Ledger`] to a [`LedgerStore`].
//!
//! A presentation layer (CLI, web form, REST handler) holds one `Session`,
//! calls its mutators and asks it for allocations. Nothing here is global.
use crate::core::allocation::{self, AllocationOutcome, CalcError};
use crate::core::record::{ShareholderRecord, ValidationError};
use crate::core::registry::{Ledger, ProfitDeclaration};
use crate::store::{LedgerStore, PersistenceError};
use thiserror::Error;
use tracing::{info, warn};

/// When the session writes the ledger back to its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    /// Only on an explicit [`Session::save`].
    #[default]
    Explicit,
    /// After every successful mutation.
    OnMutation,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub struct Session<S: LedgerStore> {
    ledger: Ledger,
    store: S,
    policy: SavePolicy,
}

impl<S: LedgerStore> Session<S> {
    /// Loads the ledger from `store` and starts a session over it.
    pub fn open(store: S, policy: SavePolicy) -> Result<Self, PersistenceError> {
        let ledger = store.load()?;
        info!(
            shareholders = ledger.len(),
            ?policy,
            "Session opened"
        );
        Ok(Self {
            ledger,
            store,
            policy,
        })
    }

    pub fn add(&mut self, name: &str, shares_text: &str) -> Result<(), SessionError> {
        self.ledger.add(name, shares_text)?;
        self.after_mutation()
    }

    pub fn update(
        &mut self,
        index: usize,
        name: &str,
        shares_text: &str,
    ) -> Result<(), SessionError> {
        self.ledger.update(index, name, shares_text)?;
        self.after_mutation()
    }

    pub fn delete(&mut self, index: usize) -> Result<ShareholderRecord, SessionError> {
        let removed = self.ledger.delete(index)?;
        self.after_mutation()?;
        Ok(removed)
    }

    /// Clears the ledger. The in-memory reset always succeeds; only the
    /// follow-up save under [`SavePolicy::OnMutation`] can fail.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.ledger.reset();
        self.after_mutation()
    }

    pub fn set_total_profit(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.ledger.set_total_profit(text);
        self.after_mutation()
    }

    pub fn snapshot(&self) -> Vec<ShareholderRecord> {
        self.ledger.snapshot()
    }

    pub fn total_profit(&self) -> &ProfitDeclaration {
        self.ledger.total_profit()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Allocates `total_profit_text` across the current records.
    pub fn allocate(&self, total_profit_text: &str) -> Result<AllocationOutcome, CalcError> {
        allocation::allocate(self.ledger.records(), total_profit_text)
    }

    /// Allocates the declared profit across the current records.
    pub fn allocate_declared(&self) -> Result<AllocationOutcome, CalcError> {
        self.allocate(self.ledger.total_profit().as_str())
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        self.store.save(&self.ledger)?;
        info!(shareholders = self.ledger.len(), "Ledger saved");
        Ok(())
    }

    /// Re-reads the ledger from the store. On failure the current state is
    /// kept as is.
    pub fn reload(&mut self) -> Result<(), PersistenceError> {
        match self.store.load() {
            Ok(ledger) => {
                self.ledger = ledger;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Reload failed, keeping current ledger");
                Err(e)
            }
        }
    }

    /// The backing store, e.g. to report where the ledger lives.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn after_mutation(&self) -> Result<(), SessionError> {
        if self.policy == SavePolicy::OnMutation {
            self.save()?;
        }
        Ok(())
    }
}
