//! Core business logic: the shareholder registry and profit allocation

pub mod allocation;
pub mod config;
pub mod log;
pub mod record;
pub mod registry;
pub mod session;

// Re-export main types for cleaner imports
pub use allocation::{Allocation, AllocationOutcome, CalcError, allocate};
pub use record::{ShareholderRecord, ValidationError};
pub use registry::{Ledger, ProfitDeclaration};
pub use session::{SavePolicy, Session, SessionError};
