//! Terminal presentation layer over the core session API

pub mod calc;
pub mod ledger;
pub mod setup;
pub mod ui;
