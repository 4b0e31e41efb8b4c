//! Append-only inventory ledger.
//!
//! Every stock change in the simulation flows through [`InventoryLedger`]
//! as an [`InventoryMove`]; cached [`InventoryBalance`] rows are a derived
//! projection the ledger keeps paired with the log. Consumers read balances,
//! auditors replay the log.

pub mod balance;
pub mod error;
pub mod ledger;
pub mod moves;

pub use balance::{InventoryBalance, StockKey};
pub use error::LedgerError;
pub use ledger::InventoryLedger;
pub use moves::{InventoryMove, MoveCommand, MoveId, MoveReason, MoveSource};
