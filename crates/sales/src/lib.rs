//! Outbound demand: order records and the manager that generates and
//! fulfills them against the inventory ledger.

pub mod order;
pub mod outbound;

pub use order::{Order, OrderBook, OrderLine, OrderStatus};
pub use outbound::OutboundManager;
