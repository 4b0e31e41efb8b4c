//! Inbound supply: purchase orders, shipments in transit, the (s, S)
//! replenishment review and the receiving pass.

pub mod error;
pub mod inbound;
pub mod order;
pub mod replenishment;
pub mod shipment;

pub use error::ProcurementError;
pub use inbound::InboundManager;
pub use order::{PoLine, PurchaseBook, PurchaseOrder, PurchaseOrderStatus};
pub use replenishment::ReplenishmentManager;
pub use shipment::{Shipment, ShipmentLine, ShipmentStatus, TransitBoard};
