//! Ledger entries. A move is the unit of truth: balances are projections.

use serde::{Deserialize, Serialize};

use stocktwin_core::{LocationId, OrderId, ProductId, ShipmentId, SimDay};

/// Position of a move in the ledger. Assigned by the ledger, starting at 1,
/// strictly increasing in commit order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MoveId(pub u64);

impl std::fmt::Display for MoveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why stock moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveReason {
    /// Goods arrived from a supplier shipment.
    Receipt,
    /// Goods left to serve customer demand.
    Issuance,
    /// Manual or system correction, including opening stock.
    Adjustment,
}

/// The event that caused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum MoveSource {
    Shipment(ShipmentId),
    Order(OrderId),
    OpeningStock,
    Correction,
}

/// A move as submitted to the ledger, before an id is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommand {
    pub product_id: ProductId,
    pub location_id: LocationId,
    /// Signed unit change. Receipts are positive, issuances negative.
    pub delta: i64,
    pub reason: MoveReason,
    pub day: SimDay,
    pub source: MoveSource,
}

/// A committed ledger entry. Append-only; never updated or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryMove {
    pub id: MoveId,
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub delta: i64,
    pub reason: MoveReason,
    pub day: SimDay,
    pub source: MoveSource,
}

impl InventoryMove {
    pub(crate) fn commit(id: MoveId, command: MoveCommand) -> Self {
        Self {
            id,
            product_id: command.product_id,
            location_id: command.location_id,
            delta: command.delta,
            reason: command.reason,
            day: command.day,
            source: command.source,
        }
    }
}
