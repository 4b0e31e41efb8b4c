//! Warehouses and their internal locations.

use serde::{Deserialize, Serialize};

use stocktwin_core::{LocationId, WarehouseId};

/// Physical node of the distribution network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub region: String,
    pub tz: String,
}

/// Kind of storage location inside a warehouse.
///
/// The dock is the staging area all receipts and issuances flow through;
/// zones group aisles and aisles are the shelved storage positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Dock,
    Zone,
    Aisle,
}

/// A storage location. Zones parent aisles; docks stand alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub warehouse_id: WarehouseId,
    pub parent: Option<LocationId>,
    pub code: String,
    pub kind: LocationKind,
    pub capacity_units: u32,
}
