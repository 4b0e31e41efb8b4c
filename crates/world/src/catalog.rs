//! Products and suppliers.

use serde::{Deserialize, Serialize};

use stocktwin_core::{ProductId, SupplierId, WarehouseId};

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub shelf_life_days: u32,
    /// Cost in smallest currency unit (cents).
    pub unit_cost_cents: i64,
}

/// External supplier.
///
/// `gateway` is the warehouse the supplier's shipments enter the network
/// through; sourcing routes run from there to the ordering warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub region: String,
    pub reliability: f64,
    pub catalog: Vec<ProductId>,
    pub gateway: WarehouseId,
}

impl Supplier {
    pub fn carries(&self, product: ProductId) -> bool {
        self.catalog.contains(&product)
    }
}
