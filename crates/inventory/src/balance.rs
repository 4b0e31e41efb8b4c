use serde::{Deserialize, Serialize};

use stocktwin_core::{LocationId, ProductId};

/// Lookup key for one product at one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockKey {
    pub product_id: ProductId,
    pub location_id: LocationId,
}

/// Cached projection of the move log for one (product, location) pair.
///
/// Owned by the ledger writer and only ever written together with the move
/// that changes it. `reserved` is carried for committed-but-unshipped demand;
/// the current fulfillment flow issues immediately, so it stays zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryBalance {
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub on_hand: i64,
    pub reserved: i64,
}

impl InventoryBalance {
    pub fn zero(product_id: ProductId, location_id: LocationId) -> Self {
        Self {
            product_id,
            location_id,
            on_hand: 0,
            reserved: 0,
        }
    }

    pub fn key(&self) -> StockKey {
        StockKey {
            product_id: self.product_id,
            location_id: self.location_id,
        }
    }
}
