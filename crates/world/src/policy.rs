//! Materialized control parameters: policies, sourcing, demand, opening stock.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stocktwin_core::{LocationId, ProductId, RouteId, SupplierId};

/// (s, S) policy for one (product, location) pair.
///
/// When the inventory position falls to the reorder point `s` or below, order
/// up to the target level `S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsPolicy {
    pub reorder_point: i64,
    pub target_level: i64,
}

/// Where a (product, warehouse) pair replenishes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcingRule {
    pub supplier_id: SupplierId,
    pub route_id: RouteId,
}

/// Opening stock posted as a day-0 adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningStock {
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub units: i64,
}

/// Demand generation parameters carried by the world.
///
/// Per-product means are materialized from category overrides at build time;
/// products without an override use the default mean.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandPlan {
    pub customers: Vec<String>,
    pub default_mean: f64,
    pub missed_sale_penalty_cents: i64,
    mean_by_product: HashMap<ProductId, f64>,
}

impl DemandPlan {
    pub fn new(
        customers: Vec<String>,
        default_mean: f64,
        missed_sale_penalty_cents: i64,
        mean_by_product: HashMap<ProductId, f64>,
    ) -> Self {
        Self {
            customers,
            default_mean,
            missed_sale_penalty_cents,
            mean_by_product,
        }
    }

    pub fn mean_for(&self, product: ProductId) -> f64 {
        self.mean_by_product
            .get(&product)
            .copied()
            .unwrap_or(self.default_mean)
    }
}
