//! The assembled static world.

use std::collections::HashMap;

use stocktwin_core::{
    LeadTimeModelId, LocationId, ProductId, RouteId, SupplierId, WarehouseId,
};

use crate::catalog::{Product, Supplier};
use crate::device::SensorDevice;
use crate::logistics::{LeadTimeModel, Route};
use crate::policy::{DemandPlan, OpeningStock, SourcingRule, SsPolicy};
use crate::warehouse::{Location, Warehouse};

/// Immutable topology and control parameters for a run.
///
/// Collection order is the canonical iteration order for every manager; no
/// tick-time loop may iterate a hash map, or draw order (and with it ledger
/// reproducibility) is lost.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub(crate) seed: u64,
    pub(crate) warehouses: Vec<Warehouse>,
    pub(crate) locations: Vec<Location>,
    pub(crate) products: Vec<Product>,
    pub(crate) suppliers: Vec<Supplier>,
    pub(crate) leadtime_models: Vec<LeadTimeModel>,
    pub(crate) routes: Vec<Route>,
    pub(crate) devices: Vec<SensorDevice>,
    pub(crate) docks: HashMap<WarehouseId, LocationId>,
    pub(crate) policies: HashMap<(ProductId, LocationId), SsPolicy>,
    pub(crate) sourcing: HashMap<(ProductId, WarehouseId), SourcingRule>,
    pub(crate) route_index: HashMap<RouteId, usize>,
    pub(crate) model_index: HashMap<LeadTimeModelId, usize>,
    pub(crate) supplier_index: HashMap<SupplierId, usize>,
    pub(crate) demand: DemandPlan,
    pub(crate) opening_stock: Vec<OpeningStock>,
}

impl World {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn leadtime_models(&self) -> &[LeadTimeModel] {
        &self.leadtime_models
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn devices(&self) -> &[SensorDevice] {
        &self.devices
    }

    /// The staging dock of a warehouse. Every built warehouse has one.
    pub fn dock_of(&self, warehouse: WarehouseId) -> Option<LocationId> {
        self.docks.get(&warehouse).copied()
    }

    /// Active devices of a warehouse, in build order.
    pub fn active_devices_of(&self, warehouse: WarehouseId) -> Vec<&SensorDevice> {
        self.devices
            .iter()
            .filter(|d| d.warehouse_id == warehouse && d.is_active())
            .collect()
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.route_index.get(&id).map(|&i| &self.routes[i])
    }

    pub fn leadtime_model(&self, id: LeadTimeModelId) -> Option<&LeadTimeModel> {
        self.model_index.get(&id).map(|&i| &self.leadtime_models[i])
    }

    pub fn supplier(&self, id: SupplierId) -> Option<&Supplier> {
        self.supplier_index.get(&id).map(|&i| &self.suppliers[i])
    }

    pub fn policy(&self, product: ProductId, location: LocationId) -> Option<SsPolicy> {
        self.policies.get(&(product, location)).copied()
    }

    /// Override the (s, S) policy for one pair. Intended for scenario setup
    /// before the engine starts; the simulation itself never writes here.
    pub fn set_policy(&mut self, product: ProductId, location: LocationId, policy: SsPolicy) {
        self.policies.insert((product, location), policy);
    }

    pub fn sourcing(&self, product: ProductId, warehouse: WarehouseId) -> Option<SourcingRule> {
        self.sourcing.get(&(product, warehouse)).copied()
    }

    pub fn demand(&self) -> &DemandPlan {
        &self.demand
    }

    pub fn opening_stock(&self) -> &[OpeningStock] {
        &self.opening_stock
    }
}
