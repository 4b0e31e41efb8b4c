//! Static topology of the simulated network.
//!
//! A [`World`] is everything that exists before the clock starts: warehouses
//! and their internal layout, the product catalog, the supplier network, the
//! transport mesh with its lead-time models, sensor devices, and the
//! materialized control parameters (sourcing rules, (s, S) policies, demand
//! plan, opening stock). Worlds are built once by [`build_world`] and never
//! mutated by the simulation, with the single exception of policy overrides
//! applied before the engine starts.

pub mod build;
pub mod catalog;
pub mod device;
pub mod error;
pub mod logistics;
pub mod policy;
pub mod warehouse;
pub mod world;

pub use build::build_world;
pub use catalog::{Product, Supplier};
pub use device::{DeviceKind, DeviceStatus, SensorDevice};
pub use error::WorldBuildError;
pub use logistics::{
    DistributionError, LeadTimeDistribution, LeadTimeModel, Route, ServiceTier, TransportMode,
};
pub use policy::{DemandPlan, OpeningStock, SourcingRule, SsPolicy};
pub use warehouse::{Location, LocationKind, Warehouse};
pub use world::World;
