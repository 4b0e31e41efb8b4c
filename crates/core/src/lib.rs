//! Simulation foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every layer of the
//! simulator: typed identifiers, the simulated-day counter, and the seedable
//! RNG that makes whole runs reproducible.

pub mod day;
pub mod error;
pub mod id;
pub mod rng;

pub use day::SimDay;
pub use error::{CoreError, CoreResult};
pub use id::{
    DeviceId, LeadTimeModelId, LocationId, ObservationId, OrderId, OrderLineId, PoLineId,
    ProductId, PurchaseOrderId, RouteId, ShipmentId, SupplierId, WarehouseId,
};
pub use rng::SimRng;
