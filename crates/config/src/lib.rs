//! Simulation settings tree.
//!
//! Deserializable configuration for a whole run: world sizing, warehouse
//! layout, catalog shape, logistics network, demand, replenishment policy and
//! sensor behavior. Every section carries defaults, so an empty document is a
//! valid (and the canonical) configuration. `SimulationSettings::validate`
//! fails fast on the first contradictory setting.

pub mod error;
pub mod settings;

pub use error::ConfigValidationError;
pub use settings::{
    CapacityRange, CatalogSettings, CentRange, CountAndCapacity, DayRange, DeviceProfileSettings,
    GaussianLeadTimeSettings, KmRange, LayoutSettings, LognormalLeadTimeSettings,
    LogisticsSettings, OutboundSettings, RatioRange, ReplenishmentSettings, RunSettings,
    SensorLayoutSettings, SensorSettings, SimulationSettings, SsSettings, UnitRange,
    WorldSettings,
};
