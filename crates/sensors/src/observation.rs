use serde::{Deserialize, Serialize};

use stocktwin_core::{DeviceId, LocationId, ObservationId, ProductId, SimDay};

/// One sensor reading of one (product, location) pair.
///
/// `observed_qty` is what the device reported, not what is there; a missed
/// scan carries no quantity and zero confidence. `reported_noise_sigma` is
/// recorded so downstream consumers can weigh the reading without the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: ObservationId,
    pub day: SimDay,
    pub device_id: DeviceId,
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub observed_qty: Option<i64>,
    pub is_missing: bool,
    pub confidence: f64,
    pub reported_noise_sigma: f64,
}

/// Every observation of the run, in scan order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationLog {
    observations: Vec<Observation>,
}

impl ObservationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn extend(&mut self, observations: impl IntoIterator<Item = Observation>) {
        self.observations.extend(observations);
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
