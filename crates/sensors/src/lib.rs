//! Sensor layer: noisy daily observations of dock stock, the simulated
//! twin's only view of the physical truth the ledger carries.

pub mod observation;
pub mod scan;

pub use observation::{Observation, ObservationLog};
pub use scan::SensorManager;
