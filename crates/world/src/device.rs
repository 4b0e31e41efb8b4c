//! Sensor devices.

use serde::{Deserialize, Serialize};

use stocktwin_core::{DeviceId, WarehouseId};

/// Kind of observation hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Camera,
    RfidReader,
}

/// Operational state; only active devices produce observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
    Offline,
}

/// A scanner attached to a warehouse.
///
/// `noise_sigma` is the Gaussian sigma in absolute units, `missing_rate` the
/// per-scan dropout probability, `bias` a constant offset added to every
/// reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDevice {
    pub id: DeviceId,
    pub warehouse_id: WarehouseId,
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    pub noise_sigma: f64,
    pub missing_rate: f64,
    pub bias: f64,
}

impl SensorDevice {
    pub fn is_active(&self) -> bool {
        matches!(self.status, DeviceStatus::Active)
    }
}
