//! Warehouses, internal layout and sensor attachment.

use std::collections::HashMap;

use rand::Rng;

use stocktwin_config::{DeviceProfileSettings, SensorLayoutSettings, SensorSettings, SimulationSettings};
use stocktwin_core::{DeviceId, LocationId, SimRng, WarehouseId};

use crate::device::{DeviceKind, DeviceStatus, SensorDevice};
use crate::warehouse::{Location, LocationKind, Warehouse};

const REGIONS: [&str; 5] = ["NA-EAST", "EU-WEST", "APAC-SG", "NA-WEST", "EU-CENTRAL"];
const TIMEZONES: [&str; 5] = ["UTC-5", "UTC+1", "UTC+8", "UTC-8", "UTC+2"];

pub(crate) struct InfrastructureOutput {
    pub warehouses: Vec<Warehouse>,
    pub locations: Vec<Location>,
    pub devices: Vec<SensorDevice>,
    pub docks: HashMap<WarehouseId, LocationId>,
}

/// Build warehouses cycling the known regions, each with one dock, lettered
/// zones, per-zone aisles, and probabilistically attached sensors.
pub(crate) fn build(settings: &SimulationSettings, rng: &mut SimRng) -> InfrastructureOutput {
    let mut out = InfrastructureOutput {
        warehouses: Vec::new(),
        locations: Vec::new(),
        devices: Vec::new(),
        docks: HashMap::new(),
    };

    for i in 0..settings.world.warehouse_count {
        let idx = (i as usize) % REGIONS.len();
        let warehouse = Warehouse {
            id: WarehouseId::new(rng),
            name: format!("WH-{}-{:02}", REGIONS[idx], i + 1),
            region: REGIONS[idx].to_string(),
            tz: TIMEZONES[idx].to_string(),
        };

        build_dock(settings, &warehouse, rng, &mut out);
        build_zones(settings, &warehouse, rng, &mut out);
        out.warehouses.push(warehouse);
    }

    out
}

fn build_dock(
    settings: &SimulationSettings,
    warehouse: &Warehouse,
    rng: &mut SimRng,
    out: &mut InfrastructureOutput,
) {
    let dock = Location {
        id: LocationId::new(rng),
        warehouse_id: warehouse.id,
        parent: None,
        code: format!("{}-DOCK", warehouse.name),
        kind: LocationKind::Dock,
        capacity_units: rng
            .gen_range(settings.layout.dock.capacity_min..=settings.layout.dock.capacity_max),
    };
    out.docks.insert(warehouse.id, dock.id);
    out.locations.push(dock);
}

fn build_zones(
    settings: &SimulationSettings,
    warehouse: &Warehouse,
    rng: &mut SimRng,
    out: &mut InfrastructureOutput,
) {
    let zone_count =
        rng.gen_range(settings.layout.zone.count_min..=settings.layout.zone.count_max);

    for z in 0..zone_count {
        // Zone codes are lettered A..Z; config validation caps the count.
        let letter = char::from(b'A' + z as u8);
        let zone_code = format!("ZONE-{letter}");
        let zone = Location {
            id: LocationId::new(rng),
            warehouse_id: warehouse.id,
            parent: None,
            code: format!("{}-{}", warehouse.name, zone_code),
            kind: LocationKind::Zone,
            capacity_units: rng
                .gen_range(settings.layout.zone.capacity_min..=settings.layout.zone.capacity_max),
        };
        let zone_id = zone.id;
        out.locations.push(zone);

        build_aisles(settings, warehouse, zone_id, &zone_code, rng, out);
    }
}

fn build_aisles(
    settings: &SimulationSettings,
    warehouse: &Warehouse,
    zone_id: LocationId,
    zone_code: &str,
    rng: &mut SimRng,
    out: &mut InfrastructureOutput,
) {
    let aisle_count =
        rng.gen_range(settings.layout.aisle.count_min..=settings.layout.aisle.count_max);

    for n in 1..=aisle_count {
        let aisle = Location {
            id: LocationId::new(rng),
            warehouse_id: warehouse.id,
            parent: Some(zone_id),
            code: format!("{zone_code}-AISLE-{n:02}"),
            kind: LocationKind::Aisle,
            capacity_units: rng
                .gen_range(settings.layout.aisle.capacity_min..=settings.layout.aisle.capacity_max),
        };
        out.locations.push(aisle);

        attach_sensor(settings, warehouse, rng, out);
    }
}

/// One attachment roll per aisle; attached devices belong to the warehouse.
fn attach_sensor(
    settings: &SimulationSettings,
    warehouse: &Warehouse,
    rng: &mut SimRng,
    out: &mut InfrastructureOutput,
) {
    let sensor = &settings.layout.sensor;
    if rng.r#gen::<f64>() >= sensor.attach_probability {
        return;
    }

    let kind = pick_kind(sensor, rng);
    let profile = match kind {
        DeviceKind::Camera => sensor.camera,
        DeviceKind::RfidReader => sensor.rfid,
    };
    let (noise_sigma, missing_rate) = device_params(profile, settings.sensors, rng);

    out.devices.push(SensorDevice {
        id: DeviceId::new(rng),
        warehouse_id: warehouse.id,
        kind,
        status: DeviceStatus::Active,
        noise_sigma,
        missing_rate,
        bias: 0.0,
    });
}

fn pick_kind(sensor: &SensorLayoutSettings, rng: &mut SimRng) -> DeviceKind {
    let camera_weight = sensor.camera.map(|p| p.weight).unwrap_or(1.0);
    let rfid_weight = sensor.rfid.map(|p| p.weight).unwrap_or(1.0);
    let total = camera_weight + rfid_weight;
    if total <= 0.0 {
        return DeviceKind::Camera;
    }
    if rng.r#gen::<f64>() * total < camera_weight {
        DeviceKind::Camera
    } else {
        DeviceKind::RfidReader
    }
}

/// Devices without a kind profile inherit the global rates unchanged, so a
/// zero-noise configuration stays exactly zero-noise.
fn device_params(
    profile: Option<DeviceProfileSettings>,
    global: SensorSettings,
    rng: &mut SimRng,
) -> (f64, f64) {
    match profile {
        Some(p) => (
            rng.gen_range(p.noise_min..=p.noise_max),
            rng.gen_range(p.missing_min..=p.missing_max),
        ),
        None => (global.noise_sigma, global.missing_rate),
    }
}
