//! Daily sensor sweep.
//!
//! Runs last in the tick so it observes settled state. A monitored pair is
//! a (product, dock) the ledger has ever tracked, inside a warehouse with
//! at least one active device; each pair gets one reading per day from an
//! rng-picked device.

use std::collections::HashMap;

use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Normal};

use stocktwin_core::{DeviceId, ObservationId, SimDay, SimRng};
use stocktwin_inventory::InventoryLedger;
use stocktwin_world::{DistributionError, World};

use crate::observation::{Observation, ObservationLog};

#[derive(Debug, Clone, Copy)]
struct DeviceSampler {
    missing: Bernoulli,
    noise: Normal<f64>,
}

/// Produces noisy observations of dock stock.
#[derive(Debug)]
pub struct SensorManager {
    samplers: HashMap<DeviceId, DeviceSampler>,
}

impl SensorManager {
    /// Prebuild the per-device samplers, surfacing bad parameters before
    /// the first scan.
    pub fn new(world: &World) -> Result<Self, DistributionError> {
        let mut samplers = HashMap::new();
        for device in world.devices() {
            let missing = Bernoulli::new(device.missing_rate)
                .map_err(|e| DistributionError::invalid("missed-scan gate", e))?;
            let noise = Normal::new(0.0, device.noise_sigma)
                .map_err(|e| DistributionError::invalid("sensor noise", e))?;
            samplers.insert(device.id, DeviceSampler { missing, noise });
        }
        Ok(Self { samplers })
    }

    /// Scan every monitored pair once, in world order.
    ///
    /// A missed scan reports no quantity at zero confidence. A successful
    /// scan reports the true on-hand plus Gaussian noise plus the device
    /// bias, quantized to a non-negative integer. With zero noise, zero
    /// bias and no missed scans, readings equal ground truth exactly.
    pub fn scan(
        &self,
        world: &World,
        ledger: &InventoryLedger,
        log: &mut ObservationLog,
        day: SimDay,
        rng: &mut SimRng,
    ) -> Result<Vec<Observation>, DistributionError> {
        let mut taken = Vec::new();

        for warehouse in world.warehouses() {
            let devices = world.active_devices_of(warehouse.id);
            if devices.is_empty() {
                continue;
            }
            let Some(dock) = world.dock_of(warehouse.id) else {
                continue;
            };

            for product in world.products() {
                if !ledger.is_tracked(product.id, dock) {
                    continue;
                }

                let device = devices[rng.gen_range(0..devices.len())];
                let Some(sampler) = self.samplers.get(&device.id) else {
                    continue;
                };
                let id = ObservationId::new(rng);

                let observation = if sampler.missing.sample(rng) {
                    Observation {
                        id,
                        day,
                        device_id: device.id,
                        product_id: product.id,
                        location_id: dock,
                        observed_qty: None,
                        is_missing: true,
                        confidence: 0.0,
                        reported_noise_sigma: device.noise_sigma,
                    }
                } else {
                    let truth = ledger.on_hand(product.id, dock);
                    let raw = truth as f64 + sampler.noise.sample(rng) + device.bias;
                    Observation {
                        id,
                        day,
                        device_id: device.id,
                        product_id: product.id,
                        location_id: dock,
                        observed_qty: Some(quantize(raw)),
                        is_missing: false,
                        confidence: confidence_for(device.noise_sigma),
                        reported_noise_sigma: device.noise_sigma,
                    }
                };
                taken.push(observation);
            }
        }

        log.extend(taken.iter().copied());
        Ok(taken)
    }
}

/// Readings are unit counts: never negative, never fractional.
fn quantize(raw: f64) -> i64 {
    raw.max(0.0).round() as i64
}

/// Confidence decays with the noise band and floors at 0.1; only a
/// noise-free device earns 1.0.
fn confidence_for(noise_sigma: f64) -> f64 {
    (1.0 / (1.0 + noise_sigma)).clamp(0.1, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocktwin_config::SimulationSettings;
    use stocktwin_inventory::{MoveCommand, MoveReason, MoveSource};
    use stocktwin_world::build_world;

    fn test_world(attach: f64, missing_rate: f64, noise_sigma: f64) -> World {
        let mut settings = SimulationSettings::default();
        settings.world.warehouse_count = 1;
        settings.world.product_count = 4;
        settings.world.supplier_count = 2;
        settings.layout.sensor.attach_probability = attach;
        settings.sensors.missing_rate = missing_rate;
        settings.sensors.noise_sigma = noise_sigma;
        build_world(&settings).unwrap()
    }

    fn stock_dock(world: &World, ledger: &InventoryLedger, base_units: i64) {
        let dock = world.dock_of(world.warehouses()[0].id).unwrap();
        for (i, product) in world.products().iter().enumerate() {
            ledger
                .record_move(MoveCommand {
                    product_id: product.id,
                    location_id: dock,
                    delta: base_units + i as i64 * 7,
                    reason: MoveReason::Receipt,
                    day: SimDay::GENESIS,
                    source: MoveSource::Correction,
                })
                .unwrap();
        }
    }

    #[test]
    fn quantize_floors_at_zero_and_rounds() {
        assert_eq!(quantize(-3.2), 0);
        assert_eq!(quantize(-0.4), 0);
        assert_eq!(quantize(4.4), 4);
        assert_eq!(quantize(4.6), 5);
    }

    #[test]
    fn confidence_decays_with_noise() {
        assert_eq!(confidence_for(0.0), 1.0);
        assert!((confidence_for(2.0) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(confidence_for(100.0), 0.1);
    }

    #[test]
    fn untracked_pairs_are_never_scanned() {
        let world = test_world(1.0, 0.0, 0.0);
        let ledger = InventoryLedger::new();
        let manager = SensorManager::new(&world).unwrap();
        let mut log = ObservationLog::new();
        let mut rng = SimRng::seed_from_u64(13);

        let taken = manager
            .scan(&world, &ledger, &mut log, SimDay::new(1), &mut rng)
            .unwrap();

        assert!(taken.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn degenerate_noise_reports_ground_truth() {
        let world = test_world(1.0, 0.0, 0.0);
        let ledger = InventoryLedger::new();
        stock_dock(&world, &ledger, 5);

        let manager = SensorManager::new(&world).unwrap();
        let mut log = ObservationLog::new();
        let mut rng = SimRng::seed_from_u64(13);
        let taken = manager
            .scan(&world, &ledger, &mut log, SimDay::new(1), &mut rng)
            .unwrap();

        assert_eq!(taken.len(), world.products().len());
        for observation in &taken {
            let truth = ledger.on_hand(observation.product_id, observation.location_id);
            assert_eq!(observation.observed_qty, Some(truth));
            assert!(!observation.is_missing);
            assert_eq!(observation.confidence, 1.0);
            assert_eq!(observation.reported_noise_sigma, 0.0);
        }
    }

    #[test]
    fn certain_misses_carry_no_quantity() {
        let world = test_world(1.0, 1.0, 0.0);
        let ledger = InventoryLedger::new();
        stock_dock(&world, &ledger, 5);

        let manager = SensorManager::new(&world).unwrap();
        let mut log = ObservationLog::new();
        let mut rng = SimRng::seed_from_u64(13);
        let taken = manager
            .scan(&world, &ledger, &mut log, SimDay::new(1), &mut rng)
            .unwrap();

        assert_eq!(taken.len(), world.products().len());
        for observation in &taken {
            assert!(observation.is_missing);
            assert_eq!(observation.observed_qty, None);
            assert_eq!(observation.confidence, 0.0);
        }
    }

    #[test]
    fn sensorless_warehouses_are_skipped() {
        let world = test_world(0.0, 0.0, 0.0);
        assert!(world.devices().is_empty());
        let ledger = InventoryLedger::new();
        stock_dock(&world, &ledger, 5);

        let manager = SensorManager::new(&world).unwrap();
        let mut log = ObservationLog::new();
        let mut rng = SimRng::seed_from_u64(13);
        let taken = manager
            .scan(&world, &ledger, &mut log, SimDay::new(1), &mut rng)
            .unwrap();

        assert!(taken.is_empty());
    }

    #[test]
    fn heavy_noise_never_reads_negative() {
        let world = test_world(1.0, 0.0, 50.0);
        let ledger = InventoryLedger::new();
        stock_dock(&world, &ledger, 1);

        let manager = SensorManager::new(&world).unwrap();
        let mut log = ObservationLog::new();
        let mut rng = SimRng::seed_from_u64(13);

        let mut saw_noise = false;
        for day in 1..=10 {
            let taken = manager
                .scan(&world, &ledger, &mut log, SimDay::new(day), &mut rng)
                .unwrap();
            for observation in &taken {
                let truth = ledger.on_hand(observation.product_id, observation.location_id);
                let reported = observation.observed_qty.unwrap();
                assert!(reported >= 0);
                if reported != truth {
                    saw_noise = true;
                }
            }
        }
        assert!(saw_noise);
    }

    #[test]
    fn same_seed_replays_the_same_sweep() {
        let world = test_world(1.0, 0.2, 3.0);
        let ledger = InventoryLedger::new();
        stock_dock(&world, &ledger, 9);
        let manager = SensorManager::new(&world).unwrap();

        let sweep = |seed: u64| {
            let mut log = ObservationLog::new();
            let mut rng = SimRng::seed_from_u64(seed);
            manager
                .scan(&world, &ledger, &mut log, SimDay::new(1), &mut rng)
                .unwrap()
        };

        assert_eq!(sweep(4), sweep(4));
    }
}
