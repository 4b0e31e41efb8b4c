//! World construction orchestrator.
//!
//! Builds in dependency order: infrastructure, then catalog (suppliers need
//! warehouse gateways), then the logistics mesh, then the materialized
//! control parameters. All randomness comes from one stream seeded with
//! `simulation.seed`, so identical settings build identical worlds.

mod catalog;
mod infrastructure;
mod logistics;

use std::collections::HashMap;

use rand::Rng;

use stocktwin_config::SimulationSettings;
use stocktwin_core::{ProductId, SimRng, WarehouseId};

use crate::error::WorldBuildError;
use crate::policy::{DemandPlan, OpeningStock, SourcingRule, SsPolicy};
use crate::world::World;

use self::catalog::CatalogOutput;
use self::infrastructure::InfrastructureOutput;
use self::logistics::LogisticsOutput;

/// Build the static world from validated settings.
///
/// Fails on contradictory settings or unusable distribution parameters, both
/// before any simulated day. No side effects beyond the returned graph.
pub fn build_world(settings: &SimulationSettings) -> Result<World, WorldBuildError> {
    settings.validate()?;

    let mut rng = SimRng::seed_from_u64(settings.simulation.seed);
    tracing::info!(seed = settings.simulation.seed, "world build started");

    let infra = infrastructure::build(settings, &mut rng);
    tracing::info!(
        warehouses = infra.warehouses.len(),
        locations = infra.locations.len(),
        devices = infra.devices.len(),
        "infrastructure built"
    );

    let catalog = catalog::build(settings, &infra.warehouses, &mut rng);
    tracing::info!(
        products = catalog.products.len(),
        suppliers = catalog.suppliers.len(),
        "catalog built"
    );

    let logistics = logistics::build(settings, &infra.warehouses, &mut rng)?;
    tracing::info!(
        routes = logistics.routes.len(),
        models = logistics.models.len(),
        "logistics network built"
    );

    let sourcing = assign_sourcing(&catalog, &infra, &logistics, &mut rng);
    let policies = materialize_policies(settings, &catalog, &infra);
    let demand = plan_demand(settings, &catalog);
    let opening_stock = plan_opening_stock(settings, &catalog, &infra, &mut rng);

    let route_index = logistics
        .routes
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id, i))
        .collect();
    let model_index = logistics
        .models
        .iter()
        .enumerate()
        .map(|(i, m)| (m.id, i))
        .collect();
    let supplier_index = catalog
        .suppliers
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    tracing::info!("world build completed");

    Ok(World {
        seed: settings.simulation.seed,
        warehouses: infra.warehouses,
        locations: infra.locations,
        products: catalog.products,
        suppliers: catalog.suppliers,
        leadtime_models: logistics.models,
        routes: logistics.routes,
        devices: infra.devices,
        docks: infra.docks,
        policies,
        sourcing,
        route_index,
        model_index,
        supplier_index,
        demand,
        opening_stock,
    })
}

/// Pick a carrier per (product, warehouse) and resolve its gateway lane.
fn assign_sourcing(
    catalog: &CatalogOutput,
    infra: &InfrastructureOutput,
    logistics: &LogisticsOutput,
    rng: &mut SimRng,
) -> HashMap<(ProductId, WarehouseId), SourcingRule> {
    let mut sourcing = HashMap::new();

    for product in &catalog.products {
        let carriers: Vec<_> = catalog
            .suppliers
            .iter()
            .filter(|s| s.carries(product.id))
            .collect();
        if carriers.is_empty() {
            tracing::warn!(product = %product.sku, "product has no carrier, skipping sourcing");
            continue;
        }

        for warehouse in &infra.warehouses {
            let supplier = carriers[rng.gen_range(0..carriers.len())];
            let Some(&route_id) = logistics.lane_index.get(&(supplier.gateway, warehouse.id))
            else {
                tracing::warn!(
                    supplier = %supplier.name,
                    warehouse = %warehouse.name,
                    "no lane from gateway, skipping sourcing"
                );
                continue;
            };
            sourcing.insert(
                (product.id, warehouse.id),
                SourcingRule {
                    supplier_id: supplier.id,
                    route_id,
                },
            );
        }
    }

    sourcing
}

/// (s, S) parameters per (product, dock): category override or the default.
fn materialize_policies(
    settings: &SimulationSettings,
    catalog: &CatalogOutput,
    infra: &InfrastructureOutput,
) -> HashMap<(ProductId, stocktwin_core::LocationId), SsPolicy> {
    let mut policies = HashMap::new();

    for product in &catalog.products {
        let params = settings
            .replenishment
            .policy_by_category
            .get(&product.category)
            .copied()
            .unwrap_or(settings.replenishment.policy);

        for warehouse in &infra.warehouses {
            let Some(&dock) = infra.docks.get(&warehouse.id) else {
                continue;
            };
            policies.insert(
                (product.id, dock),
                SsPolicy {
                    reorder_point: params.reorder_point,
                    target_level: params.target_level,
                },
            );
        }
    }

    policies
}

fn plan_demand(settings: &SimulationSettings, catalog: &CatalogOutput) -> DemandPlan {
    let mut mean_by_product = HashMap::new();
    for product in &catalog.products {
        if let Some(mean) = settings.outbound.mean_by_category.get(&product.category) {
            mean_by_product.insert(product.id, *mean);
        }
    }

    DemandPlan::new(
        settings.outbound.customers.clone(),
        settings.outbound.poisson_mean,
        settings.outbound.missed_sale_penalty_cents,
        mean_by_product,
    )
}

/// Sample opening units per (product, dock). A 0..=0 range plans nothing and
/// the network starts empty, primed by replenishment.
fn plan_opening_stock(
    settings: &SimulationSettings,
    catalog: &CatalogOutput,
    infra: &InfrastructureOutput,
    rng: &mut SimRng,
) -> Vec<OpeningStock> {
    let range = settings.world.initial_stock;
    if range.max_units <= 0 {
        return Vec::new();
    }

    let mut plan = Vec::new();
    for product in &catalog.products {
        for warehouse in &infra.warehouses {
            let Some(&dock) = infra.docks.get(&warehouse.id) else {
                continue;
            };
            let units = rng.gen_range(range.min_units..=range.max_units);
            if units > 0 {
                plan.push(OpeningStock {
                    product_id: product.id,
                    location_id: dock,
                    units,
                });
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logistics::{ServiceTier, TransportMode};
    use crate::warehouse::LocationKind;
    use stocktwin_config::{KmRange, SsSettings, UnitRange};

    fn small_settings() -> SimulationSettings {
        let mut settings = SimulationSettings::default();
        settings.world.warehouse_count = 3;
        settings.world.product_count = 12;
        settings.world.supplier_count = 4;
        settings
    }

    #[test]
    fn default_world_matches_settings() {
        let settings = small_settings();
        let world = build_world(&settings).unwrap();

        assert_eq!(world.warehouses().len(), 3);
        assert_eq!(world.products().len(), 12);
        assert_eq!(world.suppliers().len(), 4);
        assert_eq!(world.leadtime_models().len(), 3);
        // Full mesh plus one local lane per warehouse.
        assert_eq!(world.routes().len(), 3 * 2 + 3);

        for warehouse in world.warehouses() {
            let dock = world.dock_of(warehouse.id).unwrap();
            let location = world
                .locations()
                .iter()
                .find(|l| l.id == dock)
                .unwrap();
            assert_eq!(location.kind, LocationKind::Dock);
        }
    }

    #[test]
    fn world_build_is_deterministic() {
        let settings = small_settings();
        let a = build_world(&settings).unwrap();
        let b = build_world(&settings).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_build_different_worlds() {
        let mut settings = small_settings();
        let a = build_world(&settings).unwrap();
        settings.simulation.seed = 43;
        let b = build_world(&settings).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn distance_tiers_select_modes() {
        for (km, mode, tier) in [
            (100, TransportMode::Truck, ServiceTier::Standard),
            (2000, TransportMode::Air, ServiceTier::Express),
            (6000, TransportMode::Sea, ServiceTier::Ocean),
        ] {
            let mut settings = small_settings();
            settings.logistics.distance = KmRange {
                min_km: km,
                max_km: km,
            };
            let world = build_world(&settings).unwrap();

            for route in world.routes().iter().filter(|r| r.origin != r.destination) {
                assert_eq!(route.mode, mode);
                let model = world.leadtime_model(route.leadtime_model_id).unwrap();
                assert_eq!(model.tier, tier);
            }
        }
    }

    #[test]
    fn local_lanes_are_standard_truck() {
        let world = build_world(&small_settings()).unwrap();
        let lanes: Vec<_> = world
            .routes()
            .iter()
            .filter(|r| r.origin == r.destination)
            .collect();
        assert_eq!(lanes.len(), 3);
        for lane in lanes {
            assert_eq!(lane.mode, TransportMode::Truck);
            let model = world.leadtime_model(lane.leadtime_model_id).unwrap();
            assert_eq!(model.tier, ServiceTier::Standard);
        }
    }

    #[test]
    fn every_pair_has_policy_and_sourcing() {
        let world = build_world(&small_settings()).unwrap();

        for product in world.products() {
            for warehouse in world.warehouses() {
                let dock = world.dock_of(warehouse.id).unwrap();
                assert!(world.policy(product.id, dock).is_some());

                let rule = world.sourcing(product.id, warehouse.id).unwrap();
                let supplier = world.supplier(rule.supplier_id).unwrap();
                assert!(supplier.carries(product.id));

                let route = world.route(rule.route_id).unwrap();
                assert_eq!(route.origin, supplier.gateway);
                assert_eq!(route.destination, warehouse.id);
            }
        }
    }

    #[test]
    fn single_warehouse_world_sources_over_self_lane() {
        let mut settings = small_settings();
        settings.world.warehouse_count = 1;
        let world = build_world(&settings).unwrap();

        assert_eq!(world.routes().len(), 1);
        let warehouse = &world.warehouses()[0];
        for product in world.products() {
            let rule = world.sourcing(product.id, warehouse.id).unwrap();
            let route = world.route(rule.route_id).unwrap();
            assert_eq!(route.origin, route.destination);
        }
    }

    #[test]
    fn category_policy_override_applies() {
        let mut settings = small_settings();
        settings.catalog.categories = vec!["Food".to_string()];
        settings.replenishment.policy_by_category.insert(
            "Food".to_string(),
            SsSettings {
                reorder_point: 5,
                target_level: 20,
            },
        );
        let world = build_world(&settings).unwrap();

        let warehouse = &world.warehouses()[0];
        let dock = world.dock_of(warehouse.id).unwrap();
        for product in world.products() {
            let policy = world.policy(product.id, dock).unwrap();
            assert_eq!(policy.reorder_point, 5);
            assert_eq!(policy.target_level, 20);
        }
    }

    #[test]
    fn opening_stock_covers_every_dock_pair() {
        let mut settings = small_settings();
        settings.world.initial_stock = UnitRange {
            min_units: 5,
            max_units: 10,
        };
        let world = build_world(&settings).unwrap();

        assert_eq!(world.opening_stock().len(), 12 * 3);
        for stock in world.opening_stock() {
            assert!((5..=10).contains(&stock.units));
        }
    }

    #[test]
    fn attached_devices_inherit_global_rates_without_profiles() {
        let mut settings = small_settings();
        settings.layout.sensor.attach_probability = 1.0;
        settings.sensors.noise_sigma = 0.0;
        settings.sensors.missing_rate = 0.0;
        let world = build_world(&settings).unwrap();

        assert!(!world.devices().is_empty());
        for device in world.devices() {
            assert_eq!(device.noise_sigma, 0.0);
            assert_eq!(device.missing_rate, 0.0);
            assert_eq!(device.bias, 0.0);
        }
    }

    #[test]
    fn invalid_stddev_fails_the_build() {
        let mut settings = small_settings();
        settings.logistics.express.stddev_days = -1.0;
        let err = build_world(&settings).unwrap_err();
        assert!(matches!(err, WorldBuildError::Distribution(_)));
    }

    #[test]
    fn contradictory_settings_fail_the_build() {
        let mut settings = small_settings();
        settings.world.warehouse_count = 0;
        let err = build_world(&settings).unwrap_err();
        assert!(matches!(err, WorldBuildError::Config(_)));
    }
}
