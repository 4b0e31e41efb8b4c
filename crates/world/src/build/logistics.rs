//! Lead-time models and the route mesh.

use std::collections::HashMap;

use rand::Rng;

use stocktwin_config::SimulationSettings;
use stocktwin_core::{LeadTimeModelId, RouteId, SimRng, WarehouseId};

use crate::logistics::{
    DistributionError, LeadTimeDistribution, LeadTimeModel, Route, ServiceTier, TransportMode,
};
use crate::warehouse::Warehouse;

pub(crate) struct LogisticsOutput {
    /// Always `[express, standard, ocean]`.
    pub models: Vec<LeadTimeModel>,
    pub routes: Vec<Route>,
    pub lane_index: HashMap<(WarehouseId, WarehouseId), RouteId>,
}

pub(crate) fn build(
    settings: &SimulationSettings,
    warehouses: &[Warehouse],
    rng: &mut SimRng,
) -> Result<LogisticsOutput, DistributionError> {
    let models = build_models(settings, rng)?;
    let (routes, lane_index) = connect_warehouses(settings, warehouses, &models, rng);
    Ok(LogisticsOutput {
        models,
        routes,
        lane_index,
    })
}

/// Three service tiers: Express and Standard are Gaussian, Ocean carries the
/// lognormal long tail. All are verified here so bad parameters fail the
/// build, not a mid-run sample.
fn build_models(
    settings: &SimulationSettings,
    rng: &mut SimRng,
) -> Result<Vec<LeadTimeModel>, DistributionError> {
    let cfg = &settings.logistics;

    let models = vec![
        LeadTimeModel {
            id: LeadTimeModelId::new(rng),
            tier: ServiceTier::Express,
            distribution: LeadTimeDistribution::Gaussian {
                mean_days: cfg.express.mean_days,
                stddev_days: cfg.express.stddev_days,
            },
            p_rare_delay: cfg.express.p_rare_delay,
            rare_delay_add_days: cfg.express.rare_delay_add_days,
        },
        LeadTimeModel {
            id: LeadTimeModelId::new(rng),
            tier: ServiceTier::Standard,
            distribution: LeadTimeDistribution::Gaussian {
                mean_days: cfg.standard.mean_days,
                stddev_days: cfg.standard.stddev_days,
            },
            p_rare_delay: cfg.standard.p_rare_delay,
            rare_delay_add_days: cfg.standard.rare_delay_add_days,
        },
        LeadTimeModel {
            id: LeadTimeModelId::new(rng),
            tier: ServiceTier::Ocean,
            distribution: LeadTimeDistribution::Lognormal {
                mu: cfg.ocean.mu,
                sigma: cfg.ocean.sigma,
            },
            p_rare_delay: cfg.ocean.p_rare_delay,
            rare_delay_add_days: cfg.ocean.rare_delay_add_days,
        },
    ];

    for model in &models {
        model.verify()?;
    }

    Ok(models)
}

/// Full mesh between distinct warehouses with distance-tiered modes, plus one
/// local drayage lane per warehouse so single-site worlds and same-region
/// sourcing always have a lane to sample.
fn connect_warehouses(
    settings: &SimulationSettings,
    warehouses: &[Warehouse],
    models: &[LeadTimeModel],
    rng: &mut SimRng,
) -> (Vec<Route>, HashMap<(WarehouseId, WarehouseId), RouteId>) {
    let cfg = &settings.logistics;
    let express = &models[0];
    let standard = &models[1];
    let ocean = &models[2];

    let mut routes = Vec::new();
    let mut lane_index = HashMap::new();

    for origin in warehouses {
        for destination in warehouses {
            if origin.id == destination.id {
                continue;
            }

            let distance_km = rng.gen_range(cfg.distance.min_km..=cfg.distance.max_km);
            let (mode, model) = if distance_km < cfg.truck_max_km {
                (TransportMode::Truck, standard)
            } else if distance_km < cfg.air_max_km {
                (TransportMode::Air, express)
            } else {
                (TransportMode::Sea, ocean)
            };

            let route = Route {
                id: RouteId::new(rng),
                origin: origin.id,
                destination: destination.id,
                mode,
                distance_km,
                leadtime_model_id: model.id,
            };
            lane_index.insert((origin.id, destination.id), route.id);
            routes.push(route);
        }
    }

    for warehouse in warehouses {
        let route = Route {
            id: RouteId::new(rng),
            origin: warehouse.id,
            destination: warehouse.id,
            mode: TransportMode::Truck,
            distance_km: cfg.local_lane_km,
            leadtime_model_id: standard.id,
        };
        lane_index.insert((warehouse.id, warehouse.id), route.id);
        routes.push(route);
    }

    (routes, lane_index)
}
