//! Settings sections and their defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigValidationError;

/// Inclusive unit-count range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRange {
    pub min_units: i64,
    pub max_units: i64,
}

/// Inclusive day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub min_days: u32,
    pub max_days: u32,
}

/// Inclusive money range in smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentRange {
    pub min_cents: i64,
    pub max_cents: i64,
}

/// Inclusive range over a unitless ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioRange {
    pub min: f64,
    pub max: f64,
}

/// Capacity sampling range for a location kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRange {
    pub capacity_min: u32,
    pub capacity_max: u32,
}

/// Count and capacity sampling ranges for repeated locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountAndCapacity {
    pub count_min: u32,
    pub count_max: u32,
    pub capacity_min: u32,
    pub capacity_max: u32,
}

/// Inclusive distance range in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KmRange {
    pub min_km: u32,
    pub max_km: u32,
}

/// Clock, seed and audit cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub horizon_days: u32,
    pub seed: u64,
    /// Replay the ledger against cached balances after every tick. Cheap for
    /// typical world sizes; long-horizon callers may turn it off and rely on
    /// the final audit.
    pub audit_every_tick: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            horizon_days: 365,
            seed: 42,
            audit_every_tick: true,
        }
    }
}

/// World sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub warehouse_count: u32,
    pub product_count: u32,
    pub supplier_count: u32,
    /// Opening stock per (product, dock), posted as day-0 adjustments.
    pub initial_stock: UnitRange,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            warehouse_count: 3,
            product_count: 50,
            supplier_count: 5,
            initial_stock: UnitRange {
                min_units: 0,
                max_units: 0,
            },
        }
    }
}

/// Per-device-kind parameter sampling ranges.
///
/// `noise_*` are absolute sigma units, `missing_*` are probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfileSettings {
    pub weight: f64,
    pub noise_min: f64,
    pub noise_max: f64,
    pub missing_min: f64,
    pub missing_max: f64,
}

/// Sensor attachment during layout construction.
///
/// When a kind profile is absent, attached devices of that kind inherit the
/// global [`SensorSettings`] noise and missing rates unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorLayoutSettings {
    pub attach_probability: f64,
    pub camera: Option<DeviceProfileSettings>,
    pub rfid: Option<DeviceProfileSettings>,
}

impl Default for SensorLayoutSettings {
    fn default() -> Self {
        Self {
            attach_probability: 0.2,
            camera: None,
            rfid: None,
        }
    }
}

/// Physical layout of each warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub dock: CapacityRange,
    pub zone: CountAndCapacity,
    pub aisle: CountAndCapacity,
    pub sensor: SensorLayoutSettings,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            dock: CapacityRange {
                capacity_min: 500,
                capacity_max: 2000,
            },
            zone: CountAndCapacity {
                count_min: 2,
                count_max: 5,
                capacity_min: 200,
                capacity_max: 800,
            },
            aisle: CountAndCapacity {
                count_min: 2,
                count_max: 6,
                capacity_min: 40,
                capacity_max: 160,
            },
            sensor: SensorLayoutSettings::default(),
        }
    }
}

/// Product and supplier generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub categories: Vec<String>,
    pub shelf_life_by_category: BTreeMap<String, DayRange>,
    pub shelf_life_default: DayRange,
    pub unit_cost: CentRange,
    pub supplier_reliability: RatioRange,
    pub supplier_regions: Vec<String>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        let mut shelf_life_by_category = BTreeMap::new();
        shelf_life_by_category.insert(
            "Food".to_string(),
            DayRange {
                min_days: 3,
                max_days: 14,
            },
        );
        Self {
            categories: ["Electronics", "Food", "Pharmacy", "Clothing", "Home"]
                .map(String::from)
                .to_vec(),
            shelf_life_by_category,
            shelf_life_default: DayRange {
                min_days: 180,
                max_days: 720,
            },
            unit_cost: CentRange {
                min_cents: 500,
                max_cents: 50_000,
            },
            supplier_reliability: RatioRange {
                min: 0.7,
                max: 0.99,
            },
            supplier_regions: ["NA-EAST", "EU-WEST", "APAC-SG", "NA-WEST", "EU-CENTRAL"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Gaussian lead-time tier parameters (days).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianLeadTimeSettings {
    pub mean_days: f64,
    pub stddev_days: f64,
    pub p_rare_delay: f64,
    pub rare_delay_add_days: f64,
}

/// Lognormal lead-time tier parameters (log-days).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LognormalLeadTimeSettings {
    pub mu: f64,
    pub sigma: f64,
    pub p_rare_delay: f64,
    pub rare_delay_add_days: f64,
}

/// Transport network construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticsSettings {
    pub express: GaussianLeadTimeSettings,
    pub standard: GaussianLeadTimeSettings,
    pub ocean: LognormalLeadTimeSettings,
    pub distance: KmRange,
    pub truck_max_km: u32,
    pub air_max_km: u32,
    /// Length of each warehouse's own drayage lane, used when a supplier's
    /// gateway is the destination itself.
    pub local_lane_km: u32,
}

impl Default for LogisticsSettings {
    fn default() -> Self {
        Self {
            express: GaussianLeadTimeSettings {
                mean_days: 2.0,
                stddev_days: 0.5,
                p_rare_delay: 0.01,
                rare_delay_add_days: 2.0,
            },
            standard: GaussianLeadTimeSettings {
                mean_days: 5.0,
                stddev_days: 1.5,
                p_rare_delay: 0.02,
                rare_delay_add_days: 3.0,
            },
            ocean: LognormalLeadTimeSettings {
                mu: 2.8,
                sigma: 0.35,
                p_rare_delay: 0.05,
                rare_delay_add_days: 7.0,
            },
            distance: KmRange {
                min_km: 50,
                max_km: 9000,
            },
            truck_max_km: 800,
            air_max_km: 5000,
            local_lane_km: 25,
        }
    }
}

/// Daily demand generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutboundSettings {
    pub customers: Vec<String>,
    /// Default Poisson mean per (warehouse, product) per day.
    pub poisson_mean: f64,
    pub mean_by_category: BTreeMap<String, f64>,
    pub missed_sale_penalty_cents: i64,
}

impl Default for OutboundSettings {
    fn default() -> Self {
        Self {
            customers: [
                "Acme Retail",
                "Globex Stores",
                "Initech Supply",
                "Umbrella Markets",
                "Stark Distribution",
            ]
            .map(String::from)
            .to_vec(),
            poisson_mean: 2.0,
            mean_by_category: BTreeMap::new(),
            missed_sale_penalty_cents: 1000,
        }
    }
}

/// (s, S) policy parameters in units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsSettings {
    pub reorder_point: i64,
    pub target_level: i64,
}

/// Replenishment policy materialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplenishmentSettings {
    pub policy: SsSettings,
    pub policy_by_category: BTreeMap<String, SsSettings>,
}

impl Default for ReplenishmentSettings {
    fn default() -> Self {
        Self {
            policy: SsSettings {
                reorder_point: 10,
                target_level: 50,
            },
            policy_by_category: BTreeMap::new(),
        }
    }
}

/// Global sensor behavior.
///
/// `noise_sigma` is in absolute units of stock; zero noise and zero missing
/// rate make observations equal ground truth exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSettings {
    pub missing_rate: f64,
    pub noise_sigma: f64,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            missing_rate: 0.05,
            noise_sigma: 2.0,
        }
    }
}

/// Root of the settings tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationSettings {
    pub simulation: RunSettings,
    pub world: WorldSettings,
    pub layout: LayoutSettings,
    pub catalog: CatalogSettings,
    pub logistics: LogisticsSettings,
    pub outbound: OutboundSettings,
    pub replenishment: ReplenishmentSettings,
    pub sensors: SensorSettings,
}

impl SimulationSettings {
    /// Validate the whole tree, failing on the first contradictory setting.
    ///
    /// Distribution *parameters* (negative stddev and the like) are not
    /// checked here; those surface as sampling errors when the world is
    /// built, before any simulated day.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.validate_run()?;
        self.validate_world()?;
        self.validate_layout()?;
        self.validate_catalog()?;
        self.validate_logistics()?;
        self.validate_outbound()?;
        self.validate_replenishment()?;
        self.validate_sensors()?;
        Ok(())
    }

    fn validate_run(&self) -> Result<(), ConfigValidationError> {
        if self.simulation.horizon_days == 0 {
            return Err(ConfigValidationError::new(
                "simulation.horizon_days",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    fn validate_world(&self) -> Result<(), ConfigValidationError> {
        if self.world.warehouse_count == 0 {
            return Err(ConfigValidationError::new(
                "world.warehouse_count",
                "must be at least 1",
            ));
        }
        if self.world.product_count == 0 {
            return Err(ConfigValidationError::new(
                "world.product_count",
                "must be at least 1",
            ));
        }
        if self.world.supplier_count == 0 {
            return Err(ConfigValidationError::new(
                "world.supplier_count",
                "must be at least 1",
            ));
        }
        let stock = self.world.initial_stock;
        if stock.min_units < 0 {
            return Err(ConfigValidationError::new(
                "world.initial_stock.min_units",
                "must not be negative",
            ));
        }
        if stock.min_units > stock.max_units {
            return Err(ConfigValidationError::new(
                "world.initial_stock",
                "min_units exceeds max_units",
            ));
        }
        Ok(())
    }

    fn validate_layout(&self) -> Result<(), ConfigValidationError> {
        check_capacity("layout.dock", self.layout.dock)?;
        check_count_capacity("layout.zone", self.layout.zone)?;
        check_count_capacity("layout.aisle", self.layout.aisle)?;
        // Zone codes are single letters.
        if self.layout.zone.count_max > 26 {
            return Err(ConfigValidationError::new(
                "layout.zone.count_max",
                "must not exceed 26",
            ));
        }

        let sensor = &self.layout.sensor;
        check_probability("layout.sensor.attach_probability", sensor.attach_probability)?;
        if let Some(profile) = sensor.camera {
            check_device_profile("layout.sensor.camera", profile)?;
        }
        if let Some(profile) = sensor.rfid {
            check_device_profile("layout.sensor.rfid", profile)?;
        }
        Ok(())
    }

    fn validate_catalog(&self) -> Result<(), ConfigValidationError> {
        if self.catalog.categories.is_empty() {
            return Err(ConfigValidationError::new(
                "catalog.categories",
                "at least one category is required",
            ));
        }
        if self.catalog.supplier_regions.is_empty() {
            return Err(ConfigValidationError::new(
                "catalog.supplier_regions",
                "at least one region is required",
            ));
        }
        check_day_range("catalog.shelf_life_default", self.catalog.shelf_life_default)?;
        for (category, range) in &self.catalog.shelf_life_by_category {
            check_day_range(&format!("catalog.shelf_life_by_category.{category}"), *range)?;
        }
        let cost = self.catalog.unit_cost;
        if cost.min_cents <= 0 {
            return Err(ConfigValidationError::new(
                "catalog.unit_cost.min_cents",
                "must be positive",
            ));
        }
        if cost.min_cents > cost.max_cents {
            return Err(ConfigValidationError::new(
                "catalog.unit_cost",
                "min_cents exceeds max_cents",
            ));
        }
        let rel = self.catalog.supplier_reliability;
        check_probability("catalog.supplier_reliability.min", rel.min)?;
        check_probability("catalog.supplier_reliability.max", rel.max)?;
        if rel.min > rel.max {
            return Err(ConfigValidationError::new(
                "catalog.supplier_reliability",
                "min exceeds max",
            ));
        }
        Ok(())
    }

    fn validate_logistics(&self) -> Result<(), ConfigValidationError> {
        let logistics = &self.logistics;
        if logistics.distance.min_km == 0 {
            return Err(ConfigValidationError::new(
                "logistics.distance.min_km",
                "must be at least 1",
            ));
        }
        if logistics.distance.min_km > logistics.distance.max_km {
            return Err(ConfigValidationError::new(
                "logistics.distance",
                "min_km exceeds max_km",
            ));
        }
        if logistics.truck_max_km >= logistics.air_max_km {
            return Err(ConfigValidationError::new(
                "logistics.truck_max_km",
                "must be below air_max_km",
            ));
        }
        if logistics.local_lane_km == 0 {
            return Err(ConfigValidationError::new(
                "logistics.local_lane_km",
                "must be at least 1",
            ));
        }
        check_rare_delay("logistics.express", logistics.express.p_rare_delay, logistics.express.rare_delay_add_days)?;
        check_rare_delay("logistics.standard", logistics.standard.p_rare_delay, logistics.standard.rare_delay_add_days)?;
        check_rare_delay("logistics.ocean", logistics.ocean.p_rare_delay, logistics.ocean.rare_delay_add_days)?;
        Ok(())
    }

    fn validate_outbound(&self) -> Result<(), ConfigValidationError> {
        if self.outbound.customers.is_empty() {
            return Err(ConfigValidationError::new(
                "outbound.customers",
                "at least one customer is required",
            ));
        }
        if !(self.outbound.poisson_mean > 0.0) {
            return Err(ConfigValidationError::new(
                "outbound.poisson_mean",
                "must be positive",
            ));
        }
        for (category, mean) in &self.outbound.mean_by_category {
            if !(*mean > 0.0) {
                return Err(ConfigValidationError::new(
                    format!("outbound.mean_by_category.{category}"),
                    "must be positive",
                ));
            }
        }
        if self.outbound.missed_sale_penalty_cents < 0 {
            return Err(ConfigValidationError::new(
                "outbound.missed_sale_penalty_cents",
                "must not be negative",
            ));
        }
        Ok(())
    }

    fn validate_replenishment(&self) -> Result<(), ConfigValidationError> {
        check_policy("replenishment.policy", self.replenishment.policy)?;
        for (category, policy) in &self.replenishment.policy_by_category {
            check_policy(&format!("replenishment.policy_by_category.{category}"), *policy)?;
        }
        Ok(())
    }

    fn validate_sensors(&self) -> Result<(), ConfigValidationError> {
        check_probability("sensors.missing_rate", self.sensors.missing_rate)?;
        if self.sensors.noise_sigma < 0.0 {
            return Err(ConfigValidationError::new(
                "sensors.noise_sigma",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

fn check_probability(field: &str, value: f64) -> Result<(), ConfigValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigValidationError::new(
            field,
            "must be between 0 and 1",
        ));
    }
    Ok(())
}

fn check_capacity(field: &str, range: CapacityRange) -> Result<(), ConfigValidationError> {
    if range.capacity_min == 0 {
        return Err(ConfigValidationError::new(
            format!("{field}.capacity_min"),
            "must be at least 1",
        ));
    }
    if range.capacity_min > range.capacity_max {
        return Err(ConfigValidationError::new(
            field,
            "capacity_min exceeds capacity_max",
        ));
    }
    Ok(())
}

fn check_count_capacity(field: &str, range: CountAndCapacity) -> Result<(), ConfigValidationError> {
    if range.count_min == 0 {
        return Err(ConfigValidationError::new(
            format!("{field}.count_min"),
            "must be at least 1",
        ));
    }
    if range.count_min > range.count_max {
        return Err(ConfigValidationError::new(field, "count_min exceeds count_max"));
    }
    check_capacity(
        field,
        CapacityRange {
            capacity_min: range.capacity_min,
            capacity_max: range.capacity_max,
        },
    )
}

fn check_day_range(field: &str, range: DayRange) -> Result<(), ConfigValidationError> {
    if range.min_days == 0 {
        return Err(ConfigValidationError::new(
            format!("{field}.min_days"),
            "must be at least 1",
        ));
    }
    if range.min_days > range.max_days {
        return Err(ConfigValidationError::new(field, "min_days exceeds max_days"));
    }
    Ok(())
}

fn check_device_profile(
    field: &str,
    profile: DeviceProfileSettings,
) -> Result<(), ConfigValidationError> {
    if profile.weight < 0.0 {
        return Err(ConfigValidationError::new(
            format!("{field}.weight"),
            "must not be negative",
        ));
    }
    if profile.noise_min < 0.0 {
        return Err(ConfigValidationError::new(
            format!("{field}.noise_min"),
            "must not be negative",
        ));
    }
    if profile.noise_min > profile.noise_max {
        return Err(ConfigValidationError::new(
            field,
            "noise_min exceeds noise_max",
        ));
    }
    check_probability(&format!("{field}.missing_min"), profile.missing_min)?;
    check_probability(&format!("{field}.missing_max"), profile.missing_max)?;
    if profile.missing_min > profile.missing_max {
        return Err(ConfigValidationError::new(
            field,
            "missing_min exceeds missing_max",
        ));
    }
    Ok(())
}

fn check_rare_delay(field: &str, p: f64, add_days: f64) -> Result<(), ConfigValidationError> {
    check_probability(&format!("{field}.p_rare_delay"), p)?;
    if add_days < 0.0 {
        return Err(ConfigValidationError::new(
            format!("{field}.rare_delay_add_days"),
            "must not be negative",
        ));
    }
    Ok(())
}

fn check_policy(field: &str, policy: SsSettings) -> Result<(), ConfigValidationError> {
    if policy.reorder_point < 0 {
        return Err(ConfigValidationError::new(
            format!("{field}.reorder_point"),
            "must not be negative",
        ));
    }
    if policy.target_level <= policy.reorder_point {
        return Err(ConfigValidationError::new(
            format!("{field}.target_level"),
            "must exceed reorder_point",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = SimulationSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.world.warehouse_count, 3);
        assert_eq!(settings.world.product_count, 50);
        assert_eq!(settings.simulation.horizon_days, 365);
        assert_eq!(settings.simulation.seed, 42);
    }

    #[test]
    fn partial_document_falls_back_to_defaults() {
        let settings: SimulationSettings = serde_json::from_str(
            r#"{
                "world": { "warehouse_count": 1 },
                "sensors": { "missing_rate": 0.0, "noise_sigma": 0.0 }
            }"#,
        )
        .unwrap();
        settings.validate().unwrap();
        assert_eq!(settings.world.warehouse_count, 1);
        assert_eq!(settings.world.product_count, 50);
        assert_eq!(settings.sensors.noise_sigma, 0.0);
        assert_eq!(settings.outbound.poisson_mean, 2.0);
    }

    #[test]
    fn zero_warehouses_is_rejected() {
        let mut settings = SimulationSettings::default();
        settings.world.warehouse_count = 0;
        let err = settings.validate().unwrap_err();
        assert_eq!(err.field, "world.warehouse_count");
    }

    #[test]
    fn missing_rate_above_one_is_rejected() {
        let mut settings = SimulationSettings::default();
        settings.sensors.missing_rate = 1.5;
        let err = settings.validate().unwrap_err();
        assert_eq!(err.field, "sensors.missing_rate");
    }

    #[test]
    fn target_level_must_exceed_reorder_point() {
        let mut settings = SimulationSettings::default();
        settings.replenishment.policy = SsSettings {
            reorder_point: 50,
            target_level: 50,
        };
        let err = settings.validate().unwrap_err();
        assert!(err.field.contains("target_level"));
    }

    #[test]
    fn truck_threshold_must_stay_below_air() {
        let mut settings = SimulationSettings::default();
        settings.logistics.truck_max_km = 6000;
        let err = settings.validate().unwrap_err();
        assert_eq!(err.field, "logistics.truck_max_km");
    }

    #[test]
    fn inverted_initial_stock_range_is_rejected() {
        let mut settings = SimulationSettings::default();
        settings.world.initial_stock = UnitRange {
            min_units: 10,
            max_units: 5,
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.field, "world.initial_stock");
    }

    #[test]
    fn empty_customer_list_is_rejected() {
        let mut settings = SimulationSettings::default();
        settings.outbound.customers.clear();
        let err = settings.validate().unwrap_err();
        assert_eq!(err.field, "outbound.customers");
    }
}
