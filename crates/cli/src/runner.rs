//! Environment-driven settings loading and the run loop.

use anyhow::Context;

use stocktwin_config::SimulationSettings;
use stocktwin_engine::{SimulationEngine, SimulationResult, build_world};

/// Path to an optional JSON settings file.
pub const CONFIG_ENV: &str = "STOCKTWIN_CONFIG";
/// Overrides `simulation.horizon_days`.
pub const DAYS_ENV: &str = "STOCKTWIN_DAYS";
/// Overrides `simulation.seed`.
pub const SEED_ENV: &str = "STOCKTWIN_SEED";

/// Settings from the environment: an optional JSON file plus scalar
/// overrides. With nothing set this is the built-in default world.
pub fn load_settings() -> anyhow::Result<SimulationSettings> {
    let mut settings = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings file {path}"))?;
            parse_settings(&raw).with_context(|| format!("parsing settings file {path}"))?
        }
        Err(_) => {
            tracing::info!("{CONFIG_ENV} not set, using built-in defaults");
            SimulationSettings::default()
        }
    };
    apply_overrides(
        &mut settings,
        std::env::var(DAYS_ENV).ok().as_deref(),
        std::env::var(SEED_ENV).ok().as_deref(),
    )?;
    Ok(settings)
}

fn parse_settings(raw: &str) -> anyhow::Result<SimulationSettings> {
    Ok(serde_json::from_str(raw)?)
}

fn apply_overrides(
    settings: &mut SimulationSettings,
    days: Option<&str>,
    seed: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(days) = days {
        settings.simulation.horizon_days = days
            .parse()
            .with_context(|| format!("{DAYS_ENV} must be a day count, got {days:?}"))?;
    }
    if let Some(seed) = seed {
        settings.simulation.seed = seed
            .parse()
            .with_context(|| format!("{SEED_ENV} must be an integer, got {seed:?}"))?;
    }
    Ok(())
}

/// Build the world and drive it to the horizon.
pub fn run_to_completion(settings: &SimulationSettings) -> anyhow::Result<SimulationResult> {
    let world = build_world(settings)?;
    let mut engine = SimulationEngine::new(
        world,
        settings.simulation.horizon_days,
        settings.simulation.seed,
    )?
    .with_audit(settings.simulation.audit_every_tick);
    while !engine.is_finished() {
        engine.advance_day()?;
    }
    Ok(engine.into_result())
}
