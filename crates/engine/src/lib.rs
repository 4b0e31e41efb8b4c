//! Orchestration of a full simulation run.
//!
//! [`SimulationEngine`] drives the managers day by day over a built world;
//! [`run`] is the one-call wrapper that loops to the horizon and freezes
//! the outcome into a [`SimulationResult`].

mod engine;
mod error;
mod result;
mod state;

pub use engine::{EngineState, SimulationEngine, TickReport};
pub use error::EngineError;
pub use result::{RunSummary, SimulationResult};
pub use state::SimState;

pub use stocktwin_world::{World, build_world};

/// Run a whole simulation to its horizon.
pub fn run(
    world: World,
    horizon_days: u32,
    seed: u64,
) -> Result<SimulationResult, EngineError> {
    tracing::info!(horizon_days, seed, "simulation run started");
    let mut engine = SimulationEngine::new(world, horizon_days, seed)?;
    while !engine.is_finished() {
        engine.advance_day()?;
    }
    let result = engine.into_result();
    tracing::info!(
        final_day = %result.final_day(),
        moves = result.summary().move_count,
        orders = result.summary().order_count,
        "simulation run completed"
    );
    Ok(result)
}
