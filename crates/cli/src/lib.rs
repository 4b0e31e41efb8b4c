//! Seed-runner binary support: telemetry setup, environment-driven settings
//! and the run loop behind the `stocktwin` executable.

pub mod runner;
pub mod telemetry;

pub use runner::{CONFIG_ENV, DAYS_ENV, SEED_ENV, load_settings, run_to_completion};
