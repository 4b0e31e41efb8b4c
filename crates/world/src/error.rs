//! World construction errors.

use thiserror::Error;

use stocktwin_config::ConfigValidationError;

use crate::logistics::DistributionError;

/// Failure while building the static world.
///
/// Both variants are fatal before the first simulated day.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorldBuildError {
    #[error(transparent)]
    Config(#[from] ConfigValidationError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),
}
