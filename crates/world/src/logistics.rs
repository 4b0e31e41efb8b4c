//! Transport network: lead-time models and routes.

use rand::distributions::{Bernoulli, Distribution};
use rand_distr::{LogNormal, Normal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stocktwin_core::{LeadTimeModelId, RouteId, SimRng, WarehouseId};

/// Transport mode assigned by lane distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Truck,
    Air,
    Sea,
}

/// Service tier of a lead-time model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTier {
    Express,
    Standard,
    Ocean,
}

/// Shape of the transit-time distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum LeadTimeDistribution {
    Gaussian { mean_days: f64, stddev_days: f64 },
    Lognormal { mu: f64, sigma: f64 },
}

/// Sampling failed because the distribution parameters are unusable.
///
/// Raised while the world is built, never mid-run: models are verified before
/// the first simulated day.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DistributionError {
    #[error("invalid {distribution} parameters: {reason}")]
    InvalidParameters {
        distribution: &'static str,
        reason: String,
    },
}

impl DistributionError {
    pub fn invalid(distribution: &'static str, err: impl core::fmt::Display) -> Self {
        Self::InvalidParameters {
            distribution,
            reason: err.to_string(),
        }
    }
}

/// Stochastic transit-time model for a set of routes.
///
/// Gaussian samples are rounded and clipped to at least one day; Lognormal
/// samples take the ceiling, which is non-negative by construction. A rare
/// delay tail adds a fixed number of days with small probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeModel {
    pub id: LeadTimeModelId,
    pub tier: ServiceTier,
    pub distribution: LeadTimeDistribution,
    pub p_rare_delay: f64,
    pub rare_delay_add_days: f64,
}

impl LeadTimeModel {
    /// Construct the underlying samplers, surfacing bad parameters.
    pub fn verify(&self) -> Result<(), DistributionError> {
        match self.distribution {
            LeadTimeDistribution::Gaussian {
                mean_days,
                stddev_days,
            } => {
                Normal::new(mean_days, stddev_days)
                    .map_err(|e| DistributionError::invalid("gaussian lead-time", e))?;
            }
            LeadTimeDistribution::Lognormal { mu, sigma } => {
                LogNormal::new(mu, sigma)
                    .map_err(|e| DistributionError::invalid("lognormal lead-time", e))?;
            }
        }
        Bernoulli::new(self.p_rare_delay)
            .map_err(|e| DistributionError::invalid("rare-delay gate", e))?;
        Ok(())
    }

    /// Draw a transit time in whole days, always at least one.
    pub fn sample(&self, rng: &mut SimRng) -> Result<u32, DistributionError> {
        let raw = match self.distribution {
            LeadTimeDistribution::Gaussian {
                mean_days,
                stddev_days,
            } => Normal::new(mean_days, stddev_days)
                .map_err(|e| DistributionError::invalid("gaussian lead-time", e))?
                .sample(rng)
                .round(),
            LeadTimeDistribution::Lognormal { mu, sigma } => LogNormal::new(mu, sigma)
                .map_err(|e| DistributionError::invalid("lognormal lead-time", e))?
                .sample(rng)
                .ceil(),
        };

        let mut days = raw.max(1.0);

        if self.p_rare_delay > 0.0 {
            let gate = Bernoulli::new(self.p_rare_delay)
                .map_err(|e| DistributionError::invalid("rare-delay gate", e))?;
            if gate.sample(rng) {
                days += self.rare_delay_add_days.round().max(0.0);
            }
        }

        Ok(days as u32)
    }
}

/// Directed lane between two warehouses.
///
/// Self-lanes (origin == destination) model local drayage from a supplier's
/// gateway into the same site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub origin: WarehouseId,
    pub destination: WarehouseId,
    pub mode: TransportMode,
    pub distance_km: u32,
    pub leadtime_model_id: LeadTimeModelId,
}
