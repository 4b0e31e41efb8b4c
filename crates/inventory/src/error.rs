use thiserror::Error;

use stocktwin_core::{LocationId, ProductId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The move would drive on-hand below zero. Recoverable: callers treat
    /// the quantity as unfulfillable and record the shortfall as data.
    #[error("move of {delta} would drive {product_id} at {location_id} to {would_be} units")]
    NegativeBalance {
        product_id: ProductId,
        location_id: LocationId,
        delta: i64,
        would_be: i64,
    },

    /// Replaying the move log disagrees with the cached balance. Fatal:
    /// the ledger can no longer be trusted and the run must halt.
    #[error("replay for {product_id} at {location_id} gives {replayed}, cache holds {cached}")]
    ConsistencyMismatch {
        product_id: ProductId,
        location_id: LocationId,
        replayed: i64,
        cached: i64,
    },

    #[error("ledger lock poisoned")]
    Poisoned,
}
