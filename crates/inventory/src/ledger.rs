//! Append-only move log with a cached balance projection.
//!
//! The log is the source of truth. Every write appends one move and updates
//! the cached balance under the same write lock, so the pair is equivalent
//! to a serializable transaction. `replay` and `verify` exist to prove the
//! cache never drifts from the log.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use stocktwin_core::{LocationId, ProductId, SimDay};

use crate::balance::{InventoryBalance, StockKey};
use crate::error::LedgerError;
use crate::moves::{InventoryMove, MoveCommand, MoveId, MoveReason, MoveSource};

#[derive(Debug, Default)]
struct LedgerInner {
    moves: Vec<InventoryMove>,
    balances: HashMap<StockKey, InventoryBalance>,
    /// Keys in first-touch order, so exports never depend on hash order.
    touched: Vec<StockKey>,
}

/// The shared inventory ledger.
///
/// Interior locking makes the ledger `Sync`; writes serialize, reads may
/// fan out.
#[derive(Debug, Default)]
pub struct InventoryLedger {
    inner: RwLock<LedgerInner>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a move and update its balance atomically.
    ///
    /// Rejects with [`LedgerError::NegativeBalance`] any move that would
    /// drive on-hand below zero, leaving the ledger untouched.
    pub fn record_move(&self, command: MoveCommand) -> Result<InventoryMove, LedgerError> {
        let mut inner = self.inner.write().map_err(|_| LedgerError::Poisoned)?;

        let key = StockKey {
            product_id: command.product_id,
            location_id: command.location_id,
        };
        let current = inner.balances.get(&key).map(|b| b.on_hand).unwrap_or(0);
        let would_be = current + command.delta;
        if would_be < 0 {
            return Err(LedgerError::NegativeBalance {
                product_id: command.product_id,
                location_id: command.location_id,
                delta: command.delta,
                would_be,
            });
        }

        Ok(Self::apply(&mut inner, key, command, would_be))
    }

    /// Append an Adjustment that skips the non-negative check. The explicit
    /// override for corrections and opening stock.
    pub fn record_adjustment_unchecked(
        &self,
        product_id: ProductId,
        location_id: LocationId,
        delta: i64,
        day: SimDay,
        source: MoveSource,
    ) -> Result<InventoryMove, LedgerError> {
        let mut inner = self.inner.write().map_err(|_| LedgerError::Poisoned)?;

        let key = StockKey {
            product_id,
            location_id,
        };
        let current = inner.balances.get(&key).map(|b| b.on_hand).unwrap_or(0);
        let command = MoveCommand {
            product_id,
            location_id,
            delta,
            reason: MoveReason::Adjustment,
            day,
            source,
        };

        Ok(Self::apply(&mut inner, key, command, current + delta))
    }

    fn apply(
        inner: &mut LedgerInner,
        key: StockKey,
        command: MoveCommand,
        would_be: i64,
    ) -> InventoryMove {
        let id = MoveId(inner.moves.len() as u64 + 1);
        let stored = InventoryMove::commit(id, command);
        inner.moves.push(stored);

        match inner.balances.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().on_hand = would_be,
            Entry::Vacant(slot) => {
                let mut balance = InventoryBalance::zero(key.product_id, key.location_id);
                balance.on_hand = would_be;
                slot.insert(balance);
                inner.touched.push(key);
            }
        }

        stored
    }

    // Writers compute before they mutate, so a poisoned guard still holds a
    // consistent log and cache.
    fn read(&self) -> RwLockReadGuard<'_, LedgerInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached balance, zeroed if the pair was never touched. O(1).
    pub fn get_balance(&self, product_id: ProductId, location_id: LocationId) -> InventoryBalance {
        let key = StockKey {
            product_id,
            location_id,
        };
        self.read()
            .balances
            .get(&key)
            .copied()
            .unwrap_or_else(|| InventoryBalance::zero(product_id, location_id))
    }

    pub fn on_hand(&self, product_id: ProductId, location_id: LocationId) -> i64 {
        self.get_balance(product_id, location_id).on_hand
    }

    /// Whether any move has ever touched the pair.
    pub fn is_tracked(&self, product_id: ProductId, location_id: LocationId) -> bool {
        let key = StockKey {
            product_id,
            location_id,
        };
        self.read().balances.contains_key(&key)
    }

    /// Recompute on-hand for one pair from the move log alone.
    pub fn replay(&self, product_id: ProductId, location_id: LocationId) -> i64 {
        self.read()
            .moves
            .iter()
            .filter(|m| m.product_id == product_id && m.location_id == location_id)
            .map(|m| m.delta)
            .sum()
    }

    /// Compare replay against the cache for one pair.
    pub fn verify(&self, product_id: ProductId, location_id: LocationId) -> Result<(), LedgerError> {
        let replayed = self.replay(product_id, location_id);
        let cached = self.on_hand(product_id, location_id);
        if replayed != cached {
            return Err(LedgerError::ConsistencyMismatch {
                product_id,
                location_id,
                replayed,
                cached,
            });
        }
        Ok(())
    }

    /// Compare replay against the cache for every touched pair, in one pass
    /// over the log.
    pub fn verify_all(&self) -> Result<(), LedgerError> {
        let inner = self.read();

        let mut replayed: HashMap<StockKey, i64> = HashMap::new();
        for m in &inner.moves {
            let key = StockKey {
                product_id: m.product_id,
                location_id: m.location_id,
            };
            *replayed.entry(key).or_insert(0) += m.delta;
        }

        for key in &inner.touched {
            let replay = replayed.get(key).copied().unwrap_or(0);
            let cached = inner.balances.get(key).map(|b| b.on_hand).unwrap_or(0);
            if replay != cached {
                return Err(LedgerError::ConsistencyMismatch {
                    product_id: key.product_id,
                    location_id: key.location_id,
                    replayed: replay,
                    cached,
                });
            }
        }
        Ok(())
    }

    /// All committed moves in append order.
    pub fn moves(&self) -> Vec<InventoryMove> {
        self.read().moves.clone()
    }

    /// All touched balances in first-touch order.
    pub fn balances(&self) -> Vec<InventoryBalance> {
        let inner = self.read();
        inner
            .touched
            .iter()
            .filter_map(|key| inner.balances.get(key))
            .copied()
            .collect()
    }

    pub fn move_count(&self) -> usize {
        self.read().moves.len()
    }
}
