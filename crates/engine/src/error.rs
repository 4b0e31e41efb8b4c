use thiserror::Error;

use stocktwin_core::SimDay;
use stocktwin_inventory::LedgerError;
use stocktwin_purchasing::ProcurementError;
use stocktwin_world::DistributionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Procurement(#[from] ProcurementError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    /// The engine errored on an earlier day and refuses to advance. All
    /// state committed before the failure is preserved.
    #[error("engine halted on day {day}: {reason}")]
    Halted { day: SimDay, reason: String },

    #[error("run already completed on day {final_day}")]
    AlreadyCompleted { final_day: SimDay },
}
