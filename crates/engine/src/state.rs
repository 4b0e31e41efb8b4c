use stocktwin_inventory::InventoryLedger;
use stocktwin_purchasing::{PurchaseBook, TransitBoard};
use stocktwin_sales::OrderBook;
use stocktwin_sensors::ObservationLog;

/// The dynamic half of a run: every collection the managers write into.
///
/// The world is the static half; together they are the whole twin.
#[derive(Debug, Default)]
pub struct SimState {
    pub ledger: InventoryLedger,
    pub orders: OrderBook,
    pub purchases: PurchaseBook,
    pub transit: TransitBoard,
    pub observations: ObservationLog,
}

impl SimState {
    pub fn new() -> Self {
        Self::default()
    }
}
