use thiserror::Error;

use stocktwin_core::{LeadTimeModelId, ProductId, PurchaseOrderId, RouteId, WarehouseId};
use stocktwin_inventory::LedgerError;
use stocktwin_world::DistributionError;

/// Structural faults in the procurement flow. The world builder guarantees
/// none of the lookup variants can fire on a well-formed world; hitting one
/// means the run state is corrupt and the day must fail.
#[derive(Debug, Error)]
pub enum ProcurementError {
    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("no sourcing rule for {product_id} at {warehouse_id}")]
    NoSourcing {
        product_id: ProductId,
        warehouse_id: WarehouseId,
    },

    #[error("route {route_id} is not in the world")]
    UnknownRoute { route_id: RouteId },

    #[error("lead-time model {model_id} is not in the world")]
    UnknownModel { model_id: LeadTimeModelId },

    #[error("warehouse {warehouse_id} has no dock")]
    MissingDock { warehouse_id: WarehouseId },

    #[error("shipment references unknown purchase order {purchase_order_id}")]
    UnknownPurchaseOrder { purchase_order_id: PurchaseOrderId },
}
