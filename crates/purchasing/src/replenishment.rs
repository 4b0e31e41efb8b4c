//! (s, S) review and purchase order placement.
//!
//! Runs after outbound so the review sees the day's issuances. The inventory
//! position counts units already in transit, which keeps a pending pipeline
//! from triggering duplicate orders day after day.

use stocktwin_core::{PoLineId, PurchaseOrderId, ShipmentId, SimDay, SimRng};
use stocktwin_inventory::InventoryLedger;
use stocktwin_world::World;

use crate::error::ProcurementError;
use crate::order::{PoLine, PurchaseBook, PurchaseOrder, PurchaseOrderStatus};
use crate::shipment::{Shipment, ShipmentLine, ShipmentStatus, TransitBoard};

/// Reviews every (product, dock) position against its (s, S) policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplenishmentManager;

impl ReplenishmentManager {
    pub fn new() -> Self {
        Self
    }

    /// One review pass in world order.
    ///
    /// A pair triggers when `on_hand + in_transit <= reorder_point`; the
    /// order quantity tops the position up to the target level. Each trigger
    /// places one purchase order with one line and dispatches its shipment,
    /// arrival sampled from the sourcing route's lead-time model. Returns
    /// the day's purchase orders; they are also appended to the book.
    pub fn review_and_order(
        &self,
        world: &World,
        ledger: &InventoryLedger,
        purchases: &mut PurchaseBook,
        transit: &mut TransitBoard,
        day: SimDay,
        rng: &mut SimRng,
    ) -> Result<Vec<PurchaseOrder>, ProcurementError> {
        let mut placed = Vec::new();

        for warehouse in world.warehouses() {
            let Some(dock) = world.dock_of(warehouse.id) else {
                continue;
            };

            for product in world.products() {
                let Some(policy) = world.policy(product.id, dock) else {
                    continue;
                };

                let on_hand = ledger.on_hand(product.id, dock);
                let in_transit = transit.in_transit_units(product.id, warehouse.id);
                let position = on_hand + in_transit;
                if position > policy.reorder_point {
                    continue;
                }
                let qty = policy.target_level - position;
                if qty <= 0 {
                    continue;
                }

                let Some(rule) = world.sourcing(product.id, warehouse.id) else {
                    return Err(ProcurementError::NoSourcing {
                        product_id: product.id,
                        warehouse_id: warehouse.id,
                    });
                };
                let route =
                    world
                        .route(rule.route_id)
                        .ok_or(ProcurementError::UnknownRoute {
                            route_id: rule.route_id,
                        })?;
                let model = world.leadtime_model(route.leadtime_model_id).ok_or(
                    ProcurementError::UnknownModel {
                        model_id: route.leadtime_model_id,
                    },
                )?;
                let lead_days = model.sample(rng)?;

                let po_id = PurchaseOrderId::new(rng);
                let line_id = PoLineId::new(rng);
                let shipment_id = ShipmentId::new(rng);

                let order = PurchaseOrder {
                    id: po_id,
                    day,
                    supplier_id: rule.supplier_id,
                    destination_warehouse_id: warehouse.id,
                    status: PurchaseOrderStatus::Submitted,
                    lines: vec![PoLine {
                        id: line_id,
                        purchase_order_id: po_id,
                        product_id: product.id,
                        qty_ordered: qty,
                        qty_received: 0,
                    }],
                };
                transit.dispatch(Shipment {
                    id: shipment_id,
                    purchase_order_id: po_id,
                    route_id: rule.route_id,
                    destination_warehouse_id: warehouse.id,
                    dispatched_day: day,
                    arrival_day: day.plus_days(lead_days),
                    status: ShipmentStatus::InTransit,
                    lines: vec![ShipmentLine {
                        product_id: product.id,
                        qty,
                    }],
                });

                tracing::debug!(
                    product = %product.sku,
                    warehouse = %warehouse.name,
                    position,
                    qty,
                    "reorder triggered"
                );
                purchases.push(order.clone());
                placed.push(order);
            }
        }

        Ok(placed)
    }
}
