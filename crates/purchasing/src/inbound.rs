//! Receiving. Runs strictly first in the tick so goods landing today are
//! sellable today.

use stocktwin_core::SimDay;
use stocktwin_inventory::{InventoryLedger, InventoryMove, MoveCommand, MoveReason, MoveSource};
use stocktwin_world::World;

use crate::error::ProcurementError;
use crate::order::{PurchaseBook, PurchaseOrderStatus};
use crate::shipment::{ShipmentStatus, TransitBoard};

/// Applies due shipments to destination docks.
#[derive(Debug, Default, Clone, Copy)]
pub struct InboundManager;

impl InboundManager {
    pub fn new() -> Self {
        Self
    }

    /// Receive every in-transit shipment with `arrival_day <= day`, in
    /// dispatch order.
    ///
    /// Each shipment line lands as one Receipt move on the destination dock
    /// and increments `qty_received` on its purchase order line; the order
    /// flips to Received when every line is complete. Delivered shipments
    /// are terminal, so re-running the same day applies nothing twice.
    pub fn process_arrivals(
        &self,
        world: &World,
        ledger: &InventoryLedger,
        transit: &mut TransitBoard,
        purchases: &mut PurchaseBook,
        day: SimDay,
    ) -> Result<Vec<InventoryMove>, ProcurementError> {
        let mut applied = Vec::new();

        for shipment in transit.shipments.iter_mut() {
            if !shipment.is_due(day) {
                continue;
            }

            let dock = world.dock_of(shipment.destination_warehouse_id).ok_or(
                ProcurementError::MissingDock {
                    warehouse_id: shipment.destination_warehouse_id,
                },
            )?;

            for line in &shipment.lines {
                let receipt = ledger.record_move(MoveCommand {
                    product_id: line.product_id,
                    location_id: dock,
                    delta: line.qty,
                    reason: MoveReason::Receipt,
                    day,
                    source: MoveSource::Shipment(shipment.id),
                })?;
                applied.push(receipt);
            }

            let order = purchases.order_mut(shipment.purchase_order_id).ok_or(
                ProcurementError::UnknownPurchaseOrder {
                    purchase_order_id: shipment.purchase_order_id,
                },
            )?;
            for line in &shipment.lines {
                match order
                    .lines
                    .iter_mut()
                    .find(|l| l.product_id == line.product_id)
                {
                    Some(po_line) => po_line.qty_received += line.qty,
                    None => tracing::warn!(
                        shipment = %shipment.id,
                        order = %order.id,
                        "shipment line has no purchase order line"
                    ),
                }
            }
            if order.is_complete() {
                order.status = PurchaseOrderStatus::Received;
            }

            shipment.status = ShipmentStatus::Delivered;
        }

        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{PoLine, PurchaseOrder};
    use crate::replenishment::ReplenishmentManager;
    use crate::shipment::{Shipment, ShipmentLine};
    use stocktwin_config::SimulationSettings;
    use stocktwin_core::{PoLineId, PurchaseOrderId, ShipmentId, SimRng};
    use stocktwin_world::build_world;

    fn test_world() -> World {
        let mut settings = SimulationSettings::default();
        settings.world.warehouse_count = 1;
        settings.world.product_count = 3;
        settings.world.supplier_count = 2;
        build_world(&settings).unwrap()
    }

    fn placed_network() -> (World, InventoryLedger, PurchaseBook, TransitBoard) {
        let world = test_world();
        let ledger = InventoryLedger::new();
        let mut purchases = PurchaseBook::new();
        let mut transit = TransitBoard::new();
        let mut rng = SimRng::seed_from_u64(31);
        ReplenishmentManager::new()
            .review_and_order(&world, &ledger, &mut purchases, &mut transit, SimDay::new(1), &mut rng)
            .unwrap();
        (world, ledger, purchases, transit)
    }

    #[test]
    fn due_shipments_land_on_the_dock_and_complete_their_orders() {
        let (world, ledger, mut purchases, mut transit) = placed_network();
        let dock = world.dock_of(world.warehouses()[0].id).unwrap();
        let last_arrival = transit
            .shipments()
            .iter()
            .map(|s| s.arrival_day)
            .max()
            .unwrap();

        let moves = InboundManager::new()
            .process_arrivals(&world, &ledger, &mut transit, &mut purchases, last_arrival)
            .unwrap();

        assert_eq!(moves.len(), world.products().len());
        for product in world.products() {
            assert_eq!(ledger.on_hand(product.id, dock), 50);
        }
        for order in purchases.orders() {
            assert_eq!(order.status, PurchaseOrderStatus::Received);
            assert_eq!(order.lines[0].qty_received, order.lines[0].qty_ordered);
        }
        assert_eq!(transit.in_transit_count(), 0);
        ledger.verify_all().unwrap();
    }

    #[test]
    fn same_day_reprocessing_applies_nothing_twice() {
        let (world, ledger, mut purchases, mut transit) = placed_network();
        let dock = world.dock_of(world.warehouses()[0].id).unwrap();
        let last_arrival = transit
            .shipments()
            .iter()
            .map(|s| s.arrival_day)
            .max()
            .unwrap();

        let manager = InboundManager::new();
        manager
            .process_arrivals(&world, &ledger, &mut transit, &mut purchases, last_arrival)
            .unwrap();
        let before = ledger.move_count();

        let again = manager
            .process_arrivals(&world, &ledger, &mut transit, &mut purchases, last_arrival)
            .unwrap();

        assert!(again.is_empty());
        assert_eq!(ledger.move_count(), before);
        for product in world.products() {
            assert_eq!(ledger.on_hand(product.id, dock), 50);
        }
    }

    #[test]
    fn nothing_arrives_before_its_day() {
        let (world, ledger, mut purchases, mut transit) = placed_network();
        let first_arrival = transit
            .shipments()
            .iter()
            .map(|s| s.arrival_day)
            .min()
            .unwrap();

        let moves = InboundManager::new()
            .process_arrivals(
                &world,
                &ledger,
                &mut transit,
                &mut purchases,
                SimDay::new(first_arrival.0 - 1),
            )
            .unwrap();

        assert!(moves.is_empty());
        assert_eq!(ledger.move_count(), 0);
        for order in purchases.orders() {
            assert_eq!(order.status, PurchaseOrderStatus::Submitted);
        }
    }

    #[test]
    fn order_flips_only_when_every_line_is_home() {
        let world = test_world();
        let warehouse = world.warehouses()[0].id;
        let ledger = InventoryLedger::new();
        let mut rng = SimRng::seed_from_u64(8);

        let po_id = PurchaseOrderId::new(&mut rng);
        let products = [world.products()[0].id, world.products()[1].id];
        let route_id = world.routes()[0].id;

        let mut purchases = PurchaseBook::new();
        purchases.push(PurchaseOrder {
            id: po_id,
            day: SimDay::new(1),
            supplier_id: world.suppliers()[0].id,
            destination_warehouse_id: warehouse,
            status: PurchaseOrderStatus::Submitted,
            lines: products
                .iter()
                .map(|&product_id| PoLine {
                    id: PoLineId::new(&mut rng),
                    purchase_order_id: po_id,
                    product_id,
                    qty_ordered: 10,
                    qty_received: 0,
                })
                .collect(),
        });

        // Two shipments, one per line, arriving on different days.
        let mut transit = TransitBoard::new();
        for (i, &product_id) in products.iter().enumerate() {
            transit.dispatch(Shipment {
                id: ShipmentId::new(&mut rng),
                purchase_order_id: po_id,
                route_id,
                destination_warehouse_id: warehouse,
                dispatched_day: SimDay::new(1),
                arrival_day: SimDay::new(3 + i as u32),
                status: ShipmentStatus::InTransit,
                lines: vec![ShipmentLine { product_id, qty: 10 }],
            });
        }

        let manager = InboundManager::new();
        manager
            .process_arrivals(&world, &ledger, &mut transit, &mut purchases, SimDay::new(3))
            .unwrap();
        assert_eq!(
            purchases.orders()[0].status,
            PurchaseOrderStatus::Submitted
        );

        manager
            .process_arrivals(&world, &ledger, &mut transit, &mut purchases, SimDay::new(4))
            .unwrap();
        assert_eq!(purchases.orders()[0].status, PurchaseOrderStatus::Received);
    }
}
