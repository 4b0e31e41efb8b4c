use serde::{Deserialize, Serialize};

use stocktwin_core::{ProductId, PurchaseOrderId, RouteId, ShipmentId, SimDay, WarehouseId};

/// Shipment lifecycle. Delivered is terminal: a delivered shipment is never
/// counted in transit and never received again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    InTransit,
    Delivered,
}

/// Goods moving on one shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentLine {
    pub product_id: ProductId,
    pub qty: i64,
}

/// Inbound goods dispatched from a supplier gateway, due at the destination
/// dock on `arrival_day`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub purchase_order_id: PurchaseOrderId,
    pub route_id: RouteId,
    pub destination_warehouse_id: WarehouseId,
    pub dispatched_day: SimDay,
    /// Sampled from the route's lead-time model at dispatch.
    pub arrival_day: SimDay,
    pub status: ShipmentStatus,
    pub lines: Vec<ShipmentLine>,
}

impl Shipment {
    pub fn is_due(&self, day: SimDay) -> bool {
        self.status == ShipmentStatus::InTransit && self.arrival_day <= day
    }
}

/// Every shipment of the run in dispatch order. The in-transit subset is
/// the pipeline the replenishment review counts against reordering.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitBoard {
    pub(crate) shipments: Vec<Shipment>,
}

impl TransitBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, shipment: Shipment) {
        self.shipments.push(shipment);
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    /// Units of `product` still on the water or road toward `warehouse`.
    pub fn in_transit_units(&self, product: ProductId, warehouse: WarehouseId) -> i64 {
        self.shipments
            .iter()
            .filter(|s| {
                s.status == ShipmentStatus::InTransit && s.destination_warehouse_id == warehouse
            })
            .flat_map(|s| &s.lines)
            .filter(|l| l.product_id == product)
            .map(|l| l.qty)
            .sum()
    }

    pub fn in_transit_count(&self) -> usize {
        self.shipments
            .iter()
            .filter(|s| s.status == ShipmentStatus::InTransit)
            .count()
    }

    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shipments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocktwin_core::SimRng;

    fn shipment(
        rng: &mut SimRng,
        warehouse: WarehouseId,
        product: ProductId,
        qty: i64,
        status: ShipmentStatus,
    ) -> Shipment {
        Shipment {
            id: ShipmentId::new(rng),
            purchase_order_id: PurchaseOrderId::new(rng),
            route_id: RouteId::new(rng),
            destination_warehouse_id: warehouse,
            dispatched_day: SimDay::new(1),
            arrival_day: SimDay::new(4),
            status,
            lines: vec![ShipmentLine {
                product_id: product,
                qty,
            }],
        }
    }

    #[test]
    fn in_transit_units_ignore_delivered_and_foreign_traffic() {
        let mut rng = SimRng::seed_from_u64(3);
        let here = WarehouseId::new(&mut rng);
        let there = WarehouseId::new(&mut rng);
        let product = ProductId::new(&mut rng);
        let other = ProductId::new(&mut rng);

        let mut board = TransitBoard::new();
        board.dispatch(shipment(&mut rng, here, product, 10, ShipmentStatus::InTransit));
        board.dispatch(shipment(&mut rng, here, product, 5, ShipmentStatus::Delivered));
        board.dispatch(shipment(&mut rng, there, product, 7, ShipmentStatus::InTransit));
        board.dispatch(shipment(&mut rng, here, other, 3, ShipmentStatus::InTransit));

        assert_eq!(board.in_transit_units(product, here), 10);
        assert_eq!(board.in_transit_units(product, there), 7);
        assert_eq!(board.in_transit_units(other, here), 3);
        assert_eq!(board.in_transit_count(), 3);
    }

    #[test]
    fn due_needs_transit_status_and_a_reached_arrival() {
        let mut rng = SimRng::seed_from_u64(3);
        let warehouse = WarehouseId::new(&mut rng);
        let product = ProductId::new(&mut rng);

        let mut s = shipment(&mut rng, warehouse, product, 1, ShipmentStatus::InTransit);
        assert!(!s.is_due(SimDay::new(3)));
        assert!(s.is_due(SimDay::new(4)));
        assert!(s.is_due(SimDay::new(9)));

        s.status = ShipmentStatus::Delivered;
        assert!(!s.is_due(SimDay::new(9)));
    }
}
