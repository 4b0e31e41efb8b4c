use serde::{Deserialize, Serialize};

use stocktwin_core::{PoLineId, ProductId, PurchaseOrderId, SimDay, SupplierId, WarehouseId};

/// Purchase order lifecycle. Submitted on placement; Received, terminal,
/// once every line has arrived in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Submitted,
    Received,
}

/// One replenished product on a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoLine {
    pub id: PoLineId,
    pub purchase_order_id: PurchaseOrderId,
    pub product_id: ProductId,
    pub qty_ordered: i64,
    pub qty_received: i64,
}

impl PoLine {
    pub fn is_complete(&self) -> bool {
        self.qty_received >= self.qty_ordered
    }
}

/// A replenishment order placed with one supplier for one warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub day: SimDay,
    pub supplier_id: SupplierId,
    pub destination_warehouse_id: WarehouseId,
    pub status: PurchaseOrderStatus,
    pub lines: Vec<PoLine>,
}

impl PurchaseOrder {
    pub fn is_complete(&self) -> bool {
        self.lines.iter().all(PoLine::is_complete)
    }
}

/// Every purchase order placed over the run, in placement order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseBook {
    orders: Vec<PurchaseOrder>,
}

impl PurchaseBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, order: PurchaseOrder) {
        self.orders.push(order);
    }

    pub fn orders(&self) -> &[PurchaseOrder] {
        &self.orders
    }

    pub fn order_mut(&mut self, id: PurchaseOrderId) -> Option<&mut PurchaseOrder> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    /// All lines across all orders, flattened in placement order.
    pub fn lines(&self) -> Vec<PoLine> {
        self.orders.iter().flat_map(|o| o.lines.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
