use serde::{Deserialize, Serialize};

use stocktwin_core::{OrderId, OrderLineId, ProductId, SimDay, WarehouseId};

/// Customer order lifecycle.
///
/// Orders settle the day they are created: Pending only exists inside a
/// tick. Fulfilled and Cancelled are terminal; PartiallyFulfilled and AtRisk
/// carry backlog forward as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Fulfilled,
    PartiallyFulfilled,
    AtRisk,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Fulfilled | OrderStatus::Cancelled)
    }
}

/// One demanded product on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub qty_ordered: i64,
    pub qty_allocated: i64,
    /// Penalty accrued on the unallocated remainder, in cents.
    pub service_level_penalty_cents: i64,
}

impl OrderLine {
    /// Demand the network failed to serve.
    pub fn backlog(&self) -> i64 {
        self.qty_ordered - self.qty_allocated
    }
}

/// A customer order served from one warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub day: SimDay,
    pub customer: String,
    pub warehouse_id: WarehouseId,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
}

/// Every order placed over the run, in creation order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, order: Order) {
        self.orders.push(order);
    }

    pub fn extend(&mut self, orders: impl IntoIterator<Item = Order>) {
        self.orders.extend(orders);
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// All lines across all orders, flattened in creation order.
    pub fn lines(&self) -> Vec<OrderLine> {
        self.orders.iter().flat_map(|o| o.lines.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
