//! Daily demand generation and fulfillment.
//!
//! Demand is drawn per (warehouse, product) from a Poisson distribution and
//! served from the warehouse dock. Shortfall is never an error: it becomes
//! backlog on the order line, priced at the missed-sale penalty rate.

use std::collections::HashMap;

use rand::Rng;
use rand_distr::{Distribution, Poisson};

use stocktwin_core::{OrderId, OrderLineId, ProductId, SimDay, SimRng};
use stocktwin_inventory::{InventoryLedger, LedgerError, MoveCommand, MoveReason, MoveSource};
use stocktwin_world::{DistributionError, World};

use crate::order::{Order, OrderBook, OrderLine, OrderStatus};

/// Draws customer demand and fulfills it against dock stock.
#[derive(Debug)]
pub struct OutboundManager {
    demand: HashMap<ProductId, Poisson<f64>>,
}

impl OutboundManager {
    /// Prebuild one demand distribution per product from the world's plan.
    pub fn new(world: &World) -> Result<Self, DistributionError> {
        let mut demand = HashMap::new();
        for product in world.products() {
            let mean = world.demand().mean_for(product.id);
            let dist =
                Poisson::new(mean).map_err(|e| DistributionError::invalid("poisson demand", e))?;
            demand.insert(product.id, dist);
        }
        Ok(Self { demand })
    }

    /// Generate and settle one day of demand.
    ///
    /// Walks (warehouse, product) in world order so the draw sequence is
    /// reproducible. A zero draw creates nothing. Each positive draw creates
    /// one order with one line, allocates `min(requested, on_hand)` from the
    /// serving dock and issues the allocation. Returns the day's orders;
    /// they are also appended to the book.
    pub fn generate_and_fulfill(
        &self,
        world: &World,
        ledger: &InventoryLedger,
        orders: &mut OrderBook,
        day: SimDay,
        rng: &mut SimRng,
    ) -> Result<Vec<Order>, LedgerError> {
        let plan = world.demand();
        let mut created = Vec::new();

        for warehouse in world.warehouses() {
            let Some(dock) = world.dock_of(warehouse.id) else {
                continue;
            };

            for product in world.products() {
                let Some(dist) = self.demand.get(&product.id) else {
                    continue;
                };
                let requested = dist.sample(rng) as i64;
                if requested == 0 {
                    continue;
                }

                let customer = if plan.customers.is_empty() {
                    String::new()
                } else {
                    plan.customers[rng.gen_range(0..plan.customers.len())].clone()
                };
                let order_id = OrderId::new(rng);
                let line_id = OrderLineId::new(rng);

                let on_hand = ledger.on_hand(product.id, dock);
                let mut allocated = requested.min(on_hand).max(0);

                if allocated > 0 {
                    let issue = MoveCommand {
                        product_id: product.id,
                        location_id: dock,
                        delta: -allocated,
                        reason: MoveReason::Issuance,
                        day,
                        source: MoveSource::Order(order_id),
                    };
                    match ledger.record_move(issue) {
                        Ok(_) => {}
                        // Stock vanished between read and write: treat the
                        // line as unfulfillable, never fail the day.
                        Err(LedgerError::NegativeBalance { .. }) => allocated = 0,
                        Err(other) => return Err(other),
                    }
                }

                let backlog = requested - allocated;
                let order = Order {
                    id: order_id,
                    day,
                    customer,
                    warehouse_id: warehouse.id,
                    status: classify(requested, allocated),
                    lines: vec![OrderLine {
                        id: line_id,
                        order_id,
                        product_id: product.id,
                        qty_ordered: requested,
                        qty_allocated: allocated,
                        service_level_penalty_cents: backlog * plan.missed_sale_penalty_cents,
                    }],
                };
                created.push(order);
            }
        }

        orders.extend(created.iter().cloned());
        Ok(created)
    }
}

fn classify(requested: i64, allocated: i64) -> OrderStatus {
    if allocated >= requested {
        OrderStatus::Fulfilled
    } else if allocated > 0 {
        OrderStatus::PartiallyFulfilled
    } else {
        OrderStatus::AtRisk
    }
}
