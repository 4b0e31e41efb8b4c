//! The frozen outcome of a run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use stocktwin_core::SimDay;
use stocktwin_inventory::{InventoryBalance, InventoryMove};
use stocktwin_purchasing::{PoLine, PurchaseOrder, Shipment};
use stocktwin_sales::{Order, OrderLine};
use stocktwin_sensors::Observation;
use stocktwin_world::World;

use crate::state::SimState;

/// Headline numbers for one run, ready to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub seed: u64,
    pub horizon_days: u32,
    pub final_day: SimDay,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub move_count: usize,
    pub order_count: usize,
    pub purchase_order_count: usize,
    pub shipment_count: usize,
    pub observation_count: usize,
}

/// Everything a completed run produced. The world half is static, the
/// state half is what the ticks wrote.
pub struct SimulationResult {
    world: World,
    sim: SimState,
    summary: RunSummary,
}

impl SimulationResult {
    pub(crate) fn new(world: World, sim: SimState, summary: RunSummary) -> Self {
        Self { world, sim, summary }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn final_day(&self) -> SimDay {
        self.summary.final_day
    }

    /// The full move log in commit order.
    pub fn moves(&self) -> Vec<InventoryMove> {
        self.sim.ledger.moves()
    }

    /// Closing balances in first-touch order.
    pub fn balances(&self) -> Vec<InventoryBalance> {
        self.sim.ledger.balances()
    }

    pub fn orders(&self) -> &[Order] {
        self.sim.orders.orders()
    }

    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.sim.orders.lines()
    }

    pub fn purchase_orders(&self) -> &[PurchaseOrder] {
        self.sim.purchases.orders()
    }

    pub fn po_lines(&self) -> Vec<PoLine> {
        self.sim.purchases.lines()
    }

    pub fn shipments(&self) -> &[Shipment] {
        self.sim.transit.shipments()
    }

    pub fn observations(&self) -> &[Observation] {
        self.sim.observations.observations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulationEngine;
    use stocktwin_config::SimulationSettings;
    use stocktwin_world::build_world;

    #[test]
    fn summary_counts_mirror_the_collections() {
        let mut settings = SimulationSettings::default();
        settings.world.warehouse_count = 2;
        settings.world.product_count = 4;
        settings.world.supplier_count = 2;
        let world = build_world(&settings).unwrap();

        let mut engine = SimulationEngine::new(world, 10, 13).unwrap();
        while !engine.is_finished() {
            engine.advance_day().unwrap();
        }
        let result = engine.into_result();

        let summary = result.summary();
        assert_eq!(summary.seed, 13);
        assert_eq!(summary.horizon_days, 10);
        assert_eq!(summary.final_day, SimDay::new(10));
        assert!(summary.finished_at >= summary.started_at);

        assert_eq!(summary.move_count, result.moves().len());
        assert_eq!(summary.order_count, result.orders().len());
        assert_eq!(summary.purchase_order_count, result.purchase_orders().len());
        assert_eq!(summary.shipment_count, result.shipments().len());
        assert_eq!(summary.observation_count, result.observations().len());

        // Flattened line views agree with their parents.
        assert_eq!(
            result.order_lines().len(),
            result.orders().iter().map(|o| o.lines.len()).sum::<usize>()
        );
        assert_eq!(
            result.po_lines().len(),
            result
                .purchase_orders()
                .iter()
                .map(|po| po.lines.len())
                .sum::<usize>()
        );

        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["horizon_days"], 10);
        assert!(json["run_id"].is_string());
    }
}
