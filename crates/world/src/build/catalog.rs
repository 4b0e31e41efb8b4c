//! Product catalog and supplier network.

use rand::Rng;

use stocktwin_config::SimulationSettings;
use stocktwin_core::{ProductId, SimRng, SupplierId};

use crate::catalog::{Product, Supplier};
use crate::warehouse::Warehouse;

const PRODUCT_ADJECTIVES: [&str; 10] = [
    "Compact", "Prime", "Modular", "Dynamic", "Sturdy", "Polar", "Crisp", "Atlas", "Nimbus",
    "Vector",
];
const PRODUCT_NOUNS: [&str; 10] = [
    "Unit", "Pack", "Crate", "Module", "Kit", "Case", "Bundle", "Cell", "Frame", "Batch",
];
const SUPPLIER_NAMES: [&str; 8] = [
    "Apex", "Borealis", "Cascadia", "Meridian", "Northwind", "Solstice", "Vega", "Zenith",
];
const SUPPLIER_SUFFIXES: [&str; 5] = ["Logistics", "Trading", "Supply", "Freight", "Distribution"];

/// Chance that a supplier carries a product beyond its primary assignment.
const SECONDARY_COVERAGE: f64 = 0.2;

pub(crate) struct CatalogOutput {
    pub products: Vec<Product>,
    pub suppliers: Vec<Supplier>,
}

pub(crate) fn build(
    settings: &SimulationSettings,
    warehouses: &[Warehouse],
    rng: &mut SimRng,
) -> CatalogOutput {
    let products = build_products(settings, rng);
    let suppliers = build_suppliers(settings, warehouses, &products, rng);
    CatalogOutput {
        products,
        suppliers,
    }
}

fn build_products(settings: &SimulationSettings, rng: &mut SimRng) -> Vec<Product> {
    let catalog = &settings.catalog;
    let mut products = Vec::with_capacity(settings.world.product_count as usize);

    for _ in 0..settings.world.product_count {
        let category = catalog.categories[rng.gen_range(0..catalog.categories.len())].clone();
        let shelf = catalog
            .shelf_life_by_category
            .get(&category)
            .copied()
            .unwrap_or(catalog.shelf_life_default);
        let prefix: String = category.chars().take(3).collect::<String>().to_uppercase();
        let serial = rng.gen_range(10_000_000u32..100_000_000u32);

        products.push(Product {
            id: ProductId::new(rng),
            sku: format!("{prefix}-{serial:08}"),
            name: product_name(rng),
            category,
            shelf_life_days: rng.gen_range(shelf.min_days..=shelf.max_days),
            unit_cost_cents: rng
                .gen_range(catalog.unit_cost.min_cents..=catalog.unit_cost.max_cents),
        });
    }

    products
}

fn product_name(rng: &mut SimRng) -> String {
    let adjective = PRODUCT_ADJECTIVES[rng.gen_range(0..PRODUCT_ADJECTIVES.len())];
    let noun = PRODUCT_NOUNS[rng.gen_range(0..PRODUCT_NOUNS.len())];
    format!("{adjective} {noun}")
}

fn supplier_name(rng: &mut SimRng) -> String {
    let name = SUPPLIER_NAMES[rng.gen_range(0..SUPPLIER_NAMES.len())];
    let suffix = SUPPLIER_SUFFIXES[rng.gen_range(0..SUPPLIER_SUFFIXES.len())];
    format!("{name} {suffix}")
}

/// Suppliers cycle the configured regions; the gateway is the first warehouse
/// in the supplier's region, falling back to round-robin when no warehouse
/// sits there. Round-robin primary assignment guarantees every product has a
/// carrier; sampled extras widen sourcing choice.
fn build_suppliers(
    settings: &SimulationSettings,
    warehouses: &[Warehouse],
    products: &[Product],
    rng: &mut SimRng,
) -> Vec<Supplier> {
    let count = settings.world.supplier_count as usize;
    let regions = &settings.catalog.supplier_regions;
    let reliability = settings.catalog.supplier_reliability;

    let mut suppliers = Vec::with_capacity(count);
    for i in 0..count {
        let region = regions[i % regions.len()].clone();
        let gateway = warehouses
            .iter()
            .find(|w| w.region == region)
            .map(|w| w.id)
            .unwrap_or_else(|| warehouses[i % warehouses.len()].id);

        suppliers.push(Supplier {
            id: SupplierId::new(rng),
            name: supplier_name(rng),
            region,
            reliability: round2(rng.gen_range(reliability.min..=reliability.max)),
            catalog: Vec::new(),
            gateway,
        });
    }

    for (j, product) in products.iter().enumerate() {
        suppliers[j % count].catalog.push(product.id);
    }

    for supplier in suppliers.iter_mut() {
        for product in products {
            if supplier.catalog.contains(&product.id) {
                continue;
            }
            if rng.r#gen::<f64>() < SECONDARY_COVERAGE {
                supplier.catalog.push(product.id);
            }
        }
    }

    suppliers
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
