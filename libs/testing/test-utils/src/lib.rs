//! Shared test utilities for the inventory catalog
//!
//! Provides the canonical three-store, nine-product seed catalog and small
//! assertion helpers used by the domain tests.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::InMemoryCatalog;
//! use test_utils::seed_catalog;
//!
//! # async fn demo() {
//! let catalog = InMemoryCatalog::new();
//! let seeded = seed_catalog(&catalog).await;
//! assert_eq!(seeded.products.len(), 9);
//! # }
//! ```

use domain_inventory::{
    CreateProduct, CreateStore, InMemoryCatalog, Product, ProductRepository, Store,
    StoreRepository,
};

/// Handles to the seeded fixture data
pub struct SeededCatalog {
    pub downtown: Store,
    pub suburb: Store,
    pub outlet: Store,
    /// All nine products in seed order
    pub products: Vec<Product>,
}

async fn seed_store(catalog: &InMemoryCatalog, name: &str, location: &str) -> Store {
    StoreRepository::create(
        catalog,
        CreateStore {
            name: name.to_string(),
            location: Some(location.to_string()),
        },
    )
    .await
    .expect("seed store")
}

async fn seed_product(
    catalog: &InMemoryCatalog,
    name: &str,
    category: &str,
    price: f64,
    quantity: i64,
    sku: &str,
    store_id: i64,
) -> Product {
    ProductRepository::create(
        catalog,
        CreateProduct {
            name: name.to_string(),
            category: category.to_string(),
            price,
            quantity,
            sku: sku.to_string(),
            store_id,
        },
    )
    .await
    .expect("seed product")
}

/// Seed the canonical catalog: three stores, nine products
pub async fn seed_catalog(catalog: &InMemoryCatalog) -> SeededCatalog {
    let downtown = seed_store(catalog, "Downtown Market", "City Center").await;
    let suburb = seed_store(catalog, "Suburb Depot", "Northside").await;
    let outlet = seed_store(catalog, "Outlet Hub", "Industrial Park").await;

    let rows = [
        ("Red Apple", "Grocery", 0.99, 120, "APL-RED-001", downtown.id),
        ("Banana", "Grocery", 0.59, 80, "BAN-YEL-001", downtown.id),
        ("LED Bulb", "Hardware", 4.50, 25, "LED-BLB-060", downtown.id),
        ("Laptop Sleeve", "Electronics", 19.99, 15, "ELC-SLV-015", suburb.id),
        ("USB-C Cable", "Electronics", 9.99, 60, "USB-C-060", suburb.id),
        ("Coffee Beans", "Grocery", 12.50, 40, "CAF-BNS-040", suburb.id),
        ("Safety Gloves", "Hardware", 7.25, 10, "HW-GLO-010", outlet.id),
        ("Paint Brush", "Hardware", 3.75, 30, "HW-PBR-030", outlet.id),
        ("Mineral Water", "Grocery", 1.25, 200, "GR-WAT-200", outlet.id),
    ];

    let mut products = Vec::with_capacity(rows.len());
    for (name, category, price, quantity, sku, store_id) in rows {
        products.push(seed_product(catalog, name, category, price, quantity, sku, store_id).await);
    }

    SeededCatalog {
        downtown,
        suburb,
        outlet,
        products,
    }
}


/// Test assertion helpers
pub mod assertions {
    /// Assert two monetary amounts agree at 2-decimal precision
    pub fn assert_money_eq(actual: f64, expected: f64, context: &str) {
        assert!(
            (actual - expected).abs() < 0.005,
            "{}: expected {}, got {}",
            context,
            expected,
            actual
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
