//! Integration tests for the inventory catalog
//!
//! These run the full service stack against the in-memory storage
//! collaborator seeded with the canonical three-store catalog.

use domain_inventory::{
    CreateProduct, InMemoryCatalog, InventoryError, ProductFilter, ProductService, SortOrder,
    StoreService, UpdateProduct, DEFAULT_LOW_STOCK_THRESHOLD,
};
use test_utils::{assertions::*, seed_catalog, SeededCatalog};

async fn services() -> (
    ProductService<InMemoryCatalog>,
    StoreService<InMemoryCatalog, InMemoryCatalog>,
    SeededCatalog,
) {
    let catalog = InMemoryCatalog::new();
    let seeded = seed_catalog(&catalog).await;
    (
        ProductService::new(catalog.clone()),
        StoreService::new(catalog.clone(), catalog),
        seeded,
    )
}

// ============================================================================
// Listing pipeline
// ============================================================================

#[tokio::test]
async fn test_unfiltered_listing_returns_everything_by_name() {
    let (products, _, seeded) = services().await;

    let page = products
        .list_products(1, 50, &ProductFilter::default(), None, None)
        .await
        .unwrap();

    assert_eq!(page.meta.total, seeded.products.len() as u64);
    assert_eq!(page.items.len(), seeded.products.len());

    let names: Vec<&str> = page.items.iter().map(|r| r.product.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted, "default order should be name ascending");

    // every row carries its owning store
    for row in &page.items {
        assert_eq!(row.store.id, row.product.store_id);
    }
}

#[tokio::test]
async fn test_total_is_independent_of_pagination() {
    let (products, _, _) = services().await;
    let filter = ProductFilter {
        category: Some("Grocery".to_string()),
        ..Default::default()
    };

    let page1 = products
        .list_products(1, 2, &filter, None, None)
        .await
        .unwrap();
    let page2 = products
        .list_products(2, 3, &filter, None, None)
        .await
        .unwrap();

    assert_eq!(page1.meta.total, 4);
    assert_eq!(page2.meta.total, 4);
    assert_eq!(page1.meta.total_pages, 2);
    assert_eq!(page2.meta.total_pages, 2);
}

#[tokio::test]
async fn test_paging_round_trip_reproduces_full_ordered_set() {
    let (products, _, _) = services().await;
    let page_size = 2;

    let full = products
        .list_products(1, 100, &ProductFilter::default(), Some("sku"), None)
        .await
        .unwrap();

    let mut collected = Vec::new();
    let mut page = 1;
    loop {
        let chunk = products
            .list_products(page, page_size, &ProductFilter::default(), Some("sku"), None)
            .await
            .unwrap();
        collected.extend(chunk.items);
        if !chunk.meta.has_next {
            break;
        }
        page += 1;
    }

    assert_eq!(collected.len(), full.items.len());
    for (got, want) in collected.iter().zip(full.items.iter()) {
        assert_eq!(got.product.id, want.product.id);
    }
}

#[tokio::test]
async fn test_category_page_sorted_by_price_descending() {
    let (products, _, seeded) = services().await;

    // the three downtown products: two Grocery, one Hardware
    let filter = ProductFilter {
        store_id: Some(seeded.downtown.id),
        category: Some("Grocery".to_string()),
        ..Default::default()
    };
    let page = products
        .list_products(1, 2, &filter, Some("price"), Some(SortOrder::Desc))
        .await
        .unwrap();

    let prices: Vec<f64> = page.items.iter().map(|r| r.product.price).collect();
    assert_eq!(prices, vec![0.99, 0.59]);
    assert_eq!(page.meta.page, 1);
    assert_eq!(page.meta.page_size, 2);
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.meta.total_pages, 1);
    assert!(!page.meta.has_next);
    assert!(!page.meta.has_prev);
}

#[tokio::test]
async fn test_search_spans_name_category_and_sku() {
    let (products, _, _) = services().await;

    // matches only via the sku
    let filter = ProductFilter {
        search: Some("APL".to_string()),
        ..Default::default()
    };
    let page = products
        .list_products(1, 10, &filter, None, None)
        .await
        .unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.items[0].product.name, "Red Apple");

    // matches via the category, AND-combined with the price range
    let filter = ProductFilter {
        search: Some("groc".to_string()),
        min_price: Some(1.0),
        ..Default::default()
    };
    let page = products
        .list_products(1, 10, &filter, None, None)
        .await
        .unwrap();
    let names: Vec<&str> = page.items.iter().map(|r| r.product.name.as_str()).collect();
    assert_eq!(names, vec!["Coffee Beans", "Mineral Water"]);
}

#[tokio::test]
async fn test_unknown_sort_key_surfaces_storage_error() {
    let (products, _, _) = services().await;
    let result = products
        .list_products(1, 10, &ProductFilter::default(), Some("storeName"), None)
        .await;
    assert!(matches!(
        result,
        Err(InventoryError::UnsupportedSortKey(_))
    ));
}

// ============================================================================
// Summary aggregation
// ============================================================================

#[tokio::test]
async fn test_summary_for_one_store() {
    let (_, stores, seeded) = services().await;

    let summaries = stores
        .store_summary(Some(seeded.downtown.id), DEFAULT_LOW_STOCK_THRESHOLD)
        .await
        .unwrap();

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.store_id, seeded.downtown.id);
    assert_eq!(
        assert_some(summary.store_name.clone(), "store name"),
        "Downtown Market"
    );
    assert_money_eq(summary.total_inventory_value, 278.5, "inventory value");
    assert_eq!(summary.total_products, 3);
    assert_eq!(summary.low_stock_count, 0);
    assert_money_eq(summary.avg_price, 2.03, "average price");

    let top: Vec<(&str, u64)> = summary
        .top_categories
        .iter()
        .map(|c| (c.category.as_str(), c.count))
        .collect();
    assert_eq!(top, vec![("Grocery", 2), ("Hardware", 1)]);
}

#[tokio::test]
async fn test_summary_across_all_stores() {
    let (_, stores, seeded) = services().await;

    let summaries = stores
        .store_summary(None, DEFAULT_LOW_STOCK_THRESHOLD)
        .await
        .unwrap();

    assert_eq!(summaries.len(), 3);
    // groups follow the product stream, which the seed lays out store by store
    let ids: Vec<i64> = summaries.iter().map(|s| s.store_id).collect();
    assert_eq!(ids, vec![seeded.downtown.id, seeded.suburb.id, seeded.outlet.id]);

    let total_products: u64 = summaries.iter().map(|s| s.total_products).sum();
    assert_eq!(total_products, 9);

    // suburb: 19.99*15 + 9.99*60 + 12.50*40
    assert_money_eq(summaries[1].total_inventory_value, 1399.25, "suburb value");
    // outlet: 7.25*10 + 3.75*30 + 1.25*200
    assert_money_eq(summaries[2].total_inventory_value, 435.0, "outlet value");
}

#[tokio::test]
async fn test_summary_low_stock_follows_threshold() {
    let (_, stores, seeded) = services().await;

    let at_default = stores
        .store_summary(None, DEFAULT_LOW_STOCK_THRESHOLD)
        .await
        .unwrap();
    assert!(at_default.iter().all(|s| s.low_stock_count == 0));

    // threshold 15 catches the 15-unit sleeve and the 10-unit gloves
    let at_fifteen = stores.store_summary(None, 15).await.unwrap();
    let by_store: Vec<(i64, u64)> = at_fifteen
        .iter()
        .map(|s| (s.store_id, s.low_stock_count))
        .collect();
    assert_eq!(
        by_store,
        vec![
            (seeded.downtown.id, 0),
            (seeded.suburb.id, 1),
            (seeded.outlet.id, 1),
        ]
    );

    // totals never move with the threshold
    for (strict, loose) in at_fifteen.iter().zip(at_default.iter()) {
        assert_eq!(strict.total_products, loose.total_products);
        assert_eq!(strict.total_inventory_value, loose.total_inventory_value);
    }
}

#[tokio::test]
async fn test_summary_skips_store_without_products() {
    let (_, stores, _) = services().await;

    let empty = stores
        .create_store(domain_inventory::CreateStore {
            name: "Empty Annex".to_string(),
            location: None,
        })
        .await
        .unwrap();

    let by_id = stores
        .store_summary(Some(empty.id), DEFAULT_LOW_STOCK_THRESHOLD)
        .await
        .unwrap();
    assert!(by_id.is_empty());

    let all = stores
        .store_summary(None, DEFAULT_LOW_STOCK_THRESHOLD)
        .await
        .unwrap();
    assert!(all.iter().all(|s| s.store_id != empty.id));
}

// ============================================================================
// Pass-through CRUD
// ============================================================================

#[tokio::test]
async fn test_product_crud_cycle() {
    let (products, _, seeded) = services().await;

    let created = products
        .create_product(CreateProduct {
            name: "Hex Wrench".to_string(),
            category: "Hardware".to_string(),
            price: 2.10,
            quantity: 4,
            sku: "HW-WRN-004".to_string(),
            store_id: seeded.outlet.id,
        })
        .await
        .unwrap();

    let fetched = products.get_product(created.id).await.unwrap();
    assert_eq!(fetched.product.name, "Hex Wrench");
    assert_eq!(fetched.store.name, "Outlet Hub");

    let updated = products
        .update_product(
            created.id,
            UpdateProduct {
                price: Some(2.50),
                quantity: Some(12),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 2.50);
    assert_eq!(updated.quantity, 12);

    products.delete_product(created.id).await.unwrap();
    let gone = products.get_product(created.id).await;
    assert!(matches!(gone, Err(InventoryError::ProductNotFound(_))));
}

#[tokio::test]
async fn test_create_product_enforces_shape_constraints() {
    let (products, _, seeded) = services().await;

    let result = products
        .create_product(CreateProduct {
            name: "OK Name".to_string(),
            category: "Grocery".to_string(),
            price: 1.0,
            quantity: 1,
            sku: "XY".to_string(), // below the 3-char minimum
            store_id: seeded.downtown.id,
        })
        .await;
    assert!(matches!(result, Err(InventoryError::Validation(_))));
}

#[tokio::test]
async fn test_delete_store_blocked_while_stocked() {
    let (_, stores, seeded) = services().await;
    let result = stores.delete_store(seeded.outlet.id).await;
    assert!(matches!(result, Err(InventoryError::StoreNotEmpty(_))));
}

// ============================================================================
// Concurrent reads
// ============================================================================

#[tokio::test]
async fn test_concurrent_summaries_agree_on_a_fixed_snapshot() {
    let (_, stores, _) = services().await;

    let mut handles = vec![];
    for _ in 0..5 {
        let stores = stores.clone();
        handles.push(tokio::spawn(async move {
            stores.store_summary(None, DEFAULT_LOW_STOCK_THRESHOLD).await
        }));
    }

    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap().unwrap())
        .collect();

    assert_eq!(results.len(), 5);
    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
}
