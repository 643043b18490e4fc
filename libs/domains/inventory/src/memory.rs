//! In-memory storage collaborator
//!
//! Backs both repository traits with a single `RwLock`-guarded state so the
//! catalog keeps referential integrity between stores and products. Sorting
//! breaks ties on product id, so a fixed catalog always pages out in the
//! same order.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{InventoryError, Result};
use crate::models::{
    CreateProduct, CreateStore, Product, ProductFilter, ProductWithStore, SortOrder, Store,
    UpdateProduct, UpdateStore,
};
use crate::repository::{ProductRepository, StoreRepository};

/// Sort keys accepted by `list_page`
const SORT_KEYS: &[&str] = &[
    "id",
    "name",
    "category",
    "price",
    "quantity",
    "sku",
    "store_id",
];

#[derive(Debug, Default)]
struct CatalogState {
    stores: BTreeMap<i64, Store>,
    products: BTreeMap<i64, Product>,
    next_store_id: i64,
    next_product_id: i64,
}

impl CatalogState {
    fn attach(&self, product: &Product) -> Result<ProductWithStore> {
        let store = self
            .stores
            .get(&product.store_id)
            .cloned()
            .ok_or(InventoryError::StoreNotFound(product.store_id))?;
        Ok(ProductWithStore {
            product: product.clone(),
            store,
        })
    }
}

/// In-memory implementation of both catalog repositories
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Conjunctive predicate over all present filter dimensions; `search` is an
/// OR-group of case-insensitive substring matches.
fn matches(product: &Product, filter: &ProductFilter) -> bool {
    if let Some(store_id) = filter.store_id {
        if product.store_id != store_id {
            return false;
        }
    }
    if let Some(ref category) = filter.category {
        if product.category.to_lowercase() != category.to_lowercase() {
            return false;
        }
    }
    if let Some(min_price) = filter.min_price {
        if product.price < min_price {
            return false;
        }
    }
    if let Some(max_price) = filter.max_price {
        if product.price > max_price {
            return false;
        }
    }
    if let Some(min_qty) = filter.min_qty {
        if product.quantity < min_qty {
            return false;
        }
    }
    if let Some(max_qty) = filter.max_qty {
        if product.quantity > max_qty {
            return false;
        }
    }
    if let Some(ref search) = filter.search {
        let needle = search.to_lowercase();
        let hit = product.name.to_lowercase().contains(&needle)
            || product.category.to_lowercase().contains(&needle)
            || product.sku.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }
    true
}

fn compare_by_key(a: &Product, b: &Product, key: &str) -> Ordering {
    match key {
        "id" => a.id.cmp(&b.id),
        "name" => a.name.cmp(&b.name),
        "category" => a.category.cmp(&b.category),
        "price" => a.price.total_cmp(&b.price),
        "quantity" => a.quantity.cmp(&b.quantity),
        "sku" => a.sku.cmp(&b.sku),
        "store_id" => a.store_id.cmp(&b.store_id),
        // unreachable: keys are checked against SORT_KEYS first
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn create(&self, input: CreateProduct) -> Result<Product> {
        let mut state = self.state.write().await;

        if !state.stores.contains_key(&input.store_id) {
            return Err(InventoryError::StoreNotFound(input.store_id));
        }

        state.next_product_id += 1;
        let product = Product {
            id: state.next_product_id,
            name: input.name,
            category: input.category,
            price: input.price,
            quantity: input.quantity,
            sku: input.sku,
            store_id: input.store_id,
        };
        state.products.insert(product.id, product.clone());

        info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ProductWithStore>> {
        let state = self.state.read().await;
        match state.products.get(&id) {
            Some(product) => Ok(Some(state.attach(product)?)),
            None => Ok(None),
        }
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64> {
        let state = self.state.read().await;
        Ok(state.products.values().filter(|p| matches(p, filter)).count() as u64)
    }

    async fn list_page(
        &self,
        filter: &ProductFilter,
        sort_by: &str,
        sort_order: SortOrder,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<ProductWithStore>> {
        if !SORT_KEYS.contains(&sort_by) {
            return Err(InventoryError::UnsupportedSortKey(sort_by.to_string()));
        }

        let state = self.state.read().await;

        let mut rows: Vec<Product> = state
            .products
            .values()
            .filter(|p| matches(p, filter))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ord = compare_by_key(a, b, sort_by);
            let ord = match sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            };
            ord.then_with(|| a.id.cmp(&b.id))
        });

        rows.iter()
            .skip(skip as usize)
            .take(limit as usize)
            .map(|p| state.attach(p))
            .collect()
    }

    async fn list_all(&self, store_id: Option<i64>) -> Result<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .filter(|p| store_id.is_none_or(|id| p.store_id == id))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> Result<Product> {
        let mut state = self.state.write().await;

        if let Some(store_id) = input.store_id {
            if !state.stores.contains_key(&store_id) {
                return Err(InventoryError::StoreNotFound(store_id));
            }
        }

        let product = state
            .products
            .get_mut(&id)
            .ok_or(InventoryError::ProductNotFound(id))?;

        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(category) = input.category {
            product.category = category;
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(quantity) = input.quantity {
            product.quantity = quantity;
        }
        if let Some(sku) = input.sku {
            product.sku = sku;
        }
        if let Some(store_id) = input.store_id {
            product.store_id = store_id;
        }
        let updated = product.clone();

        info!(product_id = id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.products.remove(&id).is_some() {
            info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[async_trait]
impl StoreRepository for InMemoryCatalog {
    async fn create(&self, input: CreateStore) -> Result<Store> {
        let mut state = self.state.write().await;

        state.next_store_id += 1;
        let store = Store {
            id: state.next_store_id,
            name: input.name,
            location: input.location,
        };
        state.stores.insert(store.id, store.clone());

        info!(store_id = store.id, "Created store");
        Ok(store)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Store>> {
        let state = self.state.read().await;
        Ok(state.stores.get(&id).cloned())
    }

    async fn list(&self, id_filter: Option<i64>) -> Result<Vec<Store>> {
        let state = self.state.read().await;
        Ok(match id_filter {
            Some(id) => state.stores.get(&id).cloned().into_iter().collect(),
            None => state.stores.values().cloned().collect(),
        })
    }

    async fn update(&self, id: i64, input: UpdateStore) -> Result<Store> {
        let mut state = self.state.write().await;

        let store = state
            .stores
            .get_mut(&id)
            .ok_or(InventoryError::StoreNotFound(id))?;

        if let Some(name) = input.name {
            store.name = name;
        }
        if let Some(location) = input.location {
            store.location = location;
        }
        let updated = store.clone();

        info!(store_id = id, "Updated store");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;

        if !state.stores.contains_key(&id) {
            return Ok(false);
        }
        if state.products.values().any(|p| p.store_id == id) {
            return Err(InventoryError::StoreNotEmpty(id));
        }

        state.stores.remove(&id);
        info!(store_id = id, "Deleted store");
        Ok(true)
    }
}
