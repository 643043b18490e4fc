//! Catalog service layer
//!
//! `ProductService` runs the listing pipeline (filter, sort, paginate) and
//! the product pass-through CRUD. `StoreService` runs the store CRUD and the
//! per-store inventory summary. Both compute over a snapshot fetched at call
//! start and hold no state across calls.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;
use validator::Validate;

use crate::error::{InventoryError, Result};
use crate::models::{
    round2, CategoryCount, CreateProduct, CreateStore, PageMeta, Product, ProductFilter,
    ProductPage, ProductWithStore, SortOrder, Store, StoreSummary, UpdateProduct, UpdateStore,
    DEFAULT_SORT_KEY,
};
use crate::repository::{ProductRepository, StoreRepository};

/// Service layer for product listing and CRUD
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products with filtering, sorting, and pagination
    ///
    /// `sort_by` falls back to [`DEFAULT_SORT_KEY`], `sort_order` to
    /// ascending. Sort-key legality is left entirely to the storage
    /// collaborator; its error propagates unchanged. `page` and `page_size`
    /// must both be positive.
    #[instrument(skip(self, filter))]
    pub async fn list_products(
        &self,
        page: u64,
        page_size: u64,
        filter: &ProductFilter,
        sort_by: Option<&str>,
        sort_order: Option<SortOrder>,
    ) -> Result<ProductPage> {
        if page == 0 || page_size == 0 {
            return Err(InventoryError::Validation(
                "page and page_size must be positive".to_string(),
            ));
        }
        let sort_by = sort_by.unwrap_or(DEFAULT_SORT_KEY);
        let sort_order = sort_order.unwrap_or_default();

        let total = self.repository.count(filter).await?;
        let total_pages = total.div_ceil(page_size).max(1);
        let skip = (page - 1) * page_size;
        let items = self
            .repository
            .list_page(filter, sort_by, sort_order, skip, page_size)
            .await?;

        Ok(ProductPage {
            items,
            meta: PageMeta {
                page,
                page_size,
                total,
                total_pages,
                has_next: page < total_pages,
                has_prev: page > 1,
            },
        })
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> Result<ProductWithStore> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(InventoryError::ProductNotFound(id))
    }

    /// Create a product
    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn create_product(&self, input: CreateProduct) -> Result<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Update a product; at least one field must be provided
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> Result<Product> {
        input.validate()?;
        if input.is_empty() {
            return Err(InventoryError::Validation(
                "at least one field must be provided".to_string(),
            ));
        }
        self.repository.update(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(InventoryError::ProductNotFound(id));
        }
        Ok(())
    }
}

/// Per-store accumulator for one aggregation pass
#[derive(Debug, Default)]
struct SummaryAcc {
    total_value: f64,
    price_sum: f64,
    count: u64,
    low_stock: u64,
    /// category -> count in first-encountered order; the order is the
    /// tie-break for top-categories ranking
    categories: Vec<(String, u64)>,
}

/// Service layer for store CRUD and the inventory summary
#[derive(Clone)]
pub struct StoreService<S: StoreRepository, P: ProductRepository> {
    stores: Arc<S>,
    products: Arc<P>,
}

impl<S: StoreRepository, P: ProductRepository> StoreService<S, P> {
    pub fn new(stores: S, products: P) -> Self {
        Self {
            stores: Arc::new(stores),
            products: Arc::new(products),
        }
    }

    /// List all stores
    #[instrument(skip(self))]
    pub async fn list_stores(&self) -> Result<Vec<Store>> {
        self.stores.list(None).await
    }

    /// Get a store by ID
    #[instrument(skip(self))]
    pub async fn get_store(&self, id: i64) -> Result<Store> {
        self.stores
            .get_by_id(id)
            .await?
            .ok_or(InventoryError::StoreNotFound(id))
    }

    /// Create a store
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_store(&self, input: CreateStore) -> Result<Store> {
        input.validate()?;
        self.stores.create(input).await
    }

    /// Update a store; at least one field must be provided
    #[instrument(skip(self, input))]
    pub async fn update_store(&self, id: i64, input: UpdateStore) -> Result<Store> {
        input.validate()?;
        if input.is_empty() {
            return Err(InventoryError::Validation(
                "at least one field must be provided".to_string(),
            ));
        }
        self.stores.update(id, input).await
    }

    /// Delete a store
    #[instrument(skip(self))]
    pub async fn delete_store(&self, id: i64) -> Result<()> {
        if !self.stores.delete(id).await? {
            return Err(InventoryError::StoreNotFound(id));
        }
        Ok(())
    }

    /// Compute per-store inventory statistics
    ///
    /// Aggregates the matching product snapshot in one pass, grouping by
    /// store in first-encountered order. Stores with zero matching products
    /// produce no entry, even when named by `store_id`. `store_name` is
    /// `None` when the store record is missing from the roster.
    #[instrument(skip(self))]
    pub async fn store_summary(
        &self,
        store_id: Option<i64>,
        low_stock_threshold: i64,
    ) -> Result<Vec<StoreSummary>> {
        let products = self.products.list_all(store_id).await?;
        let stores = self.stores.list(store_id).await?;
        let names: HashMap<i64, String> = stores.into_iter().map(|s| (s.id, s.name)).collect();

        let mut groups: Vec<(i64, SummaryAcc)> = Vec::new();
        for product in &products {
            let idx = match groups.iter().position(|(id, _)| *id == product.store_id) {
                Some(idx) => idx,
                None => {
                    groups.push((product.store_id, SummaryAcc::default()));
                    groups.len() - 1
                }
            };
            let acc = &mut groups[idx].1;

            acc.total_value += product.price * product.quantity as f64;
            acc.price_sum += product.price;
            acc.count += 1;
            if product.quantity <= low_stock_threshold {
                acc.low_stock += 1;
            }
            match acc
                .categories
                .iter_mut()
                .find(|(name, _)| *name == product.category)
            {
                Some((_, n)) => *n += 1,
                None => acc.categories.push((product.category.clone(), 1)),
            }
        }

        let summaries = groups
            .into_iter()
            .map(|(store_id, acc)| {
                let mut categories = acc.categories;
                // stable sort keeps first-seen order for equal counts
                categories.sort_by(|a, b| b.1.cmp(&a.1));
                let top_categories = categories
                    .into_iter()
                    .take(3)
                    .map(|(category, count)| CategoryCount { category, count })
                    .collect();

                let avg_price = if acc.count > 0 {
                    round2(acc.price_sum / acc.count as f64)
                } else {
                    0.0
                };

                StoreSummary {
                    store_id,
                    store_name: names.get(&store_id).cloned(),
                    total_inventory_value: round2(acc.total_value),
                    total_products: acc.count,
                    low_stock_count: acc.low_stock,
                    avg_price,
                    top_categories,
                }
            })
            .collect();

        Ok(summaries)
    }
}
