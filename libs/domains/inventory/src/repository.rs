//! Storage collaborator traits for the inventory catalog

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    CreateProduct, CreateStore, Product, ProductFilter, ProductWithStore, SortOrder, Store,
    UpdateProduct, UpdateStore,
};

/// Repository trait for product storage operations
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product; the referenced store must exist
    async fn create(&self, input: CreateProduct) -> Result<Product>;

    /// Get a product by ID with its owning store attached
    async fn get_by_id(&self, id: i64) -> Result<Option<ProductWithStore>>;

    /// Count products matching the filter, ignoring pagination
    async fn count(&self, filter: &ProductFilter) -> Result<u64>;

    /// Fetch one ordered slice of matching products, owning store attached
    ///
    /// `sort_by` legality is this collaborator's concern; an unknown key is
    /// an `UnsupportedSortKey` error.
    async fn list_page(
        &self,
        filter: &ProductFilter,
        sort_by: &str,
        sort_order: SortOrder,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<ProductWithStore>>;

    /// Fetch the full product snapshot, optionally scoped to one store
    async fn list_all(&self, store_id: Option<i64>) -> Result<Vec<Product>>;

    /// Update an existing product
    async fn update(&self, id: i64, input: UpdateProduct) -> Result<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Repository trait for store storage operations
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Create a new store
    async fn create(&self, input: CreateStore) -> Result<Store>;

    /// Get a store by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Store>>;

    /// List stores, optionally narrowed to a single id
    async fn list(&self, id_filter: Option<i64>) -> Result<Vec<Store>>;

    /// Update an existing store
    async fn update(&self, id: i64, input: UpdateStore) -> Result<Store>;

    /// Delete a store by ID; referential-integrity policy lives here
    async fn delete(&self, id: i64) -> Result<bool>;
}
