//! Inventory Catalog Domain
//!
//! Stores own products; this crate exposes a filtered, sorted, paginated
//! product listing pipeline and a per-store inventory summary engine over
//! the same product collection, plus the pass-through CRUD around them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← query pipeline, summary aggregation, CRUD
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← storage collaborator (traits + in-memory impl)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entities, DTOs, filters, pagination metadata
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{
//!     InMemoryCatalog, ProductFilter, ProductService, StoreService,
//!     DEFAULT_LOW_STOCK_THRESHOLD,
//! };
//!
//! # async fn demo() -> domain_inventory::Result<()> {
//! let catalog = InMemoryCatalog::new();
//! let products = ProductService::new(catalog.clone());
//! let stores = StoreService::new(catalog.clone(), catalog);
//!
//! let page = products
//!     .list_products(1, 20, &ProductFilter::default(), None, None)
//!     .await?;
//! let summaries = stores
//!     .store_summary(None, DEFAULT_LOW_STOCK_THRESHOLD)
//!     .await?;
//! # let _ = (page, summaries);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{InventoryError, Result};
pub use memory::InMemoryCatalog;
pub use models::{
    round2, CategoryCount, CreateProduct, CreateStore, PageMeta, Product, ProductFilter,
    ProductPage, ProductWithStore, SortOrder, Store, StoreSummary, UpdateProduct, UpdateStore,
    DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_SORT_KEY,
};
pub use repository::{ProductRepository, StoreRepository};
pub use service::{ProductService, StoreService};
