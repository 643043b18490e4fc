//! Inventory catalog domain models

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Sort key applied by the service boundary when the caller supplies none.
pub const DEFAULT_SORT_KEY: &str = "name";

/// Low-stock threshold applied by calling boundaries when none is supplied.
/// Products with `quantity <= threshold` count as low-stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Round a monetary amount to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sort direction for product listings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Store entity - a physical or logical inventory location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Unique identifier
    pub id: i64,

    /// Store name
    pub name: String,

    /// Optional free-form location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Product entity - a sellable item owned by exactly one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: i64,

    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// Unit price, 2-decimal monetary semantics
    pub price: f64,

    /// Units on hand
    pub quantity: i64,

    /// Business identifier; uniqueness is intended but not enforced here
    pub sku: String,

    /// Owning store
    pub store_id: i64,
}

/// Listing projection: a product with its owning store attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithStore {
    #[serde(flatten)]
    pub product: Product,

    pub store: Store,
}

/// DTO for creating a store
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStore {
    #[validate(length(min = 2))]
    pub name: String,

    #[serde(default)]
    pub location: Option<String>,
}

/// DTO for updating a store
///
/// `location` is a double option: `None` leaves the location untouched,
/// `Some(None)` clears it, `Some(Some(v))` replaces it. In JSON, an absent
/// field reads as no-change and an explicit `null` as a clear.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStore {
    #[validate(length(min = 2))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
}

impl UpdateStore {
    /// True when the update carries no fields
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none()
    }
}

/// Maps a present field to `Some(_)`, so `null` becomes `Some(None)` rather
/// than collapsing into the absent case.
fn double_option<'de, T, D>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 2))]
    pub name: String,

    #[validate(length(min = 2))]
    pub category: String,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[validate(range(min = 0))]
    pub quantity: i64,

    #[validate(length(min = 3))]
    pub sku: String,

    #[validate(range(min = 1))]
    pub store_id: i64,
}

/// DTO for updating a product
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 2))]
    pub name: Option<String>,

    #[validate(length(min = 2))]
    pub category: Option<String>,

    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    #[validate(range(min = 0))]
    pub quantity: Option<i64>,

    #[validate(length(min = 3))]
    pub sku: Option<String>,

    #[validate(range(min = 1))]
    pub store_id: Option<i64>,
}

impl UpdateProduct {
    /// True when the update carries no fields
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.sku.is_none()
            && self.store_id.is_none()
    }
}

/// Filter options for querying products
///
/// Every dimension is optional; `None` means no constraint. `Some(0)` on a
/// lower bound is an active bound, never treated as absent. All present
/// dimensions are AND-combined; `search` is an OR-group of case-insensitive
/// substring matches over name, category, and sku.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Restrict to one store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,

    /// Category equality, case-insensitive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Inclusive lower price bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,

    /// Inclusive upper price bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,

    /// Inclusive lower quantity bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_qty: Option<i64>,

    /// Inclusive upper quantity bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_qty: Option<i64>,

    /// Free-text search over name, category, and sku
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Pagination metadata for a product listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// 1-based page number
    pub page: u64,

    /// Requested page size
    pub page_size: u64,

    /// Count of all matching records, ignoring pagination
    pub total: u64,

    /// `max(1, ceil(total / page_size))`
    pub total_pages: u64,

    pub has_next: bool,
    pub has_prev: bool,
}

/// One page of products plus its pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<ProductWithStore>,
    pub meta: PageMeta,
}

/// A category and how many matching products carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Per-store inventory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub store_id: i64,

    /// Absent when the store record is missing from the roster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,

    /// `round2(Σ price × quantity)` over the store's matching products
    pub total_inventory_value: f64,

    /// Count of matching products
    pub total_products: u64,

    /// Count of products with `quantity <= threshold`
    pub low_stock_count: u64,

    /// `round2(Σ price / n)`, 0 when the group is empty
    pub avg_price: f64,

    /// Up to 3 categories by descending count, ties in first-seen order
    pub top_categories: Vec<CategoryCount>,
}
