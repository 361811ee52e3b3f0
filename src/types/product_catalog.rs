//! Product catalog types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{RawObject, null_as_default};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCatalogItemType {
    Regular,
    Bundle,
}

impl ProductCatalogItemType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Bundle => "bundle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCatalogBillingType {
    OneTime,
    Recurring,
}

impl ProductCatalogBillingType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Recurring => "recurring",
        }
    }
}

/// Filters for catalog search. Unset fields are not sent; list fields are
/// sent as repeated query keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchProductCatalogItemsOptions {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub query: Option<String>,
    pub order_by: Option<String>,
    pub types: Vec<ProductCatalogItemType>,
    pub billing_types: Vec<ProductCatalogBillingType>,
    pub exclude_uuids: Vec<String>,
    pub category_id: Option<String>,
    pub no_category: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchProductCatalogItemsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<ProductCatalogSearchItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_more_items: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
}

/// One search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductCatalogSearchItem {
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
    pub workspace_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub billing_type: Option<String>,
    pub billing_cycle: Option<i64>,
    pub currency: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub date_created: Option<String>,
    pub date_modified: Option<String>,
    pub pricing_method: Option<i64>,
    pub bundle_items_count: Option<i64>,
    pub image_src: Option<String>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub min_tier_value: Option<f64>,
    pub max_tier_value: Option<f64>,
    pub custom_fields: Option<Value>,
    pub images: Option<Value>,
    pub highlights: Option<Value>,
    pub tiers: Option<Value>,
}

pub type CreateProductCatalogItemRequest = RawObject;
pub type UpdateProductCatalogItemRequest = RawObject;

/// Returned by the create, get and update item endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductCatalogItemResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub date_created: Option<String>,
    pub date_modified: Option<String>,
    pub default_price_configuration: Option<Value>,
    pub variants: Option<Value>,
    pub bundle_items: Option<Value>,
}
