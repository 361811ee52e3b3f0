//! Product catalog API

use super::QueryPairs;
use crate::client::Client;
use crate::error::Result;
use crate::execution::{RequestDescriptor, escape_path_param};
use crate::types::{
    CreateProductCatalogItemRequest, ProductCatalogItemResponse, SearchProductCatalogItemsOptions,
    SearchProductCatalogItemsResponse, UpdateProductCatalogItemRequest,
};

const ITEMS_PATH: &str = "/public/v2/product-catalog/items";

/// Catalog item operations, obtained from [`Client::product_catalog`].
#[derive(Debug, Clone, Copy)]
pub struct ProductCatalogService<'a> {
    client: &'a Client,
}

impl<'a> ProductCatalogService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn search(
        &self,
        opts: &SearchProductCatalogItemsOptions,
    ) -> Result<SearchProductCatalogItemsResponse> {
        let request =
            RequestDescriptor::get(format!("{ITEMS_PATH}/search")).queries(search_query(opts));
        self.client.fetch(request).await
    }

    pub async fn create(
        &self,
        body: &CreateProductCatalogItemRequest,
    ) -> Result<ProductCatalogItemResponse> {
        let request = RequestDescriptor::post(ITEMS_PATH).json(body);
        self.client.fetch(request).await
    }

    pub async fn get(&self, item_uuid: &str) -> Result<ProductCatalogItemResponse> {
        let request = RequestDescriptor::get(item_path(item_uuid)?);
        self.client.fetch(request).await
    }

    pub async fn update(
        &self,
        item_uuid: &str,
        body: &UpdateProductCatalogItemRequest,
    ) -> Result<ProductCatalogItemResponse> {
        let request = RequestDescriptor::patch(item_path(item_uuid)?).json(body);
        self.client.fetch(request).await
    }

    /// Delete an item. Any 2xx response counts as success.
    pub async fn delete(&self, item_uuid: &str) -> Result<()> {
        let request = RequestDescriptor::delete(item_path(item_uuid)?);
        self.client.execute_no_content(request).await
    }
}

fn item_path(item_uuid: &str) -> Result<String> {
    let uuid = escape_path_param("item_uuid", item_uuid)?;
    Ok(format!("{ITEMS_PATH}/{uuid}"))
}

fn search_query(opts: &SearchProductCatalogItemsOptions) -> Vec<(String, String)> {
    let mut query = QueryPairs::new();
    query.set_if_positive("page", opts.page);
    query.set_if_positive("per_page", opts.per_page);
    query.set_if_not_empty("query", opts.query.as_deref());
    query.set_if_not_empty("order_by", opts.order_by.as_deref());
    for item_type in &opts.types {
        query.add("types", item_type.as_str());
    }
    for billing_type in &opts.billing_types {
        query.add("billing_types", billing_type.as_str());
    }
    for uuid in &opts.exclude_uuids {
        query.add("exclude_uuids", uuid.as_str());
    }
    query.set_if_not_empty("category_id", opts.category_id.as_deref());
    query.set_bool("no_category", opts.no_category);
    query.into_pairs()
}
