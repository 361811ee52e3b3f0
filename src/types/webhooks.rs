//! Webhook subscription and event types
//!
//! Trigger and payload enums carry an `Unknown` variant so values added on the
//! server side still decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{ListResponse, null_as_default};

/// Extra sections included in webhook deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookPayloadOption {
    Metadata,
    Fields,
    Products,
    Tokens,
    Pricing,
    #[serde(other)]
    Unknown,
}

/// Events that trigger a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookTrigger {
    RecipientCompleted,
    DocumentUpdated,
    DocumentDeleted,
    DocumentStateChanged,
    DocumentCreationFailed,
    DocumentCompletedPdfReady,
    DocumentSectionAdded,
    QuoteUpdated,
    TemplateCreated,
    TemplateUpdated,
    TemplateDeleted,
    ContentLibraryItemCreated,
    ContentLibraryItemCreationFailed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListWebhookSubscriptionsOptions {
    pub count: Option<u32>,
    pub page: Option<u32>,
}

/// Body for creating or updating a subscription. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebhookSubscriptionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<WebhookTrigger>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub payload: Vec<WebhookPayloadOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSubscription {
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(rename = "workspace_id")]
    pub workspace: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    pub status: Option<String>,
    pub shared_key: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub triggers: Vec<WebhookTrigger>,
    #[serde(deserialize_with = "null_as_default")]
    pub payload: Vec<WebhookPayloadOption>,
}

pub type WebhookSubscriptionListResponse = ListResponse<WebhookSubscription>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateWebhookSubscriptionSharedKeyResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub shared_key: String,
}

/// Filters for the webhook event log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListWebhookEventsOptions {
    pub since: Option<String>,
    pub to: Option<String>,
    /// Sent as `type`
    pub event_type: Option<String>,
    /// Zero is treated as unset
    pub http_status_code: Option<u16>,
    pub error: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookEventItem {
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub http_status_code: Option<u16>,
    pub delivery_time: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub error: bool,
}

pub type WebhookEventListResponse = ListResponse<WebhookEventItem>;

/// Full delivery record for one webhook event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookEventDetailsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub event_time: Option<String>,
    pub delivery_time: Option<String>,
    pub url: Option<String>,
    pub http_status_code: Option<u16>,
    #[serde(deserialize_with = "null_as_default")]
    pub error: bool,
    pub request_body: Option<Value>,
    pub response_body: Option<Value>,
    pub response_headers: Option<Value>,
    pub signature: Option<String>,
}
