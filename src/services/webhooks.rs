//! Webhook subscriptions and the webhook event log

use reqwest::StatusCode;

use super::QueryPairs;
use crate::client::Client;
use crate::error::Result;
use crate::execution::{RequestDescriptor, escape_path_param};
use crate::types::{
    ListWebhookEventsOptions, ListWebhookSubscriptionsOptions,
    UpdateWebhookSubscriptionSharedKeyResponse, WebhookEventDetailsResponse,
    WebhookEventListResponse, WebhookSubscription, WebhookSubscriptionListResponse,
    WebhookSubscriptionRequest,
};

const SUBSCRIPTIONS_PATH: &str = "/public/v1/webhook-subscriptions";
const EVENTS_PATH: &str = "/public/v1/webhook-events";

/// Obtained from [`Client::webhook_subscriptions`].
#[derive(Debug, Clone, Copy)]
pub struct WebhookSubscriptionsService<'a> {
    client: &'a Client,
}

impl<'a> WebhookSubscriptionsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        opts: &ListWebhookSubscriptionsOptions,
    ) -> Result<WebhookSubscriptionListResponse> {
        let mut query = QueryPairs::new();
        query.set_if_positive("count", opts.count);
        query.set_if_positive("page", opts.page);
        let request = RequestDescriptor::get(SUBSCRIPTIONS_PATH).queries(query.into_pairs());
        self.client.fetch(request).await
    }

    pub async fn create(&self, body: &WebhookSubscriptionRequest) -> Result<WebhookSubscription> {
        let request = RequestDescriptor::post(SUBSCRIPTIONS_PATH)
            .json(body)
            .expect_status(StatusCode::CREATED);
        self.client.fetch(request).await
    }

    pub async fn get(&self, id: &str) -> Result<WebhookSubscription> {
        let request = RequestDescriptor::get(subscription_path(id, "")?);
        self.client.fetch(request).await
    }

    pub async fn update(
        &self,
        id: &str,
        body: &WebhookSubscriptionRequest,
    ) -> Result<WebhookSubscription> {
        let request = RequestDescriptor::patch(subscription_path(id, "")?).json(body);
        self.client.fetch(request).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let request = RequestDescriptor::delete(subscription_path(id, "")?)
            .expect_status(StatusCode::NO_CONTENT);
        self.client.execute_no_content(request).await
    }

    /// Rotate the key used to sign deliveries.
    pub async fn regenerate_shared_key(
        &self,
        id: &str,
    ) -> Result<UpdateWebhookSubscriptionSharedKeyResponse> {
        let request = RequestDescriptor::patch(subscription_path(id, "/shared-key")?);
        self.client.fetch(request).await
    }
}

fn subscription_path(id: &str, suffix: &str) -> Result<String> {
    let id = escape_path_param("id", id)?;
    Ok(format!("{SUBSCRIPTIONS_PATH}/{id}{suffix}"))
}

/// Obtained from [`Client::webhook_events`].
#[derive(Debug, Clone, Copy)]
pub struct WebhookEventsService<'a> {
    client: &'a Client,
}

impl<'a> WebhookEventsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, opts: &ListWebhookEventsOptions) -> Result<WebhookEventListResponse> {
        let request = RequestDescriptor::get(EVENTS_PATH).queries(events_query(opts));
        self.client.fetch(request).await
    }

    pub async fn get(&self, id: &str) -> Result<WebhookEventDetailsResponse> {
        let id = escape_path_param("id", id)?;
        let request = RequestDescriptor::get(format!("{EVENTS_PATH}/{id}"));
        self.client.fetch(request).await
    }
}

fn events_query(opts: &ListWebhookEventsOptions) -> Vec<(String, String)> {
    let mut query = QueryPairs::new();
    query.set_if_not_empty("since", opts.since.as_deref());
    query.set_if_not_empty("to", opts.to.as_deref());
    query.set_if_not_empty("type", opts.event_type.as_deref());
    query.set_if_positive("http_status_code", opts.http_status_code);
    query.set_bool("error", opts.error);
    query.into_pairs()
}
