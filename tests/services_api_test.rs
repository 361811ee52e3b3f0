//! Product catalog, OAuth and webhook services against a mock server

mod support;

use pandadoc::prelude::*;
use serde_json::json;
use support::{anonymous_client, client_for};
use wiremock::matchers::{body_json, body_string, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_catalog_search_repeats_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/v2/product-catalog/items/search"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"uuid": "i-1", "title": "Seat", "billing_type": "recurring", "price": 9.5}],
            "has_more_items": false,
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = SearchProductCatalogItemsOptions {
        per_page: Some(5),
        types: vec![ProductCatalogItemType::Regular, ProductCatalogItemType::Bundle],
        billing_types: vec![ProductCatalogBillingType::OneTime],
        ..Default::default()
    };
    let client = client_for(&server);
    let found = client.product_catalog().search(&opts).await.unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].title, "Seat");

    let requests = server.received_requests().await.unwrap();
    let types: Vec<String> = requests[0]
        .url
        .query_pairs()
        .filter(|(k, _)| k == "types")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(types, vec!["regular", "bundle"]);
}

#[tokio::test]
async fn test_catalog_item_crud() {
    let server = MockServer::start().await;
    let item = json!({"uuid": "i-1", "title": "Seat", "type": "regular"});
    Mock::given(method("POST"))
        .and(path("/public/v2/product-catalog/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public/v2/product-catalog/items/i-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/public/v2/product-catalog/items/i-1"))
        .and(body_json(json!({"title": "Seat+"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uuid": "i-1", "title": "Seat+"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/public/v2/product-catalog/items/i-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let catalog = client.product_catalog();
    let mut body = RawObject::new();
    body.insert("title".into(), json!("Seat"));
    assert_eq!(catalog.create(&body).await.unwrap().uuid, "i-1");
    assert_eq!(
        catalog.get("i-1").await.unwrap().item_type.as_deref(),
        Some("regular")
    );

    body.insert("title".into(), json!("Seat+"));
    assert_eq!(catalog.update("i-1", &body).await.unwrap().title, "Seat+");
    catalog.delete("i-1").await.unwrap();
}

#[tokio::test]
async fn test_oauth_token_uses_form_without_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "grant_type=authorization_code&client_id=cid&client_secret=s%26cret&code=abc",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "at-1",
            "refresh_token": "rt-1",
            "token_type": "Bearer",
            "expires_in": 31535999
        })))
        .expect(1)
        .mount(&server)
        .await;

    let req = OAuthTokenRequest::authorization_code("cid", "s&cret", "abc");
    let token = anonymous_client(&server).oauth().token(&req).await.unwrap();
    assert_eq!(token.access_token, "at-1");
    assert_eq!(token.refresh_token.as_deref(), Some("rt-1"));
    assert_eq!(token.expires_in, 31_535_999);

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_oauth_token_still_sends_configured_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "at-2"})))
        .expect(1)
        .mount(&server)
        .await;

    let req = OAuthTokenRequest::refresh_token("cid", "secret", "rt-1");
    let token = client_for(&server).oauth().token(&req).await.unwrap();
    assert_eq!(token.access_token, "at-2");
}

#[tokio::test]
async fn test_webhook_subscription_lifecycle() {
    let server = MockServer::start().await;
    let subscription = json!({
        "uuid": "w-1",
        "name": "CRM sync",
        "url": "https://hooks.test/pd",
        "active": true,
        "triggers": ["document_state_changed", "something_new"],
        "payload": ["fields"]
    });
    Mock::given(method("GET"))
        .and(path("/public/v1/webhook-subscriptions"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [subscription.clone()]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/public/v1/webhook-subscriptions"))
        .and(body_json(json!({
            "name": "CRM sync",
            "url": "https://hooks.test/pd",
            "triggers": ["document_state_changed"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(subscription.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public/v1/webhook-subscriptions/w-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(subscription.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/public/v1/webhook-subscriptions/w-1"))
        .and(body_json(json!({"active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uuid": "w-1", "active": false})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/public/v1/webhook-subscriptions/w-1/shared-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shared_key": "new-key"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/public/v1/webhook-subscriptions/w-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let subs = client.webhook_subscriptions();

    let listed = subs
        .list(&ListWebhookSubscriptionsOptions {
            count: Some(10),
            page: None,
        })
        .await
        .unwrap();
    assert_eq!(
        listed.items[0].triggers,
        vec![WebhookTrigger::DocumentStateChanged, WebhookTrigger::Unknown]
    );

    let created = subs
        .create(&WebhookSubscriptionRequest {
            name: Some("CRM sync".into()),
            url: Some("https://hooks.test/pd".into()),
            triggers: vec![WebhookTrigger::DocumentStateChanged],
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(created.active);
    assert_eq!(created.payload, vec![WebhookPayloadOption::Fields]);

    assert_eq!(subs.get("w-1").await.unwrap().uuid, "w-1");

    let updated = subs
        .update(
            "w-1",
            &WebhookSubscriptionRequest {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!updated.active);

    assert_eq!(subs.regenerate_shared_key("w-1").await.unwrap().shared_key, "new-key");
    subs.delete("w-1").await.unwrap();
}

#[tokio::test]
async fn test_webhook_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/v1/webhook-events"))
        .and(query_param("type", "document_state_changed"))
        .and(query_param("http_status_code", "500"))
        .and(query_param("error", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"uuid": "e-1", "type": "document_state_changed", "http_status_code": 500, "error": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public/v1/webhook-events/e-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "e-1",
            "error": true,
            "request_body": {"event": "document_state_changed"},
            "response_body": "upstream down",
            "signature": "abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let events = client.webhook_events();
    let listed = events
        .list(&ListWebhookEventsOptions {
            event_type: Some("document_state_changed".into()),
            http_status_code: Some(500),
            error: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.items[0].http_status_code, Some(500));

    let event = events.get("e-1").await.unwrap();
    assert!(event.error);
    assert_eq!(event.request_body, Some(json!({"event": "document_state_changed"})));
    assert_eq!(event.signature.as_deref(), Some("abc123"));

    let err = events.get("").await.unwrap_err();
    assert!(matches!(err, PandaDocError::EmptyPathParameter("id")));
}
