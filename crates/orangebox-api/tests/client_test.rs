// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orangebox_api::{
    ApiClient, Error, ListParams, ProductPayload, ProviderPayload, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client =
        ApiClient::from_reqwest(&format!("{}/api", server.uri()), reqwest::Client::new()).unwrap();
    (server, client)
}

fn page_params() -> ListParams {
    ListParams {
        page: Some(1),
        per_page: Some(5),
        sort: Some("name".into()),
        direction: Some("asc".into()),
        search: Some(String::new()),
    }
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_products_sends_query_and_parses_pagination() {
    let (server, client) = setup().await;

    let body = json!({
        "data": [
            { "id": 1, "name": "Anvil", "price": "99.90", "description": "heavy",
              "stock": 3, "provider_id": 2, "provider_name": "Acme" },
            { "id": 4, "name": "Bolt", "price": 0.25, "description": null,
              "stock": 400, "provider_id": 2, "provider_name": "Acme" },
        ],
        "pagination": {
            "per_page": 5, "from": 1, "to": 2, "total": 2,
            "links": { "next_page_url": null, "prev_page_url": null }
        }
    });

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "5"))
        .and(query_param("sort", "name"))
        .and(query_param("direction", "asc"))
        .and(query_param("search", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.list_products(&page_params()).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].name, "Anvil");
    assert_eq!(page.data[1].description, None);
    let pagination = page.pagination.unwrap();
    assert_eq!(pagination.from, Some(1));
    assert_eq!(pagination.to, Some(2));
    assert_eq!(pagination.total, 2);
    assert_eq!(pagination.links.next_page_url, None);
}

#[tokio::test]
async fn test_list_all_providers_uses_per_page_minus_one() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/providers"))
        .and(query_param("per_page", "-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "name": "Acme", "address": "1 Road", "phone": "555", "description": "" },
                { "id": 2, "name": "Globex", "address": "2 Road", "phone": "556", "description": "" },
            ]
        })))
        .mount(&server)
        .await;

    let providers = client.list_all_providers().await.unwrap();
    let names: Vec<_> = providers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Acme", "Globex"]);
}

#[tokio::test]
async fn test_get_product_unwraps_data_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": 9, "name": "Crate", "price": 12, "description": "pine",
                      "stock": 7, "provider_id": 1 }
        })))
        .mount(&server)
        .await;

    let product = client.get_product(9).await.unwrap();
    assert_eq!(product.id, 9);
    assert_eq!(product.provider_id, Some(1));
    assert_eq!(product.provider_name, None);
}

#[tokio::test]
async fn test_create_product_posts_payload() {
    let (server, client) = setup().await;

    let payload = ProductPayload {
        name: "Drill".into(),
        price: 49.5,
        description: "cordless".into(),
        stock: 10,
        provider_id: 3,
    };

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(body_json(json!({
            "name": "Drill", "price": 49.5, "description": "cordless",
            "stock": 10, "provider_id": 3
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": 11, "name": "Drill", "price": "49.50", "description": "cordless",
                      "stock": 10, "provider_id": 3, "provider_name": "Tools Inc" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_product(&payload).await.unwrap();
    assert_eq!(created.id, 11);
    assert_eq!(created.provider_name.as_deref(), Some("Tools Inc"));
}

#[tokio::test]
async fn test_update_provider_puts_payload() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/providers/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": 2, "name": "Globex Corp", "address": "2 Road",
                      "phone": "556", "description": "renamed" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .update_provider(
            2,
            &ProviderPayload {
                name: "Globex Corp".into(),
                address: "2 Road".into(),
                phone: "556".into(),
                description: "renamed".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Globex Corp");
}

#[tokio::test]
async fn test_delete_product_accepts_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_product(5).await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_404_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/providers/99"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "message": "No query results for model [Provider] 99" })),
        )
        .mount(&server)
        .await;

    let err = client.get_provider(99).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(
        matches!(&err, Error::Api { status: 404, message } if message.contains("No query results"))
    );
}

#[tokio::test]
async fn test_error_422_validation_lists_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/providers"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The given data was invalid.",
            "errors": { "name": ["The name field is required."] }
        })))
        .mount(&server)
        .await;

    let err = client
        .create_provider(&ProviderPayload {
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            description: String::new(),
        })
        .await
        .unwrap_err();

    assert!(err.is_validation());
    match err {
        Error::Api { message, .. } => {
            assert_eq!(
                message,
                "The given data was invalid. (name: The name field is required.)"
            );
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_500_plain_text_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.delete_product(1).await.unwrap_err();
    assert!(err.is_transient());
    assert!(matches!(err, Error::Api { status: 500, ref message } if message == "boom"));
}

#[tokio::test]
async fn test_malformed_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_products(&ListParams::default()).await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_timeout(Duration::from_millis(200));
    let client = ApiClient::new(&format!("{}/api", server.uri()), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/providers/1"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = client.get_provider(1).await.unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }), "got {err:?}");
    assert!(err.is_transient());
}
