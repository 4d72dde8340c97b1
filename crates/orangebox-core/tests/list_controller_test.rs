// End-to-end list controller behavior against a mocked backend.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orangebox_core::{
    ApiClient, AppState, ClientConfig, CoreError, EntityId, ListController, LoadState, Product,
    ProductSortField, PromptState,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient, Arc<AppState>) {
    let server = MockServer::start().await;
    let cfg = ClientConfig::new(format!("{}/api", server.uri()).parse().unwrap());
    let client = cfg.build_client().unwrap();
    (server, client, Arc::new(AppState::new()))
}

fn product_json(id: i64, name: &str) -> Value {
    json!({
        "id": id, "name": name, "price": "10.00", "description": "",
        "stock": 1, "provider_id": 1, "provider_name": "Acme"
    })
}

fn page_json(rows: &[Value], total: i64, has_next: bool) -> Value {
    let (from, to) = if rows.is_empty() {
        (Value::Null, Value::Null)
    } else {
        (json!(1), json!(rows.len()))
    };
    let next = if has_next {
        json!("http://x/api/products?page=2")
    } else {
        Value::Null
    };
    json!({
        "data": rows,
        "pagination": {
            "per_page": 5,
            "from": from,
            "to": to,
            "total": total,
            "links": { "next_page_url": next, "prev_page_url": null }
        }
    })
}

async fn load_initial(
    server: &MockServer,
    client: &ApiClient,
    state: &Arc<AppState>,
) -> ListController<Product> {
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "1"))
        .and(query_param("sort", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            &[product_json(3, "Crate"), product_json(7, "Anvil"), product_json(9, "Bolt")],
            3,
            false,
        )))
        .mount(server)
        .await;

    let mut list = ListController::<Product>::new(Arc::clone(state));
    let req = list.reload();
    assert!(list.execute(client, req).await.unwrap());
    list
}

fn ids(list: &ListController<Product>) -> Vec<i64> {
    list.snapshot().items.iter().map(|p| p.id.get()).collect()
}

// ── Fetching ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_collection_mirrors_backend_page_exactly() {
    let (server, client, state) = setup().await;
    let list = load_initial(&server, &client, &state).await;

    // Backend order is kept verbatim, no local re-sort.
    assert_eq!(ids(&list), vec![3, 7, 9]);
    assert_eq!(list.page_info().summary(), "Showing 1 to 3 of 3 entries");
    assert!(!list.page_info().has_next);
    assert_eq!(list.load_state(), &LoadState::Idle);
}

#[tokio::test]
async fn test_toggling_name_twice_sends_asc_then_desc() {
    let (server, client, state) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "1"))
        .and(query_param("sort", "name"))
        .and(query_param("direction", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            &[product_json(7, "Anvil"), product_json(9, "Bolt")],
            2,
            false,
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "1"))
        .and(query_param("sort", "name"))
        .and(query_param("direction", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            &[product_json(9, "Bolt"), product_json(7, "Anvil")],
            2,
            false,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut list = ListController::<Product>::new(Arc::clone(&state));

    let req = list.toggle_sort(ProductSortField::Name);
    list.execute(&client, req).await.unwrap();
    assert_eq!(ids(&list), vec![7, 9]);

    let req = list.toggle_sort(ProductSortField::Name);
    list.execute(&client, req).await.unwrap();
    assert_eq!(ids(&list), vec![9, 7]);
}

#[tokio::test]
async fn test_filter_is_sent_as_search() {
    let (server, client, state) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "anv"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(&[product_json(7, "Anvil")], 1, false)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut list = ListController::<Product>::new(Arc::clone(&state));
    let req = list.set_filter("anv");
    list.execute(&client, req).await.unwrap();
    assert_eq!(ids(&list), vec![7]);
}

#[tokio::test]
async fn test_failed_fetch_keeps_rows_and_reports_failure() {
    let (server, client, state) = setup().await;
    let mut list = load_initial(&server, &client, &state).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Server Error" })))
        .mount(&server)
        .await;

    let req = list.set_page(2);
    let err = list.execute(&client, req).await.unwrap_err();

    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    assert!(matches!(list.load_state(), LoadState::Failed(msg) if msg.contains("Server Error")));
    assert_eq!(ids(&list), vec![3, 7, 9]);
}

#[tokio::test]
async fn test_out_of_order_responses_keep_latest() {
    let (server, client, state) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "old"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(&[product_json(1, "Old")], 1, false)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "new"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(&[product_json(2, "New")], 1, false)),
        )
        .mount(&server)
        .await;

    let mut list = ListController::<Product>::new(Arc::clone(&state));
    let older = list.set_filter("old");
    let newer = list.set_filter("new");

    // Both in flight; the newer one finishes first.
    let older_task = tokio::spawn(older.run(client.clone()));
    let newer_outcome = newer.run(client.clone()).await;
    assert!(list.apply_fetch(newer_outcome).unwrap());

    let older_outcome = older_task.await.unwrap();
    assert!(!list.apply_fetch(older_outcome).unwrap());

    assert_eq!(ids(&list), vec![2]);
    assert_eq!(list.query().filter, "new");
}

// ── Delete workflow ─────────────────────────────────────────────────

#[tokio::test]
async fn test_cancelled_delete_issues_no_request() {
    let (server, client, state) = setup().await;
    let mut list = load_initial(&server, &client, &state).await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    list.request_delete(EntityId::new(7));
    assert_eq!(
        list.prompt_state(),
        PromptState::ConfirmPending { id: EntityId::new(7) }
    );
    list.cancel_delete();

    assert_eq!(list.prompt_state(), PromptState::Closed);
    assert!(!list.execute_delete(&client).await.unwrap());
    assert_eq!(ids(&list), vec![3, 7, 9]);
}

#[tokio::test]
async fn test_confirmed_delete_removes_only_that_row() {
    let (server, client, state) = setup().await;
    let mut list = load_initial(&server, &client, &state).await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    list.request_delete(EntityId::new(7));
    assert!(list.execute_delete(&client).await.unwrap());

    assert_eq!(list.prompt_state(), PromptState::Closed);
    assert_eq!(ids(&list), vec![3, 9]);
}

#[tokio::test]
async fn test_failed_delete_keeps_row() {
    let (server, client, state) = setup().await;
    let mut list = load_initial(&server, &client, &state).await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "gone" })))
        .expect(1)
        .mount(&server)
        .await;

    list.request_delete(EntityId::new(7));
    let err = list.execute_delete(&client).await.unwrap_err();

    assert_eq!(err.to_string(), "Product not found: 7");
    assert_eq!(list.prompt_state(), PromptState::Closed);
    assert_eq!(ids(&list), vec![3, 7, 9]);
}
