//! Tests against a running server.
//!
//! These tests require:
//! - The API running with the demo fixture loaded
//!   (`NORTHWIND_SEED_FILE=crates/api/fixtures/northwind.yaml cargo run -p northwind-api`)
//! - `NORTHWIND_BASE_URL` if it does not listen on `http://localhost:5000`
//!
//! To exercise the `PostgreSQL` store, migrate and seed a database with
//! `nw-cli migrate` and `nw-cli seed crates/api/fixtures/northwind.yaml`, then
//! start the API with `NORTHWIND_SERVICE_TYPE=postgres`.
//!
//! Run with: cargo test -p northwind-integration-tests -- --ignored

use northwind_integration_tests::base_url;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_health_endpoints() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to call /health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to call /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_customer_round_trip() {
    let client = client();
    let base_url = base_url();
    let customer = json!({ "id": "LIVE1", "companyName": "Live Test Ltd" });

    let resp = client
        .post(format!("{base_url}/api/customers"))
        .json(&customer)
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let fetched: Value = client
        .get(format!("{base_url}/api/customers/LIVE1"))
        .send()
        .await
        .expect("Failed to get customer")
        .json()
        .await
        .expect("Failed to parse customer");
    assert_eq!(fetched["companyName"], "Live Test Ltd");

    let resp = client
        .delete(format!("{base_url}/api/customers/LIVE1"))
        .send()
        .await
        .expect("Failed to delete customer");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_article_listing_has_author_names() {
    let client = client();
    let base_url = base_url();

    let articles: Vec<Value> = client
        .get(format!("{base_url}/api/articles?limit=50"))
        .send()
        .await
        .expect("Failed to list articles")
        .json()
        .await
        .expect("Failed to parse articles");

    assert!(!articles.is_empty());
    for article in &articles {
        assert!(article["authorName"].is_string());
    }
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_category_picture_upload() {
    let client = client();
    let base_url = base_url();
    let picture: Vec<u8> = vec![0xFF, 0xD8, 0xFF, 0xE0];

    let resp = client
        .put(format!("{base_url}/api/categories/1/picture"))
        .header("content-type", "image/jpeg")
        .body(picture.clone())
        .send()
        .await
        .expect("Failed to upload picture");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base_url}/api/categories/1/picture"))
        .send()
        .await
        .expect("Failed to download picture");
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.bytes().await.expect("Failed to read picture");
    assert_eq!(bytes.as_ref(), picture.as_slice());
}

/// Default `NORTHWIND_PICTURE_MAX_FILE_SIZE` of the server.
const SERVER_PICTURE_MAX_FILE_SIZE: usize = 1_048_576;

async fn first_id(client: &Client, base_url: &str, resource: &str) -> i64 {
    let items: Vec<Value> = client
        .get(format!("{base_url}/api/{resource}?limit=1"))
        .send()
        .await
        .expect("Failed to list resource")
        .json()
        .await
        .expect("Failed to parse listing");
    items
        .first()
        .and_then(|item| item["id"].as_i64())
        .expect("Listing is empty")
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_missing_product_is_not_found() {
    let client = client();
    let base_url = base_url();
    let missing = 999_999;

    let resp = client
        .get(format!("{base_url}/api/products/{missing}"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .put(format!("{base_url}/api/products/{missing}"))
        .json(&json!({ "id": missing, "name": "Nowhere", "discontinued": false }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{base_url}/api/products/{missing}"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_repeated_link_conflicts() {
    let client = client();
    let base_url = base_url();
    let article_id = first_id(&client, &base_url, "articles").await;
    let product_id = first_id(&client, &base_url, "products").await;
    let link_url = format!("{base_url}/api/articles/{article_id}/products/{product_id}");

    // The pair may already be linked by the fixture; make sure it is.
    let resp = client
        .post(&link_url)
        .send()
        .await
        .expect("Failed to link product");
    assert!(matches!(
        resp.status(),
        StatusCode::CREATED | StatusCode::CONFLICT
    ));

    let before: Vec<Value> = client
        .get(format!("{base_url}/api/articles/{article_id}/products"))
        .send()
        .await
        .expect("Failed to list related products")
        .json()
        .await
        .expect("Failed to parse related products");

    let resp = client
        .post(&link_url)
        .send()
        .await
        .expect("Failed to link product");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let after: Vec<Value> = client
        .get(format!("{base_url}/api/articles/{article_id}/products"))
        .send()
        .await
        .expect("Failed to list related products")
        .json()
        .await
        .expect("Failed to parse related products");
    assert_eq!(after.len(), before.len());
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_oversized_picture_keeps_previous() {
    let client = client();
    let base_url = base_url();
    let category_id = first_id(&client, &base_url, "categories").await;
    let picture_url = format!("{base_url}/api/categories/{category_id}/picture");
    let picture: Vec<u8> = vec![0xFF, 0xD8, 0xFF, 0xDB];

    let resp = client
        .put(&picture_url)
        .header("content-type", "image/jpeg")
        .body(picture.clone())
        .send()
        .await
        .expect("Failed to upload picture");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .put(&picture_url)
        .header("content-type", "image/jpeg")
        .body(vec![0_u8; SERVER_PICTURE_MAX_FILE_SIZE + 1])
        .send()
        .await
        .expect("Failed to upload oversized picture");
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let bytes = client
        .get(&picture_url)
        .send()
        .await
        .expect("Failed to download picture")
        .bytes()
        .await
        .expect("Failed to read picture");
    assert_eq!(bytes.as_ref(), picture.as_slice());
}
