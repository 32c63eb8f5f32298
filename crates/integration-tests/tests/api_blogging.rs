//! Blog endpoints: articles, related products and comments.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use northwind_integration_tests::TestApp;
use serde_json::json;

// ============================================================================
// Articles
// ============================================================================

#[tokio::test]
async fn test_article_listing_uses_author_name() {
    let app = TestApp::seeded().await;

    let resp = app.get("/api/articles").await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    let articles = body.as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["title"], "Tea season is here");
    assert_eq!(articles[0]["authorName"], "Steven Buchanan, Sales Manager");
    assert!(articles[0].get("text").is_none());
}

#[tokio::test]
async fn test_article_without_author() {
    let app = TestApp::seeded().await;

    assert_eq!(
        app.delete("/api/employees/1").await.status,
        StatusCode::NO_CONTENT
    );

    let listing = app.get("/api/articles").await.json();
    assert_eq!(listing.as_array().unwrap().len(), 1);

    let full = app.get("/api/articles/2").await;
    assert_eq!(full.status, StatusCode::OK);
    assert!(full.json()["authorName"].is_null());
    assert_eq!(
        full.json()["text"],
        "Queso Cabrales pairs well with a glass of Chang."
    );
}

#[tokio::test]
async fn test_create_article_requires_existing_author() {
    let app = TestApp::seeded().await;

    let resp = app
        .post_json(
            "/api/articles",
            &json!({ "title": "Ghost", "text": "Nobody wrote this", "authorId": 42 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app
        .post_json(
            "/api/articles",
            &json!({ "title": "Ikura", "text": "Back in stock", "authorId": 2 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let created = resp.json();
    assert_eq!(created["id"], 3);
    assert_eq!(app.get("/api/articles/count").await.json(), json!(3));
}

#[tokio::test]
async fn test_article_title_is_bounded() {
    let app = TestApp::seeded().await;

    let resp = app
        .post_json(
            "/api/articles",
            &json!({ "title": "x".repeat(51), "text": "too long", "authorId": 2 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_article_keeps_author() {
    let app = TestApp::seeded().await;

    let before = app.get("/api/articles/1").await.json();
    let resp = app
        .put_json(
            "/api/articles/1",
            &json!({ "id": 1, "title": "Tea season", "text": "Updated", "authorId": 1 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let after = app.get("/api/articles/1").await.json();
    assert_eq!(after["title"], "Tea season");
    assert_eq!(after["authorId"], 3);
    assert_ne!(after["posted"], before["posted"]);

    let resp = app
        .put_json(
            "/api/articles/9",
            &json!({ "id": 9, "title": "Missing", "text": "None", "authorId": 1 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_article_removes_comments_and_links() {
    let app = TestApp::seeded().await;

    assert_eq!(
        app.delete("/api/articles/1").await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.get("/api/articles/1").await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.get("/api/articles/1/comments/count").await.json(),
        json!(0)
    );
    assert_eq!(app.get("/api/articles/1/products").await.json(), json!([]));

    // The other article keeps its links.
    let products = app.get("/api/articles/2/products").await.json();
    assert_eq!(products.as_array().unwrap().len(), 2);
}

// ============================================================================
// Related products
// ============================================================================

#[tokio::test]
async fn test_related_products() {
    let app = TestApp::seeded().await;

    let resp = app.get("/api/articles/1/products").await;
    let body = resp.json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|product| product["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Chai", "Chang"]);

    let resp = app.post_empty("/api/articles/1/products/4").await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json()["productId"], 4);

    assert_eq!(
        app.post_empty("/api/articles/1/products/4").await.status,
        StatusCode::CONFLICT
    );
    assert_eq!(
        app.post_empty("/api/articles/1/products/99").await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.post_empty("/api/articles/99/products/1").await.status,
        StatusCode::NOT_FOUND
    );

    assert_eq!(
        app.delete("/api/articles/1/products/4").await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.delete("/api/articles/1/products/4").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_related_products_skip_deleted_products() {
    let app = TestApp::seeded().await;

    app.delete("/api/products/2").await;
    let products = app.get("/api/articles/1/products").await.json();
    assert_eq!(products.as_array().unwrap().len(), 1);
    assert_eq!(products[0]["name"], "Chai");
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle() {
    let app = TestApp::seeded().await;

    let resp = app
        .post_json(
            "/api/articles/2/comments",
            &json!({ "text": "Ordered a wheel", "authorId": "ANATR", "articleId": 2 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let comment_id = resp.json()["id"].as_i64().unwrap();

    let uri = format!("/api/articles/2/comments/{comment_id}");
    let resp = app.get(&uri).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["authorId"], "ANATR");

    let resp = app
        .put_json(
            &uri,
            &json!({
                "id": comment_id,
                "text": "Ordered two wheels",
                "authorId": "BERGS",
                "articleId": 2,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let updated = app.get(&uri).await.json();
    assert_eq!(updated["text"], "Ordered two wheels");
    assert_eq!(updated["authorId"], "ANATR");

    assert_eq!(app.delete(&uri).await.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments_are_scoped_to_their_article() {
    let app = TestApp::seeded().await;

    assert_eq!(
        app.get("/api/articles/1/comments/count").await.json(),
        json!(2)
    );
    assert_eq!(
        app.get("/api/articles/2/comments/1").await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.delete("/api/articles/2/comments/1").await.status,
        StatusCode::NOT_FOUND
    );

    let page = app.get("/api/articles/1/comments?limit=1").await.json();
    assert_eq!(page.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_comment_article_mismatch() {
    let app = TestApp::seeded().await;

    let resp = app
        .post_json(
            "/api/articles/1/comments",
            &json!({ "text": "Wrong article", "authorId": "ALFKI", "articleId": 2 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app
        .post_json(
            "/api/articles/9/comments",
            &json!({ "text": "No article", "authorId": "ALFKI", "articleId": 9 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app
        .put_json(
            "/api/articles/1/comments/1",
            &json!({ "id": 2, "text": "Wrong id", "authorId": "ALFKI", "articleId": 1 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}
