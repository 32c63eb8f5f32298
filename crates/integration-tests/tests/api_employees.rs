//! Employee endpoints and the photo sub-resource.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use northwind_integration_tests::{
    TEST_PICTURE_MAX_FILE_SIZE, TestApp, multipart_body, multipart_without_file,
};
use serde_json::json;

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let app = TestApp::new();

    for (expected, last_name) in [(1, "Davolio"), (2, "Fuller")] {
        let resp = app
            .post_json(
                "/api/employees",
                &json!({ "firstName": "Test", "lastName": last_name }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED);
        assert_eq!(resp.json()["id"], expected);
    }

    assert_eq!(app.get("/api/employees/count").await.json(), json!(2));
}

#[tokio::test]
async fn test_employee_update_and_delete() {
    let app = TestApp::seeded().await;

    let mut nancy = app.get("/api/employees/1").await.json();
    assert_eq!(nancy["lastName"], "Davolio");
    assert_eq!(nancy["reportsTo"], 2);

    nancy["title"] = json!("Inside Sales Coordinator");
    assert_eq!(
        app.put_json("/api/employees/1", &nancy).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.get("/api/employees/1").await.json()["title"],
        "Inside Sales Coordinator"
    );

    assert_eq!(
        app.put_json("/api/employees/2", &nancy).await.status,
        StatusCode::BAD_REQUEST
    );

    assert_eq!(
        app.delete("/api/employees/1").await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.delete("/api/employees/1").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_non_positive_id_is_bad_request() {
    let app = TestApp::new();
    assert_eq!(
        app.get("/api/employees/0").await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_photo_round_trip() {
    let app = TestApp::seeded().await;

    let resp = app.get("/api/employees/3/photo").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.is_empty());

    let photo: Vec<u8> = (0..=255).collect();
    let resp = app
        .put_bytes("/api/employees/3/photo", "image/bmp", photo.clone())
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = app.get("/api/employees/3/photo").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.content_type(), Some("image/bmp"));
    assert_eq!(resp.body.as_ref(), photo.as_slice());

    // Record updates leave the photo alone.
    let record = app.get("/api/employees/3").await.json();
    app.put_json("/api/employees/3", &record).await;
    assert_eq!(
        app.get("/api/employees/3/photo").await.body.as_ref(),
        photo.as_slice()
    );

    assert_eq!(
        app.delete("/api/employees/3/photo").await.status,
        StatusCode::NO_CONTENT
    );
    assert!(app.get("/api/employees/3/photo").await.body.is_empty());
}

#[tokio::test]
async fn test_photo_multipart_upload() {
    let app = TestApp::seeded().await;

    let (content_type, body) = multipart_body("steven.bmp", b"BM-fake-bitmap");
    let resp = app
        .put_bytes("/api/employees/3/photo", &content_type, body)
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(
        app.get("/api/employees/3/photo").await.body.as_ref(),
        b"BM-fake-bitmap"
    );

    let (content_type, body) = multipart_without_file();
    let resp = app
        .put_bytes("/api/employees/3/photo", &content_type, body)
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_photo_for_missing_employee() {
    let app = TestApp::new();

    assert_eq!(
        app.get("/api/employees/9/photo").await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.put_bytes("/api/employees/9/photo", "image/bmp", vec![1, 2, 3])
            .await
            .status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_oversized_photo_keeps_previous() {
    let app = TestApp::seeded().await;

    app.put_bytes("/api/employees/2/photo", "image/bmp", vec![7_u8; 16])
        .await;

    let resp = app
        .put_bytes(
            "/api/employees/2/photo",
            "image/bmp",
            vec![0_u8; TEST_PICTURE_MAX_FILE_SIZE + 1],
        )
        .await;
    assert_eq!(resp.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        app.get("/api/employees/2/photo").await.body.as_ref(),
        vec![7_u8; 16].as_slice()
    );
}
