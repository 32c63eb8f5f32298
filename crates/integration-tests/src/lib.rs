//! Integration tests for the Northwind API.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests (in-memory backend, no server needed)
//! cargo test -p northwind-integration-tests
//!
//! # Live tests against a running server
//! NORTHWIND_SEED_FILE=crates/api/fixtures/northwind.yaml cargo run -p northwind-api &
//! cargo test -p northwind-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_*` - Drive [`northwind_api::app`] in process through [`TestApp`]
//! - `live_server` - Talk to `NORTHWIND_BASE_URL` over HTTP (ignored by default)

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use northwind_api::config::ApiConfig;
use northwind_api::seed::SeedFixture;
use northwind_api::services::Services;
use northwind_api::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

/// The demo fixture shipped with the API crate.
pub const NORTHWIND_FIXTURE: &str = include_str!("../../api/fixtures/northwind.yaml");

/// Largest picture the in-process app accepts.
pub const TEST_PICTURE_MAX_FILE_SIZE: usize = 1024;

/// Boundary used by [`multipart_body`].
pub const MULTIPART_BOUNDARY: &str = "northwind-test-boundary";

/// Base URL for live-server tests (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("NORTHWIND_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// A collected response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    /// The `Content-Type` header, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

/// The API router over a fresh in-memory store.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        let config = ApiConfig {
            picture_max_file_size: TEST_PICTURE_MAX_FILE_SIZE,
            ..ApiConfig::in_memory()
        };
        let services = Services::in_memory(config.picture_max_file_size);
        let state = AppState::new(config, services);

        Self {
            router: northwind_api::app(state.clone()),
            state,
        }
    }

    /// Store loaded with [`NORTHWIND_FIXTURE`].
    ///
    /// Ids are assigned in fixture order: categories Beverages=1,
    /// Condiments=2, Dairy Products=3, Seafood=4; employees Davolio=1,
    /// Fuller=2, Buchanan=3; products Chai=1, Chang=2, Aniseed Syrup=3,
    /// Ikura=4, Queso Cabrales=5; articles 1 (by Buchanan) and 2 (by Davolio).
    ///
    /// # Panics
    ///
    /// Panics if the fixture does not load.
    pub async fn seeded() -> Self {
        let app = Self::new();
        SeedFixture::from_yaml(NORTHWIND_FIXTURE)
            .expect("fixture parses")
            .load_into(app.state.services())
            .await
            .expect("fixture loads");
        app
    }

    /// Direct access to the services behind the router.
    #[must_use]
    pub fn services(&self) -> &Services {
        self.state.services()
    }

    /// Send a request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be collected.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri, Body::empty(), None))
            .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(request(Method::DELETE, uri, Body::empty(), None))
            .await
    }

    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.send(request(Method::POST, uri, Body::empty(), None))
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(json_request(Method::POST, uri, body)).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(json_request(Method::PUT, uri, body)).await
    }

    /// PUT raw bytes with the given content type.
    pub async fn put_bytes(&self, uri: &str, content_type: &str, bytes: Vec<u8>) -> TestResponse {
        self.send(request(
            Method::PUT,
            uri,
            Body::from(bytes),
            Some(content_type),
        ))
        .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

fn request(method: Method, uri: &str, body: Body, content_type: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(body).expect("valid request")
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    request(
        method,
        uri,
        Body::from(body.to_string()),
        Some("application/json"),
    )
}

/// A `multipart/form-data` body with one file part, and its content type.
#[must_use]
pub fn multipart_body(file_name: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        body,
    )
}

/// A `multipart/form-data` body with only a text field.
#[must_use]
pub fn multipart_without_file() -> (String, Vec<u8>) {
    let body = format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"note\"\r\n\r\n\
         no picture here\r\n\
         --{MULTIPART_BOUNDARY}--\r\n"
    );

    (
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        body.into_bytes(),
    )
}
