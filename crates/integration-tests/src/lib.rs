//! Integration tests for Rolodex.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`
//! against a fresh in-memory `SQLite` database, so no server or database
//! needs to be running:
//!
//! ```bash
//! cargo test -p rolodex-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `tests/customers_api.rs` - Customer CRUD, listing, and error envelope
//! - `tests/addresses_api.rs` - Address CRUD, search, and cascade delete

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

use rolodex_server::config::ServerConfig;
use rolodex_server::db;
use rolodex_server::state::AppState;

/// A response with its body parsed as JSON (`Value::Null` for empty or non-JSON bodies).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// An application instance backed by its own in-memory database.
pub struct TestContext {
    router: Router,
    pub pool: SqlitePool,
}

impl TestContext {
    /// Start a fresh application with the schema applied.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory database cannot be created or migrated.
    pub async fn new() -> Self {
        Self::with_config(ServerConfig::for_tests()).await
    }

    /// Start a fresh application with a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be created or migrated.
    pub async fn with_config(config: ServerConfig) -> Self {
        let pool = db::create_pool(&config.database)
            .await
            .expect("Failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("Failed to migrate test database");

        let router = rolodex_server::app(AppState::new(config, pool.clone()));
        Self { router, pool }
    }

    /// Start a fresh application wrapped in the production Sentry layers.
    ///
    /// No DSN is configured, so events are dropped.
    pub async fn with_sentry_layers() -> Self {
        let ctx = Self::new().await;
        Self {
            router: rolodex_server::with_sentry(ctx.router),
            pool: ctx.pool,
        }
    }

    /// Send a prepared request.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Send a request with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    pub async fn request(&self, method: Method, uri: &str, body: Option<&Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a customer and return its ID.
    ///
    /// # Panics
    ///
    /// Panics if the API rejects the customer.
    pub async fn create_customer(&self, first: &str, last: &str, phone: &str) -> i64 {
        let response = self
            .post(
                "/customers",
                &json!({"first_name": first, "last_name": last, "phone_number": phone}),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"]["id"]
            .as_i64()
            .expect("Customer response has no id")
    }

    /// Add an address to a customer and return its ID.
    ///
    /// # Panics
    ///
    /// Panics if the API rejects the address.
    pub async fn create_address(
        &self,
        customer_id: i64,
        details: &str,
        city: &str,
        state: &str,
        pin_code: &str,
    ) -> i64 {
        let response = self
            .post(
                &format!("/customers/{customer_id}/addresses"),
                &json!({
                    "address_details": details,
                    "city": city,
                    "state": state,
                    "pin_code": pin_code,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"]["id"]
            .as_i64()
            .expect("Address response has no id")
    }
}
