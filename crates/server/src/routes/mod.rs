//! HTTP route handlers for the API server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                           - Liveness check
//! GET    /health/ready                     - Database readiness check
//!
//! # Customers
//! GET    /customers                        - Search, sort, and page customers
//! POST   /customers                        - Create a customer
//! GET    /customers/{id}                   - Customer detail
//! PUT    /customers/{id}                   - Replace a customer
//! DELETE /customers/{id}                   - Delete a customer and its addresses
//!
//! # Addresses
//! GET    /customers/{id}/addresses         - Addresses of one customer
//! POST   /customers/{id}/addresses         - Add an address to a customer
//! PUT    /addresses/{address_id}           - Replace an address
//! DELETE /addresses/{address_id}           - Delete an address
//! GET    /addresses/search                 - Search addresses across customers
//! ```

pub mod addresses;
pub mod customers;
pub mod health;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index).post(customers::create))
        .route(
            "/{id}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::delete),
        )
        .route(
            "/{id}/addresses",
            get(addresses::index).post(addresses::create),
        )
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(addresses::search))
        .route(
            "/{address_id}",
            axum::routing::put(addresses::update).delete(addresses::delete),
        )
}

/// Create the health check router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health))
        .route("/ready", get(health::readiness))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/customers", customer_routes())
        .nest("/addresses", address_routes())
}
