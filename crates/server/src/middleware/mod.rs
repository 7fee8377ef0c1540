//! HTTP middleware stack for the API server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. CORS (only when `ROLODEX_CORS_ORIGINS` is set)
//! 3. `TraceLayer` (request span)
//! 4. Request ID (records into the span, echoes `x-request-id`)

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
