//! Success envelope shared by every API endpoint.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use rolodex_core::Pagination;

/// `{"message": ..., "data": ..., "pagination": ...}` with absent parts omitted.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    /// A response carrying `data`.
    pub const fn with_data(message: &'static str, data: T) -> Self {
        Self {
            message,
            data: Some(data),
            pagination: None,
        }
    }

    /// A page of results with its pagination metadata.
    pub const fn paginated(message: &'static str, data: T, pagination: Pagination) -> Self {
        Self {
            message,
            data: Some(data),
            pagination: Some(pagination),
        }
    }
}

impl ApiResponse<()> {
    /// A bare confirmation with no payload.
    pub const fn message(message: &'static str) -> Self {
        Self {
            message,
            data: None,
            pagination: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rolodex_core::PageRequest;

    use super::*;

    #[test]
    fn test_message_only_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("Customer deleted successfully"))
            .unwrap();
        assert_eq!(json, serde_json::json!({"message": "Customer deleted successfully"}));
    }

    #[test]
    fn test_paginated_includes_pagination() {
        let pagination = Pagination::new(PageRequest::default(), 3);
        let json =
            serde_json::to_value(ApiResponse::paginated("Success", vec![1, 2, 3], pagination))
                .unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["pagination"]["pages"], 1);
        assert_eq!(json["pagination"]["total"], 3);
    }
}
