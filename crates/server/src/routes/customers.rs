//! Customer route handlers.

use axum::extract::State;
use serde::Deserialize;
use tracing::instrument;

use rolodex_core::{CustomerForm, CustomerId, CustomerQuery};

use crate::db::CustomerRepository;
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::Customer;
use crate::response::ApiResponse;
use crate::state::AppState;

const NOT_FOUND: &str = "Customer not found";

/// Raw listing parameters as they appear in the query string.
///
/// Kept as strings so that out-of-range or unknown values are reported with
/// the listing error messages rather than a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    fn into_query(self) -> std::result::Result<CustomerQuery, rolodex_core::ListingError> {
        CustomerQuery::from_raw(
            self.search.as_deref(),
            self.sort_by.as_deref(),
            self.sort_order.as_deref(),
            self.page.as_deref(),
            self.limit.as_deref(),
        )
    }
}

/// List customers.
///
/// GET /customers?search=&sortBy=&sortOrder=&page=&limit=
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<ApiResponse<Vec<Customer>>> {
    let query = params.into_query()?;
    tracing::debug!(
        search = ?query.search,
        sort = %query.sort_field,
        order = %query.sort_order,
        page = query.page.page(),
        limit = query.page.limit(),
        "Listing customers"
    );

    let page = CustomerRepository::new(state.pool()).list(&query).await?;

    Ok(ApiResponse::paginated("Success", page.rows, page.pagination))
}

/// Create a customer.
///
/// POST /customers
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<CustomerForm>,
) -> Result<ApiResponse<Customer>> {
    let input = form.validate()?;
    let customer = CustomerRepository::new(state.pool()).create(&input).await?;

    tracing::info!(customer_id = %customer.id, "Customer created");
    Ok(ApiResponse::with_data(
        "Customer created successfully",
        customer,
    ))
}

/// Customer detail.
///
/// GET /customers/{id}
#[instrument(skip_all, fields(customer_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CustomerId>,
) -> Result<ApiResponse<Customer>> {
    let customer = CustomerRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    Ok(ApiResponse::with_data("Success", customer))
}

/// Replace a customer's fields.
///
/// PUT /customers/{id}
#[instrument(skip_all, fields(customer_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CustomerId>,
    ApiJson(form): ApiJson<CustomerForm>,
) -> Result<ApiResponse<Customer>> {
    let input = form.validate()?;
    let customer = CustomerRepository::new(state.pool())
        .update(id, &input)
        .await
        .map_err(AppError::not_found_as(NOT_FOUND))?;

    tracing::info!("Customer updated");
    Ok(ApiResponse::with_data(
        "Customer updated successfully",
        customer,
    ))
}

/// Delete a customer and, by cascade, its addresses.
///
/// DELETE /customers/{id}
#[instrument(skip_all, fields(customer_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CustomerId>,
) -> Result<ApiResponse<()>> {
    if !CustomerRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    tracing::info!("Customer deleted");
    Ok(ApiResponse::message("Customer deleted successfully"))
}
