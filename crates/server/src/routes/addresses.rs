//! Address route handlers.

use axum::extract::State;
use tracing::instrument;

use rolodex_core::{AddressForm, AddressId, CustomerId};

use crate::db::AddressRepository;
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{Address, AddressFilter, AddressWithOwner};
use crate::response::ApiResponse;
use crate::state::AppState;

const NOT_FOUND: &str = "Address not found";

/// Addresses of one customer.
///
/// GET /customers/{id}/addresses
#[instrument(skip_all, fields(customer_id = %customer_id))]
pub async fn index(
    State(state): State<AppState>,
    ApiPath(customer_id): ApiPath<CustomerId>,
) -> Result<ApiResponse<Vec<Address>>> {
    let addresses = AddressRepository::new(state.pool())
        .list_for_customer(customer_id)
        .await?;

    Ok(ApiResponse::with_data("Success", addresses))
}

/// Add an address to a customer.
///
/// POST /customers/{id}/addresses
#[instrument(skip_all, fields(customer_id = %customer_id))]
pub async fn create(
    State(state): State<AppState>,
    ApiPath(customer_id): ApiPath<CustomerId>,
    ApiJson(form): ApiJson<AddressForm>,
) -> Result<ApiResponse<Address>> {
    let input = form.validate()?;
    let address = AddressRepository::new(state.pool())
        .create(customer_id, &input)
        .await?;

    tracing::info!(address_id = %address.id, "Address added");
    Ok(ApiResponse::with_data("Address added successfully", address))
}

/// Replace an address's fields.
///
/// PUT /addresses/{address_id}
#[instrument(skip_all, fields(address_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AddressId>,
    ApiJson(form): ApiJson<AddressForm>,
) -> Result<ApiResponse<Address>> {
    let input = form.validate()?;
    let address = AddressRepository::new(state.pool())
        .update(id, &input)
        .await
        .map_err(AppError::not_found_as(NOT_FOUND))?;

    Ok(ApiResponse::with_data("Address updated successfully", address))
}

/// Delete an address.
///
/// DELETE /addresses/{address_id}
#[instrument(skip_all, fields(address_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AddressId>,
) -> Result<ApiResponse<()>> {
    if !AddressRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    Ok(ApiResponse::message("Address deleted successfully"))
}

/// Search addresses across customers by city, state, and PIN code.
///
/// GET /addresses/search?city=&state=&pin_code=
#[instrument(skip_all)]
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<AddressFilter>,
) -> Result<ApiResponse<Vec<AddressWithOwner>>> {
    let rows = AddressRepository::new(state.pool()).search(&filter).await?;
    tracing::debug!(matches = rows.len(), "Address search");

    Ok(ApiResponse::with_data("Success", rows))
}
