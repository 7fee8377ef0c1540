//! Customer domain types.

use serde::{Deserialize, Serialize};

use rolodex_core::{CustomerId, Pagination, PhoneNumber};

/// A stored customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    /// System-assigned ID.
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all customers.
    pub phone_number: PhoneNumber,
}

/// One page of a customer listing.
#[derive(Debug, Clone)]
pub struct CustomerPage {
    pub rows: Vec<Customer>,
    pub pagination: Pagination,
}
