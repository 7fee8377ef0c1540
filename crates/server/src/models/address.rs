//! Address domain types.

use serde::{Deserialize, Serialize};

use rolodex_core::{AddressId, CustomerId};

/// A stored postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    /// System-assigned ID.
    pub id: AddressId,
    /// Owning customer. The address is deleted with it.
    pub customer_id: CustomerId,
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

/// An address joined with its owner's name, as returned by address search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AddressWithOwner {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub address: Address,
    pub first_name: String,
    pub last_name: String,
}

/// Cross-customer address search criteria.
///
/// Each present field is a case-insensitive substring filter; present filters
/// are AND-combined. With no filters every address matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
}

impl AddressFilter {
    /// `(column, term)` pairs for the filters that are set and non-blank.
    pub fn terms(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("a.city", self.city.as_deref()),
            ("a.state", self.state.as_deref()),
            ("a.pin_code", self.pin_code.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, term)| {
            term.map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| (column, t))
        })
    }
}
