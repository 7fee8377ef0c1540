//! Domain models for the Rolodex server.
//!
//! These are the shapes returned by repositories and serialized into API
//! responses. Validated input types live in `rolodex_core::validation`.

pub mod address;
pub mod customer;

pub use address::{Address, AddressFilter, AddressWithOwner};
pub use customer::{Customer, CustomerPage};
