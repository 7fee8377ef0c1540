//! Core types for Rolodex.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod listing;
pub mod phone;

pub use id::*;
pub use listing::{
    CustomerQuery, ListingError, PageRequest, Pagination, SortField, SortOrder,
};
pub use phone::{PhoneNumber, PhoneNumberError};
