//! Rolodex Core - Shared types library.
//!
//! This crate provides the types shared by every Rolodex component:
//! - `server` - JSON REST API over the customer/address store
//! - `cli` - Command-line tools for migrations and demo data
//! - browser clients, which reuse the same form rules before submitting
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. The optional `sqlite` feature adds `sqlx` encode/decode
//! impls so the server can bind and read these types directly.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, phone numbers, and listing parameters
//! - [`validation`] - Customer and address form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{
    AddressForm, CustomerForm, FieldErrors, NewAddress, NewCustomer, Problem, ValidationError,
};
