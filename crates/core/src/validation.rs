//! Customer and address form validation.
//!
//! These rules are the single source of truth for both the REST API and any
//! client that wants to flag fields before submitting. Each form deserializes
//! with every field optional so a missing key is reported the same way as an
//! empty one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{PhoneNumber, PhoneNumberError};

/// Whether a field was absent or present but malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    Missing,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldError {
    problem: Problem,
    message: &'static str,
}

/// Per-field validation messages, keyed by JSON field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, FieldError>,
}

impl FieldErrors {
    fn missing(&mut self, field: &'static str, message: &'static str) {
        self.errors.insert(
            field,
            FieldError {
                problem: Problem::Missing,
                message,
            },
        );
    }

    fn invalid(&mut self, field: &'static str, message: &'static str) {
        self.errors.insert(
            field,
            FieldError {
                problem: Problem::Invalid,
                message,
            },
        );
    }

    /// Returns `true` if no field failed validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields that failed validation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if at least one required field was missing or blank.
    #[must_use]
    pub fn has_missing(&self) -> bool {
        self.errors
            .values()
            .any(|e| e.problem == Problem::Missing)
    }

    /// Message for a single field, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).map(|e| e.message)
    }

    /// Problem kind for a single field, if it failed.
    #[must_use]
    pub fn problem(&self, field: &str) -> Option<Problem> {
        self.errors.get(field).map(|e| e.problem)
    }

    /// Iterate `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.errors.iter().map(|(field, e)| (*field, e.message))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// A rejected form: a one-line summary plus the per-field detail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{summary}")]
pub struct ValidationError {
    summary: &'static str,
    fields: FieldErrors,
}

impl ValidationError {
    /// Summarize `fields`: any missing field collapses to `required_message`,
    /// otherwise the first format message is used.
    fn from_fields(fields: FieldErrors, required_message: &'static str) -> Self {
        let summary = if fields.has_missing() {
            required_message
        } else {
            fields.iter().next().map_or(required_message, |(_, m)| m)
        };
        Self { summary, fields }
    }

    /// The one-line summary shown to API clients.
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        self.summary
    }

    /// Per-field messages.
    #[must_use]
    pub const fn fields(&self) -> &FieldErrors {
        &self.fields
    }
}

/// Trim a submitted value, treating blank as absent.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

// =============================================================================
// Customer form
// =============================================================================

/// Submitted customer fields, as received from a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

/// A customer that passed validation and is ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: PhoneNumber,
}

impl CustomerForm {
    /// Summary used whenever any customer field is missing.
    pub const REQUIRED_MESSAGE: &'static str = "All fields are required";

    /// Validate the form.
    ///
    /// Names must be non-blank; the phone number must be exactly ten digits.
    /// Values are trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` describing every failing field.
    pub fn validate(&self) -> Result<NewCustomer, ValidationError> {
        let mut errors = FieldErrors::default();

        let first_name = present(self.first_name.as_ref());
        if first_name.is_none() {
            errors.missing("first_name", "First name is required");
        }

        let last_name = present(self.last_name.as_ref());
        if last_name.is_none() {
            errors.missing("last_name", "Last name is required");
        }

        let phone = present(self.phone_number.as_ref()).unwrap_or_default();
        let phone_number = match PhoneNumber::parse(phone) {
            Ok(phone) => Some(phone),
            Err(PhoneNumberError::Empty) => {
                errors.missing("phone_number", "Phone number is required");
                None
            }
            Err(PhoneNumberError::InvalidFormat { .. }) => {
                errors.invalid("phone_number", "Phone number must be 10 digits");
                None
            }
        };

        match (first_name, last_name, phone_number) {
            (Some(first_name), Some(last_name), Some(phone_number)) => Ok(NewCustomer {
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
                phone_number,
            }),
            _ => Err(ValidationError::from_fields(errors, Self::REQUIRED_MESSAGE)),
        }
    }
}

// =============================================================================
// Address form
// =============================================================================

/// Submitted address fields, as received from a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressForm {
    pub address_details: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
}

/// An address that passed validation and is ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

impl AddressForm {
    /// Summary used whenever any address field is missing.
    pub const REQUIRED_MESSAGE: &'static str = "All address fields are required";

    /// Validate the form. Every field must be non-blank.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` describing every failing field.
    pub fn validate(&self) -> Result<NewAddress, ValidationError> {
        let mut errors = FieldErrors::default();

        let mut require = |field: &'static str, value: Option<&String>, message: &'static str| {
            let value = present(value);
            if value.is_none() {
                errors.missing(field, message);
            }
            value.map(str::to_owned)
        };

        let address_details = require(
            "address_details",
            self.address_details.as_ref(),
            "Address details are required",
        );
        let city = require("city", self.city.as_ref(), "City is required");
        let state = require("state", self.state.as_ref(), "State is required");
        let pin_code = require("pin_code", self.pin_code.as_ref(), "PIN code is required");

        match (address_details, city, state, pin_code) {
            (Some(address_details), Some(city), Some(state), Some(pin_code)) => Ok(NewAddress {
                address_details,
                city,
                state,
                pin_code,
            }),
            _ => Err(ValidationError::from_fields(errors, Self::REQUIRED_MESSAGE)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn customer(first: &str, last: &str, phone: &str) -> CustomerForm {
        CustomerForm {
            first_name: Some(first.to_owned()),
            last_name: Some(last.to_owned()),
            phone_number: Some(phone.to_owned()),
        }
    }

    #[test]
    fn test_customer_valid_and_trimmed() {
        let new = customer("  Ann ", "Lee", "1234567890").validate().unwrap();
        assert_eq!(new.first_name, "Ann");
        assert_eq!(new.last_name, "Lee");
        assert_eq!(new.phone_number.as_str(), "1234567890");
    }

    #[test]
    fn test_customer_missing_fields() {
        let err = CustomerForm::default().validate().unwrap_err();
        assert_eq!(err.summary(), "All fields are required");
        assert_eq!(err.fields().len(), 3);
        assert_eq!(err.fields().get("first_name"), Some("First name is required"));
        assert_eq!(err.fields().get("last_name"), Some("Last name is required"));
        assert_eq!(
            err.fields().get("phone_number"),
            Some("Phone number is required")
        );
    }

    #[test]
    fn test_customer_blank_counts_as_missing() {
        let err = customer("   ", "Lee", "1234567890").validate().unwrap_err();
        assert_eq!(err.summary(), "All fields are required");
        assert_eq!(err.fields().problem("first_name"), Some(Problem::Missing));
    }

    #[test]
    fn test_customer_bad_phone_format() {
        let err = customer("Ann", "Lee", "12345").validate().unwrap_err();
        assert_eq!(err.summary(), "Phone number must be 10 digits");
        assert_eq!(err.fields().problem("phone_number"), Some(Problem::Invalid));
        assert!(!err.fields().has_missing());
    }

    #[test]
    fn test_customer_missing_wins_over_format() {
        let err = customer("", "Lee", "12345").validate().unwrap_err();
        assert_eq!(err.summary(), "All fields are required");
        assert_eq!(err.fields().len(), 2);
    }

    #[test]
    fn test_customer_form_accepts_missing_keys() {
        let form: CustomerForm = serde_json::from_str(r#"{"first_name":"Ann"}"#).unwrap();
        assert_eq!(form.first_name.as_deref(), Some("Ann"));
        assert!(form.last_name.is_none());
    }

    #[test]
    fn test_address_valid() {
        let form = AddressForm {
            address_details: Some("12 Park Street".to_owned()),
            city: Some("Pune".to_owned()),
            state: Some("Maharashtra".to_owned()),
            pin_code: Some(" 411001 ".to_owned()),
        };
        let new = form.validate().unwrap();
        assert_eq!(new.pin_code, "411001");
        assert_eq!(new.city, "Pune");
    }

    #[test]
    fn test_address_missing_fields() {
        let form = AddressForm {
            city: Some("Pune".to_owned()),
            ..AddressForm::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.summary(), "All address fields are required");
        assert_eq!(err.to_string(), "All address fields are required");
        assert_eq!(err.fields().len(), 3);
        assert_eq!(err.fields().get("pin_code"), Some("PIN code is required"));
        assert_eq!(err.fields().get("city"), None);
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let err = CustomerForm::default().validate().unwrap_err();
        let json = serde_json::to_value(err.fields()).unwrap();
        assert_eq!(json["last_name"], "Last name is required");
    }
}
