//! Customer listing parameters: search, sort, and pagination.
//!
//! Sort columns and directions are closed enums so they can be spliced into
//! SQL text without binding. Raw query-string values only enter the system
//! through the `FromStr` impls below.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while interpreting listing parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// `sortBy` named a column outside the allow-list.
    #[error("Invalid sortBy '{0}'. Allowed: id, first_name, last_name, phone_number")]
    UnknownSortField(String),

    /// `sortOrder` was neither `ASC` nor `DESC`.
    #[error("Invalid sortOrder '{0}'. Allowed: ASC, DESC")]
    UnknownSortOrder(String),

    /// A numeric parameter could not be parsed.
    #[error("Invalid {name} '{value}': must be a positive integer")]
    NotANumber {
        /// Parameter name as it appears in the query string.
        name: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// `page` was zero.
    #[error("page must be at least 1")]
    PageOutOfRange,

    /// `limit` was zero.
    #[error("limit must be at least 1")]
    LimitOutOfRange,
}

/// Customer column a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    FirstName,
    #[default]
    LastName,
    PhoneNumber,
}

impl SortField {
    /// Column name in the `customers` table.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::PhoneNumber => "phone_number",
        }
    }
}

impl FromStr for SortField {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "first_name" => Ok(Self::FirstName),
            "last_name" => Ok(Self::LastName),
            "phone_number" => Ok(Self::PhoneNumber),
            other => Err(ListingError::UnknownSortField(other.to_owned())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(ListingError::UnknownSortOrder(s.to_owned()))
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Page used when the client does not ask for one.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when the client does not ask for one.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Create a page request.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::PageOutOfRange` if `page` is zero, or
    /// `ListingError::LimitOutOfRange` if `limit` is zero. Any positive
    /// limit is accepted.
    pub const fn new(page: u32, limit: u32) -> Result<Self, ListingError> {
        if page == 0 {
            return Err(ListingError::PageOutOfRange);
        }
        if limit == 0 {
            return Err(ListingError::LimitOutOfRange);
        }
        Ok(Self { page, limit })
    }

    /// Parse optional raw query-string values, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::NotANumber` for non-numeric input, otherwise the
    /// range errors of [`Self::new`].
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Result<Self, ListingError> {
        let page = parse_number("page", page, Self::DEFAULT_PAGE)?;
        let limit = parse_number("limit", limit, Self::DEFAULT_LIMIT)?;
        Self::new(page, limit)
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum rows on this page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page: `(page - 1) * limit`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

fn parse_number(name: &'static str, raw: Option<&str>, default: u32) -> Result<u32, ListingError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| ListingError::NotANumber {
            name,
            value: value.to_owned(),
        }),
    }
}

/// Pagination metadata returned alongside a page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    /// Build pagination metadata for `request` given the filtered row count.
    ///
    /// `pages` is `ceil(total / limit)`, so an empty result has zero pages.
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages: total.div_ceil(request.limit as u64),
        }
    }
}

/// A fully validated customer listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerQuery {
    /// Free-text term matched against first name, last name, and phone number.
    pub search: Option<String>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl CustomerQuery {
    /// Build a query from raw query-string values.
    ///
    /// Empty strings are treated as absent, matching how browser forms submit
    /// cleared inputs.
    ///
    /// # Errors
    ///
    /// Returns a `ListingError` if any parameter is outside its allowed set.
    pub fn from_raw(
        search: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, ListingError> {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        let sort_field = match sort_by.filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse()?,
            None => SortField::default(),
        };
        let sort_order = match sort_order.filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse()?,
            None => SortOrder::default(),
        };

        Ok(Self {
            search,
            sort_field,
            sort_order,
            page: PageRequest::from_raw(page, limit)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_allow_list() {
        assert_eq!("last_name".parse::<SortField>().unwrap(), SortField::LastName);
        assert_eq!("id".parse::<SortField>().unwrap(), SortField::Id);
        assert!(matches!(
            "last_name; DROP TABLE customers".parse::<SortField>(),
            Err(ListingError::UnknownSortField(_))
        ));
        assert!("LAST_NAME".parse::<SortField>().is_err());
    }

    #[test]
    fn test_sort_order_is_case_insensitive() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("Desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_page_request_defaults() {
        let page = PageRequest::from_raw(None, None).unwrap();
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_page_request_offset() {
        let page = PageRequest::new(3, 25).unwrap();
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn test_page_request_rejects_zero() {
        assert_eq!(PageRequest::new(0, 10), Err(ListingError::PageOutOfRange));
        assert_eq!(PageRequest::new(1, 0), Err(ListingError::LimitOutOfRange));
        assert_eq!(
            PageRequest::from_raw(None, Some("0")).unwrap_err().to_string(),
            "limit must be at least 1"
        );
    }

    #[test]
    fn test_page_request_accepts_large_limits() {
        let page = PageRequest::from_raw(Some("1"), Some("150")).unwrap();
        assert_eq!(page.limit(), 150);
        assert_eq!(PageRequest::new(3, u32::MAX).unwrap().limit(), u32::MAX);
        assert_eq!(
            PageRequest::new(u32::MAX, u32::MAX).unwrap().offset(),
            u64::from(u32::MAX - 1) * u64::from(u32::MAX)
        );
    }

    #[test]
    fn test_page_request_rejects_non_numeric() {
        let err = PageRequest::from_raw(Some("two"), None).unwrap_err();
        assert_eq!(
            err,
            ListingError::NotANumber {
                name: "page",
                value: "two".to_owned()
            }
        );
        assert!(PageRequest::from_raw(None, Some("-5")).is_err());
    }

    #[test]
    fn test_pagination_pages_is_ceiling() {
        let request = PageRequest::new(2, 10).unwrap();
        assert_eq!(
            Pagination::new(request, 15),
            Pagination {
                page: 2,
                limit: 10,
                total: 15,
                pages: 2
            }
        );
        assert_eq!(Pagination::new(request, 20).pages, 2);
        assert_eq!(Pagination::new(request, 21).pages, 3);
        assert_eq!(Pagination::new(request, 0).pages, 0);
    }

    #[test]
    fn test_pagination_ceiling_over_many_limits() {
        for limit in (1..=250).chain([1000, u32::MAX]) {
            let request = PageRequest::new(1, limit).unwrap();
            for total in [0_u64, 1, 9, 10, 11, 99, 100, 101, 1000, u64::from(u32::MAX) + 1] {
                let pages = Pagination::new(request, total).pages;
                assert!(pages * u64::from(limit) >= total);
                assert!(pages == 0 || (pages - 1) * u64::from(limit) < total);
            }
        }
    }

    #[test]
    fn test_customer_query_from_raw() {
        let query = CustomerQuery::from_raw(
            Some("  ali "),
            Some("first_name"),
            Some("desc"),
            Some("2"),
            Some("5"),
        )
        .unwrap();
        assert_eq!(query.search.as_deref(), Some("ali"));
        assert_eq!(query.sort_field, SortField::FirstName);
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert_eq!(query.page, PageRequest::new(2, 5).unwrap());
    }

    #[test]
    fn test_customer_query_empty_values_use_defaults() {
        let query = CustomerQuery::from_raw(Some(""), Some(""), Some(""), Some(""), Some("")).unwrap();
        assert_eq!(query, CustomerQuery::default());
    }
}
