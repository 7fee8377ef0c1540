//! Customer repository for database operations.
//!
//! Single-row operations use static SQL with bound parameters. The listing
//! query is assembled with `QueryBuilder`: only the validated sort enums are
//! spliced into the SQL text, every user-supplied value is bound.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use rolodex_core::{CustomerId, CustomerQuery, NewCustomer, Pagination, SortField};

use super::{RepositoryError, contains_pattern, is_unique_violation};
use crate::models::{Customer, CustomerPage};

const PHONE_CONFLICT: &str = "phone number already exists";

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the phone number already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &NewCustomer) -> Result<Customer, RepositoryError> {
        sqlx::query_as::<_, Customer>(
            r"
            INSERT INTO customers (first_name, last_name, phone_number)
            VALUES (?, ?, ?)
            RETURNING id, first_name, last_name, phone_number
            ",
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.phone_number)
        .fetch_one(self.pool)
        .await
        .map_err(map_phone_conflict)
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, first_name, last_name, phone_number
            FROM customers
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Replace every field of an existing customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    /// Returns `RepositoryError::Conflict` if another customer has the phone number.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CustomerId,
        input: &NewCustomer,
    ) -> Result<Customer, RepositoryError> {
        sqlx::query_as::<_, Customer>(
            r"
            UPDATE customers
            SET first_name = ?, last_name = ?, phone_number = ?
            WHERE id = ?
            RETURNING id, first_name, last_name, phone_number
            ",
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.phone_number)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_phone_conflict)?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a customer and, through the foreign key, all of its addresses.
    ///
    /// # Returns
    ///
    /// Returns `true` if the customer was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetch one page of customers matching `query`, with pagination totals.
    ///
    /// The count runs first and uses the same predicate as the page query.
    /// The two statements are not wrapped in a transaction, so a concurrent
    /// write between them can make `total` disagree with the rows by one page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list(&self, query: &CustomerQuery) -> Result<CustomerPage, RepositoryError> {
        let pattern = query.search.as_deref().map(contains_pattern);

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM customers");
        push_search_filter(&mut count, pattern.as_deref());
        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;

        let mut select = QueryBuilder::<Sqlite>::new(
            "SELECT id, first_name, last_name, phone_number FROM customers",
        );
        push_search_filter(&mut select, pattern.as_deref());
        select
            .push(" ORDER BY ")
            .push(query.sort_field.column())
            .push(" ")
            .push(query.sort_order.as_sql());
        if query.sort_field != SortField::Id {
            // Stable order across pages when the sort column has duplicates
            select.push(", id ASC");
        }
        select
            .push(" LIMIT ")
            .push_bind(i64::from(query.page.limit()))
            .push(" OFFSET ")
            .push_bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX));

        let rows = select
            .build_query_as::<Customer>()
            .fetch_all(self.pool)
            .await?;

        Ok(CustomerPage {
            rows,
            pagination: Pagination::new(query.page, u64::try_from(total).unwrap_or_default()),
        })
    }
}

/// Append the free-text filter: substring match on either name or the phone number.
fn push_search_filter(builder: &mut QueryBuilder<'_, Sqlite>, pattern: Option<&str>) {
    let Some(pattern) = pattern else {
        return;
    };
    builder
        .push(" WHERE first_name LIKE ")
        .push_bind(pattern.to_owned())
        .push(" ESCAPE '\\' OR last_name LIKE ")
        .push_bind(pattern.to_owned())
        .push(" ESCAPE '\\' OR phone_number LIKE ")
        .push_bind(pattern.to_owned())
        .push(" ESCAPE '\\'");
}

fn map_phone_conflict(e: sqlx::Error) -> RepositoryError {
    if is_unique_violation(&e) {
        return RepositoryError::Conflict(PHONE_CONFLICT.to_owned());
    }
    RepositoryError::Database(e)
}
