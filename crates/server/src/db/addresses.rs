//! Address repository for database operations.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use rolodex_core::{AddressId, CustomerId, NewAddress};

use super::{RepositoryError, contains_pattern};
use crate::models::{Address, AddressFilter, AddressWithOwner};

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All addresses owned by a customer, oldest first.
    ///
    /// An unknown customer simply has no addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(
            r"
            SELECT id, customer_id, address_details, city, state, pin_code
            FROM addresses
            WHERE customer_id = ?
            ORDER BY id
            ",
        )
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Insert an address for `customer_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, including the
    /// foreign key violation raised when the customer does not exist.
    pub async fn create(
        &self,
        customer_id: CustomerId,
        input: &NewAddress,
    ) -> Result<Address, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(
            r"
            INSERT INTO addresses (customer_id, address_details, city, state, pin_code)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, customer_id, address_details, city, state, pin_code
            ",
        )
        .bind(customer_id)
        .bind(&input.address_details)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.pin_code)
        .fetch_one(self.pool)
        .await?;

        Ok(address)
    }

    /// Replace the fields of an address. Ownership never changes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: AddressId,
        input: &NewAddress,
    ) -> Result<Address, RepositoryError> {
        sqlx::query_as::<_, Address>(
            r"
            UPDATE addresses
            SET address_details = ?, city = ?, state = ?, pin_code = ?
            WHERE id = ?
            RETURNING id, customer_id, address_details, city, state, pin_code
            ",
        )
        .bind(&input.address_details)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.pin_code)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete an address.
    ///
    /// # Returns
    ///
    /// Returns `true` if the address was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: AddressId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Search addresses across all customers.
    ///
    /// Each set filter is a substring match on its column; filters are
    /// AND-combined. Results carry the owner's name and are ordered by
    /// address ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(
        &self,
        filter: &AddressFilter,
    ) -> Result<Vec<AddressWithOwner>, RepositoryError> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            r"SELECT a.id, a.customer_id, a.address_details, a.city, a.state, a.pin_code,
                   c.first_name, c.last_name
            FROM addresses a
            JOIN customers c ON c.id = a.customer_id",
        );

        let mut keyword = " WHERE ";
        for (column, term) in filter.terms() {
            builder
                .push(keyword)
                .push(column)
                .push(" LIKE ")
                .push_bind(contains_pattern(term))
                .push(" ESCAPE '\\'");
            keyword = " AND ";
        }
        builder.push(" ORDER BY a.id");

        let rows = builder
            .build_query_as::<AddressWithOwner>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }
}
