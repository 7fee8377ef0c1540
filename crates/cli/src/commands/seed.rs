//! Seed the database with demo customers and addresses.
//!
//! Data is generated deterministically from the customer index, so running
//! the command twice creates nothing new the second time: customers whose
//! phone number is already stored are skipped.

use sqlx::SqlitePool;

use rolodex_core::{AddressForm, CustomerForm};
use rolodex_server::config::DatabaseConfig;
use rolodex_server::db::{self, AddressRepository, CustomerRepository, RepositoryError};

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Priya", "Rohan", "Ananya", "Vikram", "Meera", "Arjun", "Kavya", "Ishaan", "Diya",
    "Kabir", "Sara",
];

const LAST_NAMES: &[&str] = &[
    "Sharma", "Patel", "Iyer", "Reddy", "Khan", "Nair", "Gupta", "Das", "Menon", "Singh",
];

const STREETS: &[&str] = &[
    "MG Road",
    "Park Street",
    "Residency Road",
    "Linking Road",
    "Anna Salai",
    "Brigade Road",
];

/// `(city, state, PIN prefix)`
const PLACES: &[(&str, &str, &str)] = &[
    ("Mumbai", "Maharashtra", "400"),
    ("Pune", "Maharashtra", "411"),
    ("Bengaluru", "Karnataka", "560"),
    ("Chennai", "Tamil Nadu", "600"),
    ("Kolkata", "West Bengal", "700"),
    ("Hyderabad", "Telangana", "500"),
    ("Jaipur", "Rajasthan", "302"),
];

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Customers inserted, each with one address.
    pub created: u32,
    /// Customers skipped because their phone number already existed.
    pub skipped: u32,
}

/// Seed the configured database with `count` demo customers.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a database operation fails.
pub async fn run(count: u32) -> Result<SeedReport, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = db::create_pool(&config).await?;
    db::run_migrations(&pool).await?;

    tracing::info!(count, "Seeding demo customers");
    let report = seed(&pool, count).await?;

    pool.close().await;
    Ok(report)
}

/// Insert `count` demo customers into `pool`.
///
/// # Errors
///
/// Returns `RepositoryError` for any database failure other than a phone
/// number collision.
pub async fn seed(pool: &SqlitePool, count: u32) -> Result<SeedReport, RepositoryError> {
    let customers = CustomerRepository::new(pool);
    let addresses = AddressRepository::new(pool);
    let mut report = SeedReport::default();

    for index in 0..count {
        let (customer_form, address_form) = demo_record(index);
        let (Ok(customer_input), Ok(address_input)) =
            (customer_form.validate(), address_form.validate())
        else {
            tracing::warn!(index, "Generated demo record failed validation");
            report.skipped += 1;
            continue;
        };

        let customer = match customers.create(&customer_input).await {
            Ok(customer) => customer,
            Err(RepositoryError::Conflict(_)) => {
                tracing::debug!(phone = %customer_input.phone_number, "Phone exists, skipping");
                report.skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        addresses.create(customer.id, &address_input).await?;
        report.created += 1;
    }

    Ok(report)
}

/// Build the demo customer and address for `index`.
#[allow(clippy::indexing_slicing)] // indices are reduced modulo the table length
fn demo_record(index: u32) -> (CustomerForm, AddressForm) {
    let i = index as usize;
    let first = FIRST_NAMES[i % FIRST_NAMES.len()];
    let last = LAST_NAMES[(i / FIRST_NAMES.len() + i) % LAST_NAMES.len()];
    let street = STREETS[i % STREETS.len()];
    let (city, state, pin_prefix) = PLACES[i % PLACES.len()];

    let customer = CustomerForm {
        first_name: Some(first.to_owned()),
        last_name: Some(last.to_owned()),
        phone_number: Some(format!("98{:08}", index % 100_000_000)),
    };
    let address = AddressForm {
        address_details: Some(format!("{} {street}", index % 200 + 1)),
        city: Some(city.to_owned()),
        state: Some(state.to_owned()),
        pin_code: Some(format!("{pin_prefix}{:03}", index % 1000)),
    };

    (customer, address)
}
