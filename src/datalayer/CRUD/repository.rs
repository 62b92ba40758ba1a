use async_trait::async_trait;

use crate::datalayer::CRUD::types::Customer;
use crate::errors::dberrors::RepositoryError;

/// Persistence boundary for customers.
///
/// Implementations are shared across concurrent requests behind an `Arc`,
/// so they must be `Send + Sync`. Each call is a single round trip to the
/// store with no retries; pooling is the store driver's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Persist a new customer and return the stored record.
    ///
    /// A non-empty `id` is kept as-is; an empty one is replaced by a
    /// store-assigned UUID. A duplicate id fails with `Conflict`.
    async fn create(&self, customer: Customer) -> Result<Customer, RepositoryError>;

    /// All customers, in the order the store returns them
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError>;

    async fn find_one(&self, id: &str) -> Result<Customer, RepositoryError>;

    /// Replace the record whose id matches `customer.id`
    async fn update(&self, customer: Customer) -> Result<Customer, RepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}
