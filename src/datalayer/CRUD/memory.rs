use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::datalayer::CRUD::repository::CustomerRepository;
use crate::datalayer::CRUD::types::Customer;
use crate::errors::dberrors::RepositoryError;

/// In-process customer store.
///
/// Records are kept in insertion order, which is also the order `find_all`
/// returns them in.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    records: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            records: RwLock::new(customers),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn create(&self, mut customer: Customer) -> Result<Customer, RepositoryError> {
        if !customer.has_id() {
            customer.id = Uuid::new_v4().to_string();
        }

        let mut records = self.records.write().await;
        if records.iter().any(|c| c.id == customer.id) {
            return Err(RepositoryError::Conflict(customer.id));
        }
        records.push(customer.clone());
        debug!(customer_id = %customer.id, total = records.len(), "Customer stored in memory");

        Ok(customer)
    }

    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_one(&self, id: &str) -> Result<Customer, RepositoryError> {
        self.records
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn update(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|c| c.id == customer.id) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(customer)
            }
            None => Err(RepositoryError::NotFound(customer.id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        match records.iter().position(|c| c.id == id) {
            Some(index) => {
                records.remove(index);
                Ok(())
            }
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }
}
