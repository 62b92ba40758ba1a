use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::datalayer::CRUD::repository::CustomerRepository;
use crate::datalayer::CRUD::sql_generator::{
    FluentDelete, FluentInsert, FluentSelect, FluentUpdate, bind_query,
};
use crate::datalayer::CRUD::types::{Customer, Customers};
use crate::errors::dberrors::RepositoryError;

/// PostgreSQL-backed customer repository.
///
/// Cloning is cheap; all clones share the same connection pool.
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: Arc<PgPool>,
}

impl PgCustomerRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn to_customer(row: &PgRow) -> Result<Customer, RepositoryError> {
        Customer::from_row(row).map_err(RepositoryError::from)
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    #[instrument(skip(self, customer), fields(customer_id = %customer.id))]
    async fn create(&self, mut customer: Customer) -> Result<Customer, RepositoryError> {
        if !customer.has_id() {
            customer.id = Uuid::new_v4().to_string();
            debug!(customer_id = %customer.id, "Assigned customer id");
        }

        let (sql, values) = FluentInsert::into(Customers::Table)
            .value(Customers::Id, customer.id.clone())
            .value(Customers::Name, customer.name.clone())
            .value(Customers::Age, customer.age)
            .returning(Customers::Id)
            .returning(Customers::Name)
            .returning(Customers::Age)
            .render();

        let query = bind_query(sqlx::query::<Postgres>(&sql), values)?;
        let row = query
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    RepositoryError::Conflict(customer.id.clone())
                }
                other => RepositoryError::from(other),
            })?;

        Self::to_customer(&row)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let (sql, values) = FluentSelect::from(Customers::Table)
            .column(Customers::Id)
            .column(Customers::Name)
            .column(Customers::Age)
            .render()?;

        let query = bind_query(sqlx::query::<Postgres>(&sql), values)?;
        let rows = query.fetch_all(self.pool.as_ref()).await?;

        rows.iter().map(Self::to_customer).collect()
    }

    #[instrument(skip(self))]
    async fn find_one(&self, id: &str) -> Result<Customer, RepositoryError> {
        let (sql, values) = FluentSelect::from(Customers::Table)
            .column(Customers::Id)
            .column(Customers::Name)
            .column(Customers::Age)
            .filter(Customers::Id, id.to_string())
            .render()?;

        let query = bind_query(sqlx::query::<Postgres>(&sql), values)?;
        match query.fetch_optional(self.pool.as_ref()).await? {
            Some(row) => Self::to_customer(&row),
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }

    #[instrument(skip(self, customer), fields(customer_id = %customer.id))]
    async fn update(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        let (sql, values) = FluentUpdate::table(Customers::Table)
            .value(Customers::Name, customer.name.clone())
            .value(Customers::Age, customer.age)
            .filter(Customers::Id, customer.id.clone())
            .returning(Customers::Id)
            .returning(Customers::Name)
            .returning(Customers::Age)
            .render()?;

        let query = bind_query(sqlx::query::<Postgres>(&sql), values)?;
        match query.fetch_optional(self.pool.as_ref()).await? {
            Some(row) => Self::to_customer(&row),
            None => Err(RepositoryError::NotFound(customer.id)),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let (sql, values) = FluentDelete::from(Customers::Table)
            .filter(Customers::Id, id.to_string())
            .render()?;

        let query = bind_query(sqlx::query::<Postgres>(&sql), values)?;
        let result = query.execute(self.pool.as_ref()).await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
