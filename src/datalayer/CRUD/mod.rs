#[cfg(feature = "sqlx")]
pub mod customers;
pub mod memory;
pub mod repository;
pub mod sql_generator;
pub mod types;

#[cfg(feature = "sqlx")]
pub use customers::PgCustomerRepository;
pub use memory::InMemoryCustomerRepository;
pub use repository::CustomerRepository;
pub use types::Customer;
