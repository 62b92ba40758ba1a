pub mod CRUD;
pub mod db_ops;

pub use db_ops::DbConfig;
#[cfg(feature = "sqlx")]
pub use db_ops::{DatabaseHealth, DbManager, initialize_database, initialize_database_with_config};
