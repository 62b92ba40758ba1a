pub mod sql_generator;

pub use sql_generator::{FluentDelete, FluentInsert, FluentSelect, FluentUpdate};
#[cfg(feature = "sqlx")]
pub use sql_generator::bind_query;
