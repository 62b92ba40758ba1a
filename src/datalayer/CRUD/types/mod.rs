pub mod types;

pub use types::{Customer, Customers, DBTables};
