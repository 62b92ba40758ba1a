pub mod customers;
pub mod fallback;
pub mod health;
