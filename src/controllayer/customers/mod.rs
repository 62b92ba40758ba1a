pub mod customers_handler;

pub use customers_handler::{
    create_customer, delete_customer, get_customer, list_customers, update_customer,
};
