use std::sync::Arc;

use crate::datalayer::CRUD::repository::CustomerRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Customer store, shared by every in-flight request
    pub customers: Arc<dyn CustomerRepository>,
}

impl AppState {
    pub fn new(customers: impl CustomerRepository + 'static) -> Self {
        Self {
            customers: Arc::new(customers),
        }
    }

    pub fn from_arc(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }
}
