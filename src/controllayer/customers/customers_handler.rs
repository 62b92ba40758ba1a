use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument};

use crate::{
    datalayer::CRUD::{repository::CustomerRepository, types::Customer},
    errors::errors::ServiceError,
};

/// Persist a new customer
///
/// 201 with the stored record, or 500 on any repository failure.
#[instrument(skip(repository, customer), fields(service = "/api/customers"))]
pub async fn create_customer(repository: &dyn CustomerRepository, customer: Customer) -> Response {
    match repository.create(customer).await {
        Ok(created) => {
            info!(customer_id = %created.id, "Customer created");
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Failed to create customer");
            ServiceError::Repository(e).into_response()
        }
    }
}

/// List every customer
///
/// 200 with a (possibly empty) array, or 500 on any repository failure.
#[instrument(skip(repository), fields(service = "/api/customers"))]
pub async fn list_customers(repository: &dyn CustomerRepository) -> Response {
    match repository.find_all().await {
        Ok(customers) => {
            info!(count = customers.len(), "Customers listed");
            (StatusCode::OK, Json(customers)).into_response()
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Failed to list customers");
            ServiceError::Repository(e).into_response()
        }
    }
}

/// Fetch one customer by id
///
/// A missing record is reported like any other store failure (500).
#[instrument(skip(repository), fields(service = "/api/customers/:id"))]
pub async fn get_customer(repository: &dyn CustomerRepository, id: &str) -> Response {
    match repository.find_one(id).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(e) => {
            error!(error = %e, kind = e.kind(), customer_id = %id, "Failed to get customer");
            ServiceError::Repository(e).into_response()
        }
    }
}

/// Replace a customer, keyed by the id in the payload
///
/// 200 echoes the record as sent. Every repository failure maps to 404 here,
/// whatever its kind.
#[instrument(skip(repository, customer), fields(service = "/api/customers"))]
pub async fn update_customer(repository: &dyn CustomerRepository, customer: Customer) -> Response {
    match repository.update(customer.clone()).await {
        Ok(_) => {
            info!(customer_id = %customer.id, "Customer updated");
            (StatusCode::OK, Json(customer)).into_response()
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), customer_id = %customer.id, "Failed to update customer");
            ServiceError::UpdateFailed(e).into_response()
        }
    }
}

/// Remove a customer by id; 204 with no body on success
#[instrument(skip(repository), fields(service = "/api/customers/:id"))]
pub async fn delete_customer(repository: &dyn CustomerRepository, id: &str) -> Response {
    match repository.delete(id).await {
        Ok(()) => {
            info!(customer_id = %id, "Customer deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), customer_id = %id, "Failed to delete customer");
            ServiceError::Repository(e).into_response()
        }
    }
}
