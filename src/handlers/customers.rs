use crate::{
    controllayer::customers::customers_handler,
    datalayer::CRUD::types::Customer,
    errors::errors::{ServiceError, ServiceResult},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument};
use validator::Validate;

/// Decode and validate a customer body.
///
/// The body is read as JSON whatever its `Content-Type`. Malformed JSON,
/// unknown or missing fields and validation failures all come back as
/// `InvalidPayload`, which the service reports as 500.
pub fn decode_customer(body: &[u8]) -> ServiceResult<Customer> {
    let customer: Customer = serde_json::from_slice(body)?;
    customer.validate()?;
    Ok(customer)
}

fn reject(err: ServiceError) -> Response {
    error!(error = %err, kind = err.kind(), "Rejected customer payload");
    err.into_response()
}

// ===== HANDLERS =====

/// POST /api/customers
/// Create a customer from the JSON body
#[instrument(skip(state, body), fields(service = "/api/customers"))]
pub async fn create_customer(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let customer = match decode_customer(&body) {
        Ok(c) => c,
        Err(e) => return reject(e),
    };

    info!(
        customer_id = %customer.id,
        name = %customer.name,
        age = customer.age,
        "Creating customer"
    );

    let response = customers_handler::create_customer(state.customers.as_ref(), customer).await;

    info!(response_code = %response.status(), "Create customer completed");
    response
}

/// GET /api/customers
/// List all customers
#[instrument(skip(state), fields(service = "/api/customers"))]
pub async fn list_customers(State(state): State<AppState>) -> Response {
    info!("Listing customers");

    let response = customers_handler::list_customers(state.customers.as_ref()).await;

    info!(response_code = %response.status(), "List customers completed");
    response
}

/// GET /api/customers/:id
/// Get one customer
#[instrument(skip(state), fields(service = "/api/customers/:id"))]
pub async fn get_customer(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!(customer_id = %id, "Getting customer");

    let response = customers_handler::get_customer(state.customers.as_ref(), &id).await;

    info!(response_code = %response.status(), "Get customer completed");
    response
}

/// PUT /api/customers
/// Replace a customer; the id is taken from the body
#[instrument(skip(state, body), fields(service = "/api/customers"))]
pub async fn update_customer(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let customer = match decode_customer(&body) {
        Ok(c) => c,
        Err(e) => return reject(e),
    };

    info!(
        customer_id = %customer.id,
        name = %customer.name,
        age = customer.age,
        "Updating customer"
    );

    let response = customers_handler::update_customer(state.customers.as_ref(), customer).await;

    info!(response_code = %response.status(), "Update customer completed");
    response
}

/// DELETE /api/customers/:id
/// Delete one customer
#[instrument(skip(state), fields(service = "/api/customers/:id"))]
pub async fn delete_customer(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!(customer_id = %id, "Deleting customer");

    let response = customers_handler::delete_customer(state.customers.as_ref(), &id).await;

    info!(response_code = %response.status(), "Delete customer completed");
    response
}
