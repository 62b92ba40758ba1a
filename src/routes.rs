use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::{customers, fallback, health};
use crate::middleware::{cors_middleware, error_logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Create the main application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Health routes
    let health_routes = Router::new().route(
        "/health",
        get(health::health_check).fallback(fallback::method_not_allowed),
    );

    // Customer routes - /api/customers
    let customer_routes = Router::new()
        .route(
            "/api/customers",
            get(customers::list_customers)
                .post(customers::create_customer)
                .put(customers::update_customer)
                .fallback(fallback::method_not_allowed),
        )
        .route(
            "/api/customers/:id",
            get(customers::get_customer)
                .delete(customers::delete_customer)
                .fallback(fallback::method_not_allowed),
        )
        .with_state(state);

    // Outermost first: request id, tracing, CORS, error logging
    Router::new()
        .merge(health_routes)
        .merge(customer_routes)
        .fallback(fallback::route_not_found)
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
