use std::sync::Arc;

use customers_api::{
    config::{ServerConfig, StoreBackend},
    datalayer::CRUD::{CustomerRepository, InMemoryCustomerRepository},
    logging::init_telemetry,
    routes::create_router,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables first
    dotenvy::dotenv().ok();

    init_telemetry(None)?;

    tracing::info!("Starting Customers API");

    let config = ServerConfig::from_env()?;
    let store = open_store(config.store).await?;

    let app = create_router(AppState::from_arc(store.customers.clone()));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        address = %addr,
        store = ?config.store,
        "Server listening and ready to accept connections"
    );

    tracing::info!(
        endpoints = ?vec![
            "GET /health",
            "GET /api/customers",
            "GET /api/customers/:id",
            "POST /api/customers",
            "PUT /api/customers",
            "DELETE /api/customers/:id",
        ],
        "Available API endpoints"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    customers_api::logging::shutdown_telemetry();

    Ok(())
}

/// Customer store in use, plus the pool owner when it is Postgres
struct OpenStore {
    customers: Arc<dyn CustomerRepository>,
    #[cfg(feature = "sqlx")]
    db: Option<customers_api::datalayer::DbManager>,
}

impl OpenStore {
    /// Release the store's connections once the server has stopped
    #[cfg(feature = "sqlx")]
    async fn close(self) {
        if let Some(db) = self.db {
            db.shutdown().await;
        }
    }

    #[cfg(not(feature = "sqlx"))]
    async fn close(self) {}
}

/// Build the configured customer store; Postgres runs migrations first
async fn open_store(store: StoreBackend) -> Result<OpenStore, Box<dyn std::error::Error>> {
    match store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory customer store, data is lost on exit");
            Ok(OpenStore {
                customers: Arc::new(InMemoryCustomerRepository::new()),
                #[cfg(feature = "sqlx")]
                db: None,
            })
        }
        #[cfg(feature = "sqlx")]
        StoreBackend::Postgres => {
            let db = customers_api::datalayer::initialize_database().await?;
            tracing::info!("Database initialized successfully");
            Ok(OpenStore {
                customers: Arc::new(customers_api::datalayer::CRUD::PgCustomerRepository::new(
                    db.pool_arc(),
                )),
                db: Some(db),
            })
        }
        #[cfg(not(feature = "sqlx"))]
        StoreBackend::Postgres => Err("built without the sqlx feature, use CUSTOMERS_STORE=memory".into()),
    }
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::warn!("Shutdown signal received, cleaning up...");
}
