pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use review_core::ReviewPolicy;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, StoreBackend};
use crate::store::{JsonFileStore, MemoryStore, ReviewStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReviewStore>,
    pub clock: Arc<dyn Clock>,
    pub policy: Arc<dyn ReviewPolicy>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ReviewStore>,
        clock: Arc<dyn Clock>,
        policy: Arc<dyn ReviewPolicy>,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Build state for the configured store and policy, on the wall clock.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn ReviewStore> = match &config.store {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::JsonFile(path) => Arc::new(
                JsonFileStore::open(path)
                    .with_context(|| format!("opening review store {}", path.display()))?,
            ),
        };

        let policy = review_core::get_policy(&config.policy)
            .with_context(|| format!("unknown review policy {}", config.policy))?;

        Ok(Self::new(store, Arc::new(SystemClock), Arc::from(policy)))
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/study/queue", post(routes::study::queue))
        .route("/api/study/review", post(routes::study::review))
        .route(
            "/api/study/state/{card_id}",
            get(routes::study::get_state).delete(routes::study::delete_state),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::from_config(&config)?;
    tracing::info!(
        store = state.store.name(),
        policy = state.policy.name(),
        "Initialized review scheduler"
    );

    let app = router(state);
    let addr = config.addr();

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
