//! HTTP API server with observability for the retail placement wizard.
//!
//! Hosts a single wizard session over REST, backed by a catalog provider and
//! a submission backend, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use catalog::{CatalogError, CatalogProvider, InMemoryCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use submission::{InMemorySubmissionAdapter, SubmissionCoordinator};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<C: CatalogProvider + 'static>(
    state: Arc<AppState<C>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/catalog/products", get(routes::catalog::products::<C>))
        .route("/catalog/machines", get(routes::catalog::machines::<C>))
        .route(
            "/catalog/machines/quick-select",
            post(routes::catalog::quick_select::<C>),
        )
        .route("/wizard", get(routes::wizard::get::<C>))
        .route("/wizard/advance", post(routes::wizard::advance::<C>))
        .route("/wizard/back", post(routes::wizard::back::<C>))
        .route("/wizard/reset", post(routes::wizard::reset::<C>))
        .route("/wizard/durations", get(routes::wizard::durations::<C>))
        .route(
            "/wizard/config/default",
            get(routes::wizard::default_config::<C>),
        )
        .route(
            "/wizard/config/quantity",
            post(routes::wizard::update_quantity::<C>),
        )
        .route("/wizard/pricing", get(routes::wizard::pricing_summary::<C>))
        .route("/wizard/submit", post(routes::wizard::submit::<C>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state: demo catalog and in-memory backend.
pub fn create_default_state(config: &Config) -> Result<Arc<AppState<InMemoryCatalog>>, CatalogError> {
    let catalog = InMemoryCatalog::demo()?;
    let adapter = InMemorySubmissionAdapter::new().with_latency(config.submission_latency);
    let coordinator = SubmissionCoordinator::new(adapter).with_timeout(config.submission_timeout);

    Ok(Arc::new(AppState::new(catalog, coordinator)))
}
