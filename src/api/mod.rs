mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::CatalogClient;
use crate::config::AppConfig;

/// Shared, read-only state. Every request works on its own canvas snapshot.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Option<CatalogClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let catalog = config
            .catalog_url
            .as_ref()
            .map(|url| CatalogClient::new(url.clone(), config.catalog_api_key.clone()));
        Self {
            config: Arc::new(config),
            catalog,
        }
    }
}

pub fn create_router(config: AppConfig) -> Router {
    let state = AppState::new(config);

    let api = Router::new()
        // Identity
        .route("/me", get(handlers::me))
        // Canvas
        .route("/canvas/seed", post(handlers::seed_canvas))
        .route("/canvas/add", post(handlers::add_activity))
        .route("/canvas/remove", post(handlers::remove_activity))
        .route("/canvas/reorder", post(handlers::reorder_canvas))
        .route("/canvas/summary", post(handlers::summarize_canvas))
        // Catalog
        .route("/catalog/search", post(handlers::search_catalog))
        .route("/catalog/offerings", post(handlers::browse_offerings))
        .route("/offerings/{id}/detail", get(handlers::offering_detail))
        .route("/offerings/{id}/canvas", get(handlers::offering_canvas))
        .route("/offerings/{id}/estimate", get(handlers::offering_estimate))
        // Reports
        .route("/reports/{format}", post(handlers::render_report))
        .layer(from_fn_with_state(state.clone(), middleware::identify_user))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
