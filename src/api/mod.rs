use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::constants::messages;
use crate::services::TreasureService;
use crate::state::SharedState;

mod error;
mod observability;
pub mod payload;
mod treasures;
mod types;

pub use error::{ApiError, ErrorKind};
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<Config> {
        &self.shared.config
    }

    #[must_use]
    pub fn treasure_service(&self) -> &Arc<dyn TreasureService> {
        &self.shared.treasure_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let (docs_path, cors_origins) = {
        let config = state.config();
        (
            config.server.docs_path.clone(),
            config.server.cors_allowed_origins.clone(),
        )
    };

    let api_router = Router::new()
        .route(
            "/treasures",
            get(treasures::search_treasures).post(treasures::create_treasure),
        )
        .route(
            "/treasures/{treasure_id}/boxes",
            post(treasures::create_treasure_box),
        )
        .route("/metrics", get(observability::get_metrics))
        .method_not_allowed_fallback(route_not_found)
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/", get(root))
        .method_not_allowed_fallback(route_not_found)
        .nest("/api", api_router)
        .nest_service("/docs", ServeDir::new(docs_path))
        .fallback(route_not_found)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::request_observer))
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the API".to_string(),
    })
}

async fn route_not_found() -> Response {
    let mut response = (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: messages::ROUTE_NOT_FOUND.to_string(),
            status_code: StatusCode::NOT_FOUND.as_u16(),
        }),
    )
        .into_response();
    response.extensions_mut().insert(ErrorKind::RouteNotFound);
    response
}
