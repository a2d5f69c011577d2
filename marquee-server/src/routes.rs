use axum::{Router, http::HeaderValue, routing::get};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    AppState,
    handlers::{
        health::health_handler,
        titles::{get_title_handler, list_titles_handler},
    },
};

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/titles", get(list_titles_handler))
        .route("/titles/id/{id}", get(get_title_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// CORS for the listed origins; `None` when the list is empty.
pub fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
