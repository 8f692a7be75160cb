//! HTTP surface: router, handlers and middleware

pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router.
///
/// Ship resources live under `/rest`; `/health` sits at the root.
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/rest", routes::ship_routes())
        .layer(DefaultBodyLimit::max(server.max_request_body_size))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(&server.cors_origins) {
        router = router.layer(cors);
    }

    router.with_state(state)
}

/// `None` when no origins are configured, which leaves CORS headers off entirely.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    tracing::info!(origins = ?origins, "CORS enabled");
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_is_off_without_origins() {
        assert!(cors_layer(&[]).is_none());
    }

    #[test]
    fn cors_is_on_with_a_valid_origin() {
        assert!(cors_layer(&["https://fleet.example".to_string()]).is_some());
    }

    #[test]
    fn invalid_origins_alone_leave_cors_off() {
        assert!(cors_layer(&["bad\norigin".to_string()]).is_none());
    }
}
