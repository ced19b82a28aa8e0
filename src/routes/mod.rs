//! Router assembly: operational routes, appointment routes and HTTP middleware.

mod appointment;
mod common;

pub use appointment::appointment_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::http::HeaderValue;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Appointment payloads are a handful of short strings.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application router. An empty `cors_allow_origins` allows any origin.
pub fn app(state: AppState, cors_allow_origins: &[HeaderValue]) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(appointment_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
                .layer(cors_layer(cors_allow_origins)),
        )
}

fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_methods(Any)
        .allow_headers(Any)
}
