//! Router construction for the onboarding server.

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::create_onboard_router;
use crate::state::AppState;
use crate::ui::create_ui_router;

/// Build the full axum router: form pages, JSON API and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(create_ui_router(state))
        .merge(create_onboard_router())
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
}
