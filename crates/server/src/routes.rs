use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::UserStore;

use crate::middleware::require_json;
use crate::users;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router around a shared user store.
pub fn build_router(store: Arc<UserStore>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/user", get(users::list_users).post(users::create_user))
        .route(
            "/user/:uid",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(store)
        .layer(middleware::from_fn(require_json))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
