pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;
pub mod workflow;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/conferences",
            get(routes::conferences::index).post(routes::conferences::store),
        )
        .route(
            "/conferences/:id",
            get(routes::conferences::show)
                .put(routes::conferences::update)
                .delete(routes::conferences::destroy),
        )
        .route("/users", get(routes::users::index))
        .route(
            "/papers",
            get(routes::papers::index),
        )
        .route(
            "/papers/:id",
            get(routes::papers::show)
                .put(routes::papers::update)
                .delete(routes::papers::destroy),
        )
        .route("/submissions", get(routes::submissions::index).post(routes::submissions::store))
        .route("/papers/:id/assignments", post(routes::assignments::store))
        .route("/assignments", get(routes::assignments::index))
        .route(
            "/assignments/:id",
            get(routes::assignments::show)
                .put(routes::assignments::update)
                .delete(routes::assignments::destroy),
        )
        .route(
            "/papers/:id/reviews",
            get(routes::reviews::index).post(routes::reviews::store),
        )
        .route("/papers/:id/decision", post(routes::decisions::accept))
        .route("/papers/:id/reject", post(routes::decisions::reject))
        .route("/dashboard", get(routes::dashboard::show))
        .route("/files/:filename", get(routes::files::download))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
