use crate::state::App;
use axum::{routing::get, Extension, Router};
use std::sync::Arc;

mod leaderboard;

/// Creates the router for the application routes
///
/// `app` The shared application state
pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/", get(leaderboard::get_page))
        .layer(Extension(app))
}
