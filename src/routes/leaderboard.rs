use crate::state::App;
use axum::{response::Html, Extension};
use std::sync::Arc;

/// GET /
///
/// Loads the leaderboard page. Every page load performs one fetch
/// of the leaderboard scores and renders the result into a fresh
/// table, a failed fetch renders an empty table
pub async fn get_page(Extension(app): Extension<Arc<App>>) -> Html<String> {
    let table = app.leaderboard.load().await;
    Html(table.render(&app.title))
}
