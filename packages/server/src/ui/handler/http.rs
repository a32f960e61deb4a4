//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, response::Html};

use crate::{infrastructure::dto::http::HealthDto, ui::state::AppState};

/// Browser chat client served at `/`
const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// Landing page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let clients = state.get_health_usecase.execute().await;
    Json(HealthDto::ok(clients))
}
