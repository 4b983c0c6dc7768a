use crate::webserver::{state::AppState, templates};
use axum::{
    extract::State,
    response::Html,
    Router,
};
use std::sync::Arc;

pub mod status;
pub mod system;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", axum::routing::get(landing_page))
        .merge(status::routes())
        .merge(system::routes())
        .with_state(state)
}

/// Landing page handler
async fn landing_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(templates::status_page(&state.config.version))
}
