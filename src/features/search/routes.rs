use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::search::{handlers, services::SearchService};

pub fn routes(service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/api/search", get(handlers::search_all))
        .with_state(service)
}
