use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::prompts::{handlers, services::PromptService};

/// Create routes for prompt management
pub fn routes(service: Arc<PromptService>) -> Router {
    Router::new()
        .route(
            "/api/prompts",
            get(handlers::list_prompts).post(handlers::create_prompt),
        )
        .route(
            "/api/prompts/{id}",
            get(handlers::get_prompt)
                .patch(handlers::update_prompt)
                .delete(handlers::delete_prompt),
        )
        .route("/api/prompts/{id}/related", get(handlers::related_prompts))
        .with_state(service)
}
