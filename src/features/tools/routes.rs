use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::tools::handlers;
use crate::features::tools::services::ToolService;

/// Create routes for the tools feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<ToolService>) -> Router {
    Router::new()
        .route(
            "/api/tools",
            get(handlers::list_tools).post(handlers::create_tool),
        )
        .route("/api/tools/stats", get(handlers::tool_stats))
        .route(
            "/api/tools/{id}",
            get(handlers::get_tool)
                .patch(handlers::update_tool)
                .delete(handlers::delete_tool),
        )
        .with_state(service)
}
