pub mod auth;
pub mod categories;
pub mod labels;
pub mod prompts;
pub mod search;
pub mod tools;

use std::sync::Arc;

use axum::Router;

use crate::core::middleware;
use crate::modules::store::CatalogStore;
use auth::JwtValidator;
use categories::CategoryService;
use prompts::PromptService;
use search::SearchService;
use tools::ToolService;

/// Every `/api` route, with the protected ones behind bearer auth
pub fn api_routes(store: Arc<dyn CatalogStore>, jwt_validator: Arc<JwtValidator>) -> Router {
    let prompt_service = Arc::new(PromptService::new(Arc::clone(&store)));
    let category_service = Arc::new(CategoryService::new(Arc::clone(&store)));
    let tool_service = Arc::new(ToolService::new(store));
    let search_service = Arc::new(SearchService::new(
        Arc::clone(&prompt_service),
        Arc::clone(&category_service),
        Arc::clone(&tool_service),
    ));
    tracing::info!("Catalog services initialized");

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth::routes::protected_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_validator,
            middleware::auth_middleware,
        ));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(prompts::routes::routes(prompt_service))
        .merge(categories::routes::routes(category_service))
        .merge(tools::routes::routes(tool_service))
        .merge(search::routes::routes(search_service));

    Router::new().merge(protected_routes).merge(public_routes)
}
