use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::labels::dtos as labels_dtos;
use crate::features::prompts::{dtos as prompts_dtos, handlers as prompts_handlers};
use crate::features::search::{dtos as search_dtos, handlers as search_handlers};
use crate::features::tools::{dtos as tools_dtos, handlers as tools_handlers};
use crate::shared::types::{ErrorResponse, MessageResponse, PaginatedResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Prompts
        prompts_handlers::prompt_handler::list_prompts,
        prompts_handlers::prompt_handler::create_prompt,
        prompts_handlers::prompt_handler::get_prompt,
        prompts_handlers::prompt_handler::update_prompt,
        prompts_handlers::prompt_handler::delete_prompt,
        prompts_handlers::prompt_handler::related_prompts,
        // Categories
        categories_handlers::category_handler::list_categories,
        categories_handlers::category_handler::create_category,
        categories_handlers::category_handler::category_stats,
        categories_handlers::category_handler::get_category,
        categories_handlers::category_handler::update_category,
        categories_handlers::category_handler::delete_category,
        // Tools
        tools_handlers::tool_handler::list_tools,
        tools_handlers::tool_handler::create_tool,
        tools_handlers::tool_handler::tool_stats,
        tools_handlers::tool_handler::get_tool,
        tools_handlers::tool_handler::update_tool,
        tools_handlers::tool_handler::delete_tool,
        // Search
        search_handlers::search_handler::search_all,
        // Auth
        auth::handler::protected,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            // Labels
            labels_dtos::CreateLabelDto,
            labels_dtos::UpdateLabelDto,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryStatsDto,
            PaginatedResponse<categories_dtos::CategoryResponseDto>,
            // Tools
            tools_dtos::ToolResponseDto,
            tools_dtos::ToolStatsDto,
            PaginatedResponse<tools_dtos::ToolResponseDto>,
            // Prompts
            prompts_dtos::CreatePromptDto,
            prompts_dtos::UpdatePromptDto,
            prompts_dtos::PromptResponseDto,
            PaginatedResponse<prompts_dtos::PromptResponseDto>,
            // Search
            search_dtos::SearchResultsDto,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dto::ProtectedResponseDto,
        )
    ),
    tags(
        (name = "prompts", description = "Prompt library entries"),
        (name = "categories", description = "Prompt categories"),
        (name = "tools", description = "AI tools prompts are written for"),
        (name = "search", description = "Search across prompts, categories and tools"),
        (name = "auth", description = "Bearer token checks"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Prompt Library API",
        version = "0.1.0",
        description = "API documentation for the prompt library",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
