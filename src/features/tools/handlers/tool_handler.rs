use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, QueryPairs};
use crate::features::labels::dtos::{CreateLabelDto, LabelQueryParams, UpdateLabelDto};
use crate::features::labels::handlers::label_handler;
use crate::features::tools::dtos::{ToolResponseDto, ToolStatsDto};
use crate::features::tools::services::ToolService;
use crate::shared::types::{ErrorResponse, MessageResponse, PaginatedResponse};

/// List tools
#[utoipa::path(
    get,
    path = "/api/tools",
    params(LabelQueryParams),
    responses(
        (status = 200, description = "Tools ordered by name", body = PaginatedResponse<ToolResponseDto>),
        (status = 400, description = "Invalid pagination", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn list_tools(
    State(service): State<Arc<ToolService>>,
    pairs: QueryPairs,
) -> Result<Json<PaginatedResponse<ToolResponseDto>>> {
    label_handler::list(&service, &pairs).await
}

/// Create a tool
#[utoipa::path(
    post,
    path = "/api/tools",
    request_body = CreateLabelDto,
    responses(
        (status = 201, description = "Tool created", body = ToolResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn create_tool(
    State(service): State<Arc<ToolService>>,
    AppJson(dto): AppJson<CreateLabelDto>,
) -> Result<(StatusCode, Json<ToolResponseDto>)> {
    label_handler::create(&service, dto).await
}

/// Usage count per tool
#[utoipa::path(
    get,
    path = "/api/tools/stats",
    responses(
        (status = 200, description = "Tools with live prompt counts, most used first", body = Vec<ToolStatsDto>)
    ),
    tag = "tools"
)]
pub async fn tool_stats(
    State(service): State<Arc<ToolService>>,
) -> Result<Json<Vec<ToolStatsDto>>> {
    label_handler::stats(&service).await
}

/// Get a tool by ID
#[utoipa::path(
    get,
    path = "/api/tools/{id}",
    params(
        ("id" = String, Path, description = "Tool ID")
    ),
    responses(
        (status = 200, description = "Tool found", body = ToolResponseDto),
        (status = 404, description = "Tool not found", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn get_tool(
    State(service): State<Arc<ToolService>>,
    Path(id): Path<String>,
) -> Result<Json<ToolResponseDto>> {
    label_handler::get(&service, &id).await
}

/// Update a tool
#[utoipa::path(
    patch,
    path = "/api/tools/{id}",
    params(
        ("id" = String, Path, description = "Tool ID")
    ),
    request_body = UpdateLabelDto,
    responses(
        (status = 200, description = "Tool updated", body = ToolResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Tool not found", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn update_tool(
    State(service): State<Arc<ToolService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateLabelDto>,
) -> Result<Json<ToolResponseDto>> {
    label_handler::update(&service, &id, dto).await
}

/// Delete a tool, detaching it from every prompt
#[utoipa::path(
    delete,
    path = "/api/tools/{id}",
    params(
        ("id" = String, Path, description = "Tool ID")
    ),
    responses(
        (status = 200, description = "Tool deleted", body = MessageResponse),
        (status = 404, description = "Tool not found", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn delete_tool(
    State(service): State<Arc<ToolService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    label_handler::delete(&service, &id).await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::test_server;

    #[tokio::test]
    async fn test_create_and_list_tools() {
        let (server, _) = test_server();
        for name in ["Midjourney", "ChatGPT"] {
            server
                .post("/api/tools")
                .json(&json!({ "name": name }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let listed = server.get("/api/tools").await;
        listed.assert_status_ok();
        let body = listed.json::<Value>();
        assert_eq!(body["totalItems"], 2);
        assert_eq!(body["currentPage"], 1);
        assert_eq!(body["items"][0]["name"], "ChatGPT");

        let searched = server
            .get("/api/tools")
            .add_query_param("search", "journey")
            .await
            .json::<Value>();
        assert_eq!(searched["totalItems"], 1);
    }

    #[tokio::test]
    async fn test_rename_and_stats() {
        let (server, _) = test_server();
        let created = server
            .post("/api/tools")
            .json(&json!({ "name": "GPT" }))
            .await
            .json::<Value>();
        let id = created["id"].as_str().unwrap();

        let renamed = server
            .patch(&format!("/api/tools/{}", id))
            .json(&json!({ "name": "ChatGPT" }))
            .await;
        renamed.assert_status_ok();
        assert_eq!(renamed.json::<Value>()["name"], "ChatGPT");

        let stats = server.get("/api/tools/stats").await.json::<Value>();
        assert_eq!(stats[0]["tool"]["name"], "ChatGPT");
        assert_eq!(stats[0]["promptCount"], 0);
    }

    #[tokio::test]
    async fn test_patch_missing_tool_is_not_found() {
        let (server, _) = test_server();
        server
            .patch(&format!("/api/tools/{}", uuid::Uuid::new_v4()))
            .json(&json!({ "name": "x" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (server, _) = test_server();
        let response = server
            .post("/api/tools")
            .content_type("application/json")
            .bytes("{ not json".into())
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }
}
