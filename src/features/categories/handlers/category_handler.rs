use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, QueryPairs};
use crate::features::categories::dtos::{CategoryResponseDto, CategoryStatsDto};
use crate::features::categories::services::CategoryService;
use crate::features::labels::dtos::{CreateLabelDto, LabelQueryParams, UpdateLabelDto};
use crate::features::labels::handlers::label_handler;
use crate::shared::types::{ErrorResponse, MessageResponse, PaginatedResponse};

/// List categories
#[utoipa::path(
    get,
    path = "/api/categories",
    params(LabelQueryParams),
    responses(
        (status = 200, description = "Categories ordered by name", body = PaginatedResponse<CategoryResponseDto>),
        (status = 400, description = "Invalid pagination", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    pairs: QueryPairs,
) -> Result<Json<PaginatedResponse<CategoryResponseDto>>> {
    label_handler::list(&service, &pairs).await
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateLabelDto,
    responses(
        (status = 201, description = "Category created", body = CategoryResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateLabelDto>,
) -> Result<(StatusCode, Json<CategoryResponseDto>)> {
    label_handler::create(&service, dto).await
}

/// Usage count per category
#[utoipa::path(
    get,
    path = "/api/categories/stats",
    responses(
        (status = 200, description = "Categories with live prompt counts, most used first", body = Vec<CategoryStatsDto>)
    ),
    tag = "categories"
)]
pub async fn category_stats(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<Vec<CategoryStatsDto>>> {
    label_handler::stats(&service).await
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponseDto),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponseDto>> {
    label_handler::get(&service, &id).await
}

/// Update a category
#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body = UpdateLabelDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateLabelDto>,
) -> Result<Json<CategoryResponseDto>> {
    label_handler::update(&service, &id, dto).await
}

/// Delete a category, detaching it from every prompt
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
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
    async fn test_category_lifecycle() {
        let (server, _) = test_server();

        let created = server
            .post("/api/categories")
            .json(&json!({ "name": "Writing", "description": "Essays" }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

        let fetched = server.get(&format!("/api/categories/{}", id)).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>()["description"], "Essays");

        let patched = server
            .patch(&format!("/api/categories/{}", id))
            .json(&json!({ "description": null }))
            .await;
        patched.assert_status_ok();
        assert!(patched.json::<Value>().get("description").is_none());

        let deleted = server.delete(&format!("/api/categories/{}", id)).await;
        deleted.assert_status_ok();
        assert_eq!(
            deleted.json::<Value>()["message"],
            "Category deleted successfully"
        );

        server
            .get(&format!("/api/categories/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_without_name_is_rejected() {
        let (server, _) = test_server();
        let response = server
            .post("/api/categories")
            .json(&json!({ "description": "no name" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let (server, _) = test_server();
        server
            .post("/api/categories")
            .json(&json!({ "name": "Writing" }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/categories")
            .json(&json!({ "name": "Writing" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids_are_not_found() {
        let (server, _) = test_server();
        let missing = server
            .get(&format!("/api/categories/{}", uuid::Uuid::new_v4()))
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(missing.json::<Value>()["error"], "Category not found");

        server
            .delete("/api/categories/not-a-uuid")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_zero_page_is_rejected() {
        let (server, _) = test_server();
        server
            .get("/api/categories")
            .add_query_param("page", 0)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
