use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, QueryPairs};
use crate::features::prompts::dtos::{
    CreatePromptDto, PromptQueryParams, PromptResponseDto, RelatedQueryParams, UpdatePromptDto,
};
use crate::features::prompts::services::PromptService;
use crate::modules::store::LabelKind;
use crate::shared::types::{parse_path_id, ErrorResponse, MessageResponse, PaginatedResponse};

/// Reject ids that name no existing category/tool before anything is written
async fn ensure_labels_exist(
    service: &PromptService,
    category_ids: Option<&[Uuid]>,
    tool_ids: Option<&[Uuid]>,
) -> Result<()> {
    for (kind, ids) in [
        (LabelKind::Category, category_ids),
        (LabelKind::Tool, tool_ids),
    ] {
        let Some(ids) = ids else { continue };
        let unknown = service.unknown_label_ids(kind, ids).await?;
        if !unknown.is_empty() {
            let listed: Vec<String> = unknown.iter().map(Uuid::to_string).collect();
            return Err(AppError::BadRequest(format!(
                "Unknown {} ids: {}",
                kind.noun().to_lowercase(),
                listed.join(", ")
            )));
        }
    }
    Ok(())
}

/// List prompts with filters and pagination
#[utoipa::path(
    get,
    path = "/api/prompts",
    params(PromptQueryParams),
    responses(
        (status = 200, description = "Prompts retrieved successfully", body = PaginatedResponse<PromptResponseDto>),
        (status = 400, description = "Invalid filter or pagination", body = ErrorResponse)
    ),
    tag = "prompts"
)]
pub async fn list_prompts(
    State(service): State<Arc<PromptService>>,
    pairs: QueryPairs,
) -> Result<Json<PaginatedResponse<PromptResponseDto>>> {
    let params = PromptQueryParams::from_pairs(&pairs)?;
    let prompts = service.get_all(&params.into()).await?;
    Ok(Json(prompts))
}

/// Create a new prompt
#[utoipa::path(
    post,
    path = "/api/prompts",
    request_body = CreatePromptDto,
    responses(
        (status = 201, description = "Prompt created successfully", body = PromptResponseDto),
        (status = 400, description = "Validation error or unknown category/tool", body = ErrorResponse)
    ),
    tag = "prompts"
)]
pub async fn create_prompt(
    State(service): State<Arc<PromptService>>,
    AppJson(dto): AppJson<CreatePromptDto>,
) -> Result<(StatusCode, Json<PromptResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    ensure_labels_exist(&service, dto.category_ids.as_deref(), dto.tool_ids.as_deref()).await?;

    let prompt = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(prompt)))
}

/// Get a prompt by ID
#[utoipa::path(
    get,
    path = "/api/prompts/{id}",
    params(
        ("id" = String, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Prompt retrieved successfully", body = PromptResponseDto),
        (status = 404, description = "Prompt not found", body = ErrorResponse)
    ),
    tag = "prompts"
)]
pub async fn get_prompt(
    State(service): State<Arc<PromptService>>,
    Path(id): Path<String>,
) -> Result<Json<PromptResponseDto>> {
    let id = parse_path_id(&id, "Prompt")?;
    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))
}

/// Update a prompt
#[utoipa::path(
    patch,
    path = "/api/prompts/{id}",
    params(
        ("id" = String, Path, description = "Prompt ID")
    ),
    request_body = UpdatePromptDto,
    responses(
        (status = 200, description = "Prompt updated successfully", body = PromptResponseDto),
        (status = 400, description = "Validation error or unknown category/tool", body = ErrorResponse),
        (status = 404, description = "Prompt not found", body = ErrorResponse)
    ),
    tag = "prompts"
)]
pub async fn update_prompt(
    State(service): State<Arc<PromptService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdatePromptDto>,
) -> Result<Json<PromptResponseDto>> {
    let id = parse_path_id(&id, "Prompt")?;
    if service.get_by_id(id).await?.is_none() {
        return Err(AppError::NotFound("Prompt not found".to_string()));
    }
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    ensure_labels_exist(&service, dto.category_ids.as_deref(), dto.tool_ids.as_deref()).await?;

    service
        .update(id, dto)
        .await
        .map(Json)
        .ok_or_else(|| AppError::Internal("Failed to update prompt".to_string()))
}

/// Delete a prompt (soft delete)
#[utoipa::path(
    delete,
    path = "/api/prompts/{id}",
    params(
        ("id" = String, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Prompt deleted successfully", body = MessageResponse),
        (status = 404, description = "Prompt not found", body = ErrorResponse)
    ),
    tag = "prompts"
)]
pub async fn delete_prompt(
    State(service): State<Arc<PromptService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_path_id(&id, "Prompt")?;
    if service.get_by_id(id).await?.is_none() {
        return Err(AppError::NotFound("Prompt not found".to_string()));
    }

    if !service.delete(id).await {
        return Err(AppError::Internal("Failed to delete prompt".to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Prompt deleted successfully".to_string(),
    }))
}

/// Prompts sharing a category or tool with the given prompt
#[utoipa::path(
    get,
    path = "/api/prompts/{id}/related",
    params(
        ("id" = String, Path, description = "Prompt ID"),
        RelatedQueryParams
    ),
    responses(
        (status = 200, description = "Related prompts, newest first", body = Vec<PromptResponseDto>),
        (status = 404, description = "Prompt not found", body = ErrorResponse)
    ),
    tag = "prompts"
)]
pub async fn related_prompts(
    State(service): State<Arc<PromptService>>,
    Path(id): Path<String>,
    pairs: QueryPairs,
) -> Result<Json<Vec<PromptResponseDto>>> {
    let id = parse_path_id(&id, "Prompt")?;
    let params = RelatedQueryParams::from_pairs(&pairs)?;
    service
        .related(id, params.limit)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))
}
