//! Request handling shared by the category and tool routes. Each catalog keeps
//! its own annotated handlers and delegates here.

use axum::{http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::QueryPairs;
use crate::features::labels::dtos::{CreateLabelDto, LabelQueryParams, UpdateLabelDto};
use crate::features::labels::{CatalogService, LabelCatalog};
use crate::shared::types::{parse_path_id, MessageResponse, PaginatedResponse};

fn not_found<C: LabelCatalog>(service: &CatalogService<C>) -> AppError {
    AppError::NotFound(format!("{} not found", service.noun()))
}

pub async fn list<C: LabelCatalog>(
    service: &CatalogService<C>,
    pairs: &QueryPairs,
) -> Result<Json<PaginatedResponse<C::Response>>> {
    let params = LabelQueryParams::from_pairs(pairs)?;
    Ok(Json(service.get_all(&params.into()).await?))
}

pub async fn create<C: LabelCatalog>(
    service: &CatalogService<C>,
    dto: CreateLabelDto,
) -> Result<(StatusCode, Json<C::Response>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let label = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(label)))
}

pub async fn stats<C: LabelCatalog>(service: &CatalogService<C>) -> Result<Json<Vec<C::Stats>>> {
    Ok(Json(service.stats().await?))
}

pub async fn get<C: LabelCatalog>(
    service: &CatalogService<C>,
    id: &str,
) -> Result<Json<C::Response>> {
    let id = parse_path_id(id, service.noun())?;
    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(service))
}

/// 404 when the label is missing, 500 when the store swallowed the write
pub async fn update<C: LabelCatalog>(
    service: &CatalogService<C>,
    id: &str,
    dto: UpdateLabelDto,
) -> Result<Json<C::Response>> {
    let id = parse_path_id(id, service.noun())?;
    if service.get_by_id(id).await?.is_none() {
        return Err(not_found(service));
    }
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.update(id, dto).await.map(Json).ok_or_else(|| {
        AppError::Internal(format!(
            "Failed to update {}",
            service.noun().to_lowercase()
        ))
    })
}

pub async fn delete<C: LabelCatalog>(
    service: &CatalogService<C>,
    id: &str,
) -> Result<Json<MessageResponse>> {
    let id = parse_path_id(id, service.noun())?;
    if service.get_by_id(id).await?.is_none() {
        return Err(not_found(service));
    }

    if !service.delete(id).await {
        return Err(AppError::Internal(format!(
            "Failed to delete {}",
            service.noun().to_lowercase()
        )));
    }
    Ok(Json(MessageResponse {
        message: format!("{} deleted successfully", service.noun()),
    }))
}
