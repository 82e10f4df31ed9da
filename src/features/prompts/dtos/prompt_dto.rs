use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::QueryPairs;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::tools::dtos::ToolResponseDto;
use crate::modules::store::{PromptPatch, PromptRecord};
use crate::shared::query::FilterOptions;
use crate::shared::serde_helpers::double_option;
use crate::shared::types::{non_empty, parse_i64_param};

// Query params for listing prompts
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PromptQueryParams {
    /// Search in title, content or description (case-insensitive)
    pub search_term: Option<String>,

    /// Search in title only (case-insensitive)
    pub title: Option<String>,

    /// Exact owner match
    pub author_id: Option<String>,

    /// Repeat the key to match any of several categories
    pub category_ids: Vec<Uuid>,

    /// Repeat the key to match any of several tools
    pub tool_ids: Vec<Uuid>,

    /// Page number (1-indexed)
    #[param(minimum = 1)]
    pub page: Option<i64>,

    /// Items per page (default: 10)
    #[param(minimum = 1, maximum = 100)]
    pub page_size: Option<i64>,
}

fn parse_ids(name: &str, values: Vec<&str>) -> Result<Vec<Uuid>> {
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            Uuid::parse_str(v)
                .map_err(|_| AppError::Validation(format!("{} must contain valid UUIDs", name)))
        })
        .collect()
}

impl PromptQueryParams {
    pub fn from_pairs(pairs: &QueryPairs) -> Result<Self> {
        Ok(Self {
            search_term: pairs.get("searchTerm").map(str::to_string),
            title: pairs.get("title").map(str::to_string),
            author_id: pairs.get("authorId").map(str::to_string),
            category_ids: parse_ids("categoryIds", pairs.get_all("categoryIds"))?,
            tool_ids: parse_ids("toolIds", pairs.get_all("toolIds"))?,
            page: parse_i64_param("page", pairs.get("page"))?,
            page_size: parse_i64_param("pageSize", pairs.get("pageSize"))?,
        })
    }
}

impl From<PromptQueryParams> for FilterOptions {
    fn from(params: PromptQueryParams) -> Self {
        Self {
            search_term: params.search_term,
            title: params.title,
            category_ids: params.category_ids,
            tool_ids: params.tool_ids,
            author_id: params.author_id,
            page: params.page,
            page_size: params.page_size,
        }
    }
}

#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RelatedQueryParams {
    /// Maximum number of prompts (default: 5)
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
}

impl RelatedQueryParams {
    pub fn from_pairs(pairs: &QueryPairs) -> Result<Self> {
        Ok(Self {
            limit: parse_i64_param("limit", pairs.get("limit"))?,
        })
    }
}

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromptDto {
    #[validate(length(min = 1, max = 500, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 255, message = "authorId is required"))]
    pub author_id: String,

    /// Defaults to no categories
    pub category_ids: Option<Vec<Uuid>>,

    /// Defaults to no tools
    pub tool_ids: Option<Vec<Uuid>>,
}

// Update request. Omitted fields are left untouched; a supplied id list
// replaces the whole set, so `[]` detaches everything.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromptDto {
    #[validate(length(min = 1, max = 500, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,

    /// `null` clears the description
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    pub category_ids: Option<Vec<Uuid>>,

    pub tool_ids: Option<Vec<Uuid>>,
}

impl From<UpdatePromptDto> for PromptPatch {
    fn from(dto: UpdatePromptDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            description: dto.description,
            category_ids: dto.category_ids,
            tool_ids: dto.tool_ids,
        }
    }
}

// Response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponseDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub categories: Vec<CategoryResponseDto>,
    pub tools: Vec<ToolResponseDto>,
}

impl From<PromptRecord> for PromptResponseDto {
    fn from(record: PromptRecord) -> Self {
        let p = record.prompt;
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            description: non_empty(p.description),
            author_id: p.author_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
            deleted_at: p.deleted_at,
            categories: record.categories.into_iter().map(Into::into).collect(),
            tools: record.tools.into_iter().map(Into::into).collect(),
        }
    }
}
