use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::store::{LabelRow, LabelUsage};
use crate::shared::types::non_empty;

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<LabelRow> for CategoryResponseDto {
    fn from(row: LabelRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: non_empty(row.description),
        }
    }
}

/// A category with the number of live prompts using it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatsDto {
    pub category: CategoryResponseDto,
    pub prompt_count: i64,
}

impl From<LabelUsage> for CategoryStatsDto {
    fn from(usage: LabelUsage) -> Self {
        Self {
            category: usage.label.into(),
            prompt_count: usage.prompt_count,
        }
    }
}
