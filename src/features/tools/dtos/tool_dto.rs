use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::store::{LabelRow, LabelUsage};
use crate::shared::types::non_empty;

/// Response DTO for tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ToolResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<LabelRow> for ToolResponseDto {
    fn from(row: LabelRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: non_empty(row.description),
        }
    }
}

/// A tool with the number of live prompts using it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolStatsDto {
    pub tool: ToolResponseDto,
    pub prompt_count: i64,
}

impl From<LabelUsage> for ToolStatsDto {
    fn from(usage: LabelUsage) -> Self {
        Self {
            tool: usage.label.into(),
            prompt_count: usage.prompt_count,
        }
    }
}
