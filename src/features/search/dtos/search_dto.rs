use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::{AppError, Result};
use crate::core::extractor::QueryPairs;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::prompts::dtos::PromptResponseDto;
use crate::features::tools::dtos::ToolResponseDto;

#[derive(Debug, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQueryParams {
    /// Term matched case-insensitively against prompts, categories and tools
    pub q: String,
}

impl SearchQueryParams {
    pub fn from_pairs(pairs: &QueryPairs) -> Result<Self> {
        let q = pairs
            .get("q")
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::Validation("Search term 'q' is required".to_string()))?;
        Ok(Self { q: q.to_string() })
    }
}

/// A handful of matches per entity type
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResultsDto {
    pub prompts: Vec<PromptResponseDto>,
    pub categories: Vec<CategoryResponseDto>,
    pub tools: Vec<ToolResponseDto>,
}
