use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::QueryPairs;
use crate::modules::store::LabelPatch;
use crate::shared::query::LabelFilterOptions;
use crate::shared::serde_helpers::double_option;
use crate::shared::types::parse_i64_param;

/// Query params for listing categories or tools
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct LabelQueryParams {
    /// Search in name or description (case-insensitive)
    pub search: Option<String>,
    /// Page number (1-indexed, default: 1)
    #[param(minimum = 1)]
    pub page: Option<i64>,
    /// Items per page (default and max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub page_size: Option<i64>,
}

impl LabelQueryParams {
    pub fn from_pairs(pairs: &QueryPairs) -> Result<Self> {
        Ok(Self {
            search: pairs.get("search").map(str::to_string),
            page: parse_i64_param("page", pairs.get("page"))?,
            page_size: parse_i64_param("pageSize", pairs.get("pageSize"))?,
        })
    }
}

impl From<LabelQueryParams> for LabelFilterOptions {
    fn from(params: LabelQueryParams) -> Self {
        Self {
            search: params.search,
            page: params.page,
            page_size: params.page_size,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLabelDto {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    pub description: Option<String>,
}

/// Partial update. Send `"description": null` to clear the description.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLabelDto {
    #[validate(length(min = 1, max = 200, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl From<UpdateLabelDto> for LabelPatch {
    fn from(dto: UpdateLabelDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }
}
