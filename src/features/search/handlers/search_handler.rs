use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::QueryPairs;
use crate::features::search::dtos::{SearchQueryParams, SearchResultsDto};
use crate::features::search::services::SearchService;
use crate::shared::types::ErrorResponse;

/// Search prompts, categories and tools at once
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQueryParams),
    responses(
        (status = 200, description = "Up to five matches of each kind", body = SearchResultsDto),
        (status = 400, description = "Missing search term", body = ErrorResponse)
    ),
    tag = "search"
)]
pub async fn search_all(
    State(service): State<Arc<SearchService>>,
    pairs: QueryPairs,
) -> Result<Json<SearchResultsDto>> {
    let params = SearchQueryParams::from_pairs(&pairs)?;
    Ok(Json(service.search_all(&params.q).await?))
}
