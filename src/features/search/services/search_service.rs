use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::CategoryService;
use crate::features::prompts::PromptService;
use crate::features::search::dtos::SearchResultsDto;
use crate::features::tools::ToolService;
use crate::shared::constants::SEARCH_RESULTS_PER_KIND;

/// Cross-entity lookup used by the global search box
#[derive(Debug)]
pub struct SearchService {
    prompts: Arc<PromptService>,
    categories: Arc<CategoryService>,
    tools: Arc<ToolService>,
}

impl SearchService {
    pub fn new(
        prompts: Arc<PromptService>,
        categories: Arc<CategoryService>,
        tools: Arc<ToolService>,
    ) -> Self {
        Self {
            prompts,
            categories,
            tools,
        }
    }

    pub async fn search_all(&self, term: &str) -> Result<SearchResultsDto> {
        let (prompts, categories, tools) = tokio::try_join!(
            self.prompts.search(term, SEARCH_RESULTS_PER_KIND),
            self.categories.search(term, SEARCH_RESULTS_PER_KIND),
            self.tools.search(term, SEARCH_RESULTS_PER_KIND),
        )?;

        Ok(SearchResultsDto {
            prompts,
            categories,
            tools,
        })
    }
}
