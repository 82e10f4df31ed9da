use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::Result;
use crate::features::prompts::dtos::{CreatePromptDto, PromptResponseDto, UpdatePromptDto};
use crate::modules::store::{CatalogStore, LabelKind, NewPrompt, PromptPatch};
use crate::shared::constants::{DEFAULT_RELATED_LIMIT, MAX_PAGE_SIZE};
use crate::shared::query::{dedup_ids, FilterOptions, PromptFilter, PromptQuery};
use crate::shared::types::{PageWindow, PaginatedResponse, Pagination};

pub struct PromptService {
    store: Arc<dyn CatalogStore>,
}

impl std::fmt::Debug for PromptService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptService")
            .field("store", &"<CatalogStore>")
            .finish()
    }
}

impl PromptService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// List live prompts matching the filters, most recently updated first
    pub async fn get_all(
        &self,
        options: &FilterOptions,
    ) -> Result<PaginatedResponse<PromptResponseDto>> {
        let query = options.build()?;

        let total = self.store.count_prompts(&query.filter).await?;
        let records = self.store.find_prompts(&query).await?;

        Ok(PaginatedResponse::new(records, total, query.pagination).map(Into::into))
    }

    /// `None` for absent and soft-deleted prompts
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<PromptResponseDto>> {
        Ok(self.store.find_prompt(id).await?.map(Into::into))
    }

    /// Insert the prompt together with its category and tool links
    pub async fn create(&self, dto: CreatePromptDto) -> Result<PromptResponseDto> {
        let record = self
            .store
            .insert_prompt(NewPrompt {
                id: Uuid::new_v4(),
                title: dto.title,
                content: dto.content,
                description: dto.description,
                author_id: dto.author_id,
                category_ids: dedup_ids(&dto.category_ids.unwrap_or_default()),
                tool_ids: dedup_ids(&dto.tool_ids.unwrap_or_default()),
            })
            .await?;

        tracing::info!(
            "Prompt created: {} by {} ({} categories, {} tools)",
            record.prompt.id,
            record.prompt.author_id,
            record.categories.len(),
            record.tools.len()
        );
        Ok(record.into())
    }

    /// Patch a live prompt. Supplied id lists replace the existing links.
    /// `None` when the prompt is absent, soft-deleted, or the write failed.
    pub async fn update(&self, id: Uuid, dto: UpdatePromptDto) -> Option<PromptResponseDto> {
        let mut patch = PromptPatch::from(dto);
        patch.category_ids = patch.category_ids.as_deref().map(dedup_ids);
        patch.tool_ids = patch.tool_ids.as_deref().map(dedup_ids);
        let relinks = patch.category_ids.is_some() || patch.tool_ids.is_some();
        let touches_scalars = patch.touches_scalars();

        match self.store.update_prompt(id, patch).await {
            Ok(Some(record)) => {
                tracing::info!(
                    "Prompt updated: {} (fields: {}, links: {})",
                    id,
                    touches_scalars,
                    relinks
                );
                Some(record.into())
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Failed to update prompt {}: {:?}", id, e);
                None
            }
        }
    }

    /// Soft delete. `false` when the prompt is absent, already deleted, or the
    /// write failed.
    pub async fn delete(&self, id: Uuid) -> bool {
        match self.store.soft_delete_prompt(id).await {
            Ok(deleted) => {
                if deleted {
                    tracing::info!("Prompt soft-deleted: {}", id);
                }
                deleted
            }
            Err(e) => {
                tracing::error!("Failed to delete prompt {}: {:?}", id, e);
                false
            }
        }
    }

    /// The submitted ids that name no existing category (or tool)
    pub async fn unknown_label_ids(&self, kind: LabelKind, ids: &[Uuid]) -> Result<Vec<Uuid>> {
        let ids = dedup_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let existing = self.store.existing_label_ids(kind, &ids).await?;
        Ok(ids.into_iter().filter(|id| !existing.contains(id)).collect())
    }

    /// Live prompts sharing a category or tool with `id`, newest first.
    /// `None` when the reference prompt is absent.
    pub async fn related(
        &self,
        id: Uuid,
        limit: Option<i64>,
    ) -> Result<Option<Vec<PromptResponseDto>>> {
        let Some(reference) = self.store.find_prompt(id).await? else {
            return Ok(None);
        };

        let category_ids: Vec<Uuid> = reference.categories.iter().map(|c| c.id).collect();
        let tool_ids: Vec<Uuid> = reference.tools.iter().map(|t| t.id).collect();
        let limit = limit.unwrap_or(DEFAULT_RELATED_LIMIT).clamp(1, MAX_PAGE_SIZE);

        let related = self
            .store
            .find_related_prompts(id, &category_ids, &tool_ids, limit)
            .await?;
        Ok(Some(related.into_iter().map(Into::into).collect()))
    }

    /// First `limit` live prompts matching `term` in title, content or description
    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<PromptResponseDto>> {
        let pagination = Pagination::new(Some(1), Some(limit), limit)?;
        let query = PromptQuery {
            filter: PromptFilter::search(term),
            window: PageWindow::first(pagination.page_size),
            pagination,
        };

        let records = self.store.find_prompts(&query).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
