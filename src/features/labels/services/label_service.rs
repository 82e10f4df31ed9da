use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::Result;
use crate::features::labels::dtos::{CreateLabelDto, UpdateLabelDto};
use crate::modules::store::{CatalogStore, LabelKind, LabelRow, LabelUsage, NewLabel};
use crate::shared::query::{LabelFilter, LabelFilterOptions, LabelQuery};
use crate::shared::types::{PageWindow, PaginatedResponse, Pagination};

/// CRUD over one label catalog (categories or tools)
pub struct LabelService {
    store: Arc<dyn CatalogStore>,
    kind: LabelKind,
}

impl std::fmt::Debug for LabelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelService")
            .field("kind", &self.kind)
            .finish()
    }
}

impl LabelService {
    pub fn new(store: Arc<dyn CatalogStore>, kind: LabelKind) -> Self {
        Self { store, kind }
    }

    pub async fn get_all(&self, options: &LabelFilterOptions) -> Result<PaginatedResponse<LabelRow>> {
        let query = options.build()?;

        let total = self.store.count_labels(self.kind, &query.filter).await?;
        let items = self.store.list_labels(self.kind, &query).await?;

        Ok(PaginatedResponse::new(items, total, query.pagination))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<LabelRow>> {
        Ok(self.store.find_label(self.kind, id).await?)
    }

    pub async fn create(&self, dto: CreateLabelDto) -> Result<LabelRow> {
        let label = self
            .store
            .insert_label(
                self.kind,
                NewLabel {
                    id: Uuid::new_v4(),
                    name: dto.name,
                    description: dto.description,
                },
            )
            .await?;

        tracing::info!("{} created: {} ({})", self.kind.noun(), label.name, label.id);
        Ok(label)
    }

    /// `None` when the label does not exist or the write failed
    pub async fn update(&self, id: Uuid, dto: UpdateLabelDto) -> Option<LabelRow> {
        match self.store.update_label(self.kind, id, dto.into()).await {
            Ok(Some(label)) => {
                tracing::info!("{} updated: {}", self.kind.noun(), id);
                Some(label)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Failed to update {} {}: {:?}", self.kind.noun(), id, e);
                None
            }
        }
    }

    /// Hard delete, detaching the label from every prompt.
    /// `false` when the label does not exist or the write failed.
    pub async fn delete(&self, id: Uuid) -> bool {
        match self.store.delete_label(self.kind, id).await {
            Ok(deleted) => {
                if deleted {
                    tracing::info!("{} deleted: {}", self.kind.noun(), id);
                }
                deleted
            }
            Err(e) => {
                tracing::error!("Failed to delete {} {}: {:?}", self.kind.noun(), id, e);
                false
            }
        }
    }

    /// Every label with its live prompt count, most used first
    pub async fn stats(&self) -> Result<Vec<LabelUsage>> {
        Ok(self.store.label_usage(self.kind).await?)
    }

    /// First `limit` labels matching `term` by name or description
    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<LabelRow>> {
        let pagination = Pagination::new(Some(1), Some(limit), limit)?;
        let query = LabelQuery {
            filter: LabelFilter::search(term),
            window: PageWindow::first(pagination.page_size),
            pagination,
        };

        Ok(self.store.list_labels(self.kind, &query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::MemoryCatalogStore;

    fn service() -> (Arc<MemoryCatalogStore>, LabelService) {
        let store = Arc::new(MemoryCatalogStore::new());
        let service = LabelService::new(store.clone(), LabelKind::Category);
        (store, service)
    }

    fn create_dto(name: &str, description: Option<&str>) -> CreateLabelDto {
        CreateLabelDto {
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_get_all_is_alphabetical_and_paginated() {
        let (_, service) = service();
        for name in ["Writing", "Coding", "Marketing"] {
            service.create(create_dto(name, None)).await.unwrap();
        }

        let options = LabelFilterOptions {
            page: Some(1),
            page_size: Some(2),
            ..Default::default()
        };
        let page = service.get_all(&options).await.unwrap();
        let names: Vec<&str> = page.items.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Coding", "Marketing"]);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_get_all_searches_name_and_description() {
        let (_, service) = service();
        service.create(create_dto("Writing", Some("Essays and copy"))).await.unwrap();
        service.create(create_dto("Coding", None)).await.unwrap();

        let options = LabelFilterOptions {
            search: Some("ESSAY".to_string()),
            ..Default::default()
        };
        let page = service.get_all(&options).await.unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].name, "Writing");
    }

    #[tokio::test]
    async fn test_update_patches_only_supplied_fields() {
        let (_, service) = service();
        let label = service.create(create_dto("Writing", Some("old"))).await.unwrap();

        let updated = service
            .update(
                label.id,
                UpdateLabelDto {
                    description: Some(Some("new".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Writing");
        assert_eq!(updated.description.as_deref(), Some("new"));
        assert!(updated.updated_at > label.updated_at);

        let cleared = service
            .update(
                label.id,
                UpdateLabelDto {
                    description: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.description, None);
    }

    #[tokio::test]
    async fn test_update_and_delete_swallow_failures() {
        let (store, service) = service();
        let label = service.create(create_dto("Writing", None)).await.unwrap();

        assert!(service.update(Uuid::new_v4(), UpdateLabelDto::default()).await.is_none());
        assert!(!service.delete(Uuid::new_v4()).await);

        store.fail_writes(true);
        assert!(service.update(label.id, UpdateLabelDto::default()).await.is_none());
        assert!(!service.delete(label.id).await);

        store.fail_writes(false);
        assert!(service.delete(label.id).await);
        assert!(service.get_by_id(label.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_is_capped() {
        let (_, service) = service();
        for i in 0..8 {
            service
                .create(create_dto(&format!("Prompting {}", i), None))
                .await
                .unwrap();
        }
        assert_eq!(service.search("prompting", 5).await.unwrap().len(), 5);
        assert!(service.search("nothing", 5).await.unwrap().is_empty());
    }
}
