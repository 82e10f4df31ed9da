use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::labels::dtos::{CreateLabelDto, UpdateLabelDto};
use crate::features::labels::LabelService;
use crate::modules::store::{CatalogStore, LabelKind, LabelRow, LabelUsage};
use crate::shared::query::LabelFilterOptions;
use crate::shared::types::PaginatedResponse;

/// A label catalog exposed over HTTP: its table and its response shapes
pub trait LabelCatalog: Send + Sync + 'static {
    const KIND: LabelKind;
    type Response: From<LabelRow> + Serialize + Send + 'static;
    type Stats: From<LabelUsage> + Serialize + Send + 'static;
}

/// Service for one label catalog, mapping rows to that catalog's DTOs
pub struct CatalogService<C: LabelCatalog> {
    labels: LabelService,
    catalog: PhantomData<C>,
}

impl<C: LabelCatalog> fmt::Debug for CatalogService<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService")
            .field("labels", &self.labels)
            .finish()
    }
}

impl<C: LabelCatalog> CatalogService<C> {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            labels: LabelService::new(store, C::KIND),
            catalog: PhantomData,
        }
    }

    pub fn noun(&self) -> &'static str {
        C::KIND.noun()
    }

    /// List labels alphabetically
    pub async fn get_all(
        &self,
        options: &LabelFilterOptions,
    ) -> Result<PaginatedResponse<C::Response>> {
        Ok(self.labels.get_all(options).await?.map(Into::into))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<C::Response>> {
        Ok(self.labels.get_by_id(id).await?.map(Into::into))
    }

    pub async fn create(&self, dto: CreateLabelDto) -> Result<C::Response> {
        Ok(self.labels.create(dto).await?.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateLabelDto) -> Option<C::Response> {
        self.labels.update(id, dto).await.map(Into::into)
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        self.labels.delete(id).await
    }

    /// Usage count per label, most used first
    pub async fn stats(&self) -> Result<Vec<C::Stats>> {
        Ok(self
            .labels
            .stats()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<C::Response>> {
        Ok(self
            .labels
            .search(term, limit)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
