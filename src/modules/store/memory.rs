use std::collections::{BTreeSet, HashMap};
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CatalogStore, LabelKind, LabelPatch, LabelRow, LabelUsage, NewLabel, NewPrompt, PromptPatch,
    PromptRecord, PromptRow, StoreError, StoreResult,
};
use crate::shared::query::{LabelFilter, LabelQuery, PromptFilter, PromptQuery};

#[derive(Debug, Default)]
struct CatalogState {
    categories: HashMap<Uuid, LabelRow>,
    tools: HashMap<Uuid, LabelRow>,
    prompts: HashMap<Uuid, PromptRow>,
    /// (prompt_id, category_id)
    prompt_categories: BTreeSet<(Uuid, Uuid)>,
    /// (prompt_id, tool_id)
    prompt_tools: BTreeSet<(Uuid, Uuid)>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl CatalogState {
    fn labels(&self, kind: LabelKind) -> &HashMap<Uuid, LabelRow> {
        match kind {
            LabelKind::Category => &self.categories,
            LabelKind::Tool => &self.tools,
        }
    }

    fn labels_mut(&mut self, kind: LabelKind) -> &mut HashMap<Uuid, LabelRow> {
        match kind {
            LabelKind::Category => &mut self.categories,
            LabelKind::Tool => &mut self.tools,
        }
    }

    fn joins(&self, kind: LabelKind) -> &BTreeSet<(Uuid, Uuid)> {
        match kind {
            LabelKind::Category => &self.prompt_categories,
            LabelKind::Tool => &self.prompt_tools,
        }
    }

    fn joins_mut(&mut self, kind: LabelKind) -> &mut BTreeSet<(Uuid, Uuid)> {
        match kind {
            LabelKind::Category => &mut self.prompt_categories,
            LabelKind::Tool => &mut self.prompt_tools,
        }
    }

    /// Strictly increasing clock so "most recently updated" is never ambiguous
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }

    fn labels_of(&self, kind: LabelKind, prompt_id: Uuid) -> Vec<LabelRow> {
        let labels = self.labels(kind);
        let mut rows: Vec<LabelRow> = self
            .joins(kind)
            .range((prompt_id, Uuid::nil())..=(prompt_id, Uuid::max()))
            .filter_map(|(_, label_id)| labels.get(label_id).cloned())
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        rows
    }

    fn record(&self, prompt: &PromptRow) -> PromptRecord {
        PromptRecord {
            prompt: prompt.clone(),
            categories: self.labels_of(LabelKind::Category, prompt.id),
            tools: self.labels_of(LabelKind::Tool, prompt.id),
        }
    }

    fn live_records(&self) -> impl Iterator<Item = PromptRecord> + '_ {
        self.prompts
            .values()
            .filter(|p| p.deleted_at.is_none())
            .map(|p| self.record(p))
    }

    fn ensure_labels_exist(&self, kind: LabelKind, ids: &[Uuid]) -> StoreResult<()> {
        let labels = self.labels(kind);
        if ids.iter().all(|id| labels.contains_key(id)) {
            Ok(())
        } else {
            Err(StoreError::ForeignKey(
                "Referenced record does not exist".to_string(),
            ))
        }
    }

    fn ensure_name_free(&self, kind: LabelKind, name: &str, except: Option<Uuid>) -> StoreResult<()> {
        let taken = self
            .labels(kind)
            .values()
            .any(|l| l.name == name && Some(l.id) != except);
        if taken {
            Err(StoreError::UniqueViolation(
                "A record with this name already exists".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn replace_joins(&mut self, kind: LabelKind, prompt_id: Uuid, ids: &[Uuid]) {
        let joins = self.joins_mut(kind);
        joins.retain(|(p, _)| *p != prompt_id);
        joins.extend(ids.iter().map(|id| (prompt_id, *id)));
    }
}

/// Newest first, ties by id
fn sort_prompts(records: &mut [PromptRecord]) {
    records.sort_by(|a, b| {
        b.prompt
            .updated_at
            .cmp(&a.prompt.updated_at)
            .then(b.prompt.id.cmp(&a.prompt.id))
    });
}

fn sort_labels(labels: &mut [LabelRow]) {
    labels.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

fn window<T>(items: Vec<T>, skip: i64, take: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(skip.max(0) as usize)
        .take(take.max(0) as usize)
        .collect()
}

/// In-process catalog.
///
/// Every write holds the lock for its whole duration, so multi-row changes are
/// atomic for readers. Used as the `memory` storage backend and in tests.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    state: RwLock<CatalogState>,
    #[cfg(test)]
    fail_writes: AtomicBool,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(not(test))]
    fn check_writable(&self) -> StoreResult<()> {
        Ok(())
    }

    #[cfg(test)]
    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::Protocol(
                "write rejected by store".to_string(),
            )));
        }
        Ok(())
    }

    /// Make every subsequent write fail with a backend error
    #[cfg(test)]
    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    /// Raw row lookup that ignores soft deletion
    #[cfg(test)]
    pub async fn raw_prompt(&self, id: Uuid) -> Option<PromptRow> {
        self.state.read().await.prompts.get(&id).cloned()
    }

    /// Raw join row count for a prompt
    #[cfg(test)]
    pub async fn raw_join_count(&self, kind: LabelKind, prompt_id: Uuid) -> usize {
        self.state
            .read()
            .await
            .joins(kind)
            .iter()
            .filter(|(p, _)| *p == prompt_id)
            .count()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn count_labels(&self, kind: LabelKind, filter: &LabelFilter) -> StoreResult<i64> {
        let state = self.state.read().await;
        let total = state
            .labels(kind)
            .values()
            .filter(|l| filter.matches(&l.name, l.description.as_deref()))
            .count();
        Ok(total as i64)
    }

    async fn list_labels(&self, kind: LabelKind, query: &LabelQuery) -> StoreResult<Vec<LabelRow>> {
        let state = self.state.read().await;
        let mut labels: Vec<LabelRow> = state
            .labels(kind)
            .values()
            .filter(|l| query.filter.matches(&l.name, l.description.as_deref()))
            .cloned()
            .collect();
        sort_labels(&mut labels);
        Ok(window(labels, query.window.skip, query.window.take))
    }

    async fn find_label(&self, kind: LabelKind, id: Uuid) -> StoreResult<Option<LabelRow>> {
        Ok(self.state.read().await.labels(kind).get(&id).cloned())
    }

    async fn existing_label_ids(&self, kind: LabelKind, ids: &[Uuid]) -> StoreResult<Vec<Uuid>> {
        let state = self.state.read().await;
        let labels = state.labels(kind);
        Ok(ids
            .iter()
            .copied()
            .filter(|id| labels.contains_key(id))
            .collect())
    }

    async fn insert_label(&self, kind: LabelKind, label: NewLabel) -> StoreResult<LabelRow> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        state.ensure_name_free(kind, &label.name, None)?;

        let now = state.tick();
        let row = LabelRow {
            id: label.id,
            name: label.name,
            description: label.description,
            created_at: now,
            updated_at: now,
        };
        state.labels_mut(kind).insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_label(
        &self,
        kind: LabelKind,
        id: Uuid,
        patch: LabelPatch,
    ) -> StoreResult<Option<LabelRow>> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        if !state.labels(kind).contains_key(&id) {
            return Ok(None);
        }
        if let Some(name) = &patch.name {
            state.ensure_name_free(kind, name, Some(id))?;
        }

        let now = state.tick();
        let Some(row) = state.labels_mut(kind).get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }
        row.updated_at = now;
        Ok(Some(row.clone()))
    }

    async fn delete_label(&self, kind: LabelKind, id: Uuid) -> StoreResult<bool> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        if state.labels_mut(kind).remove(&id).is_none() {
            return Ok(false);
        }
        state.joins_mut(kind).retain(|(_, label_id)| *label_id != id);
        Ok(true)
    }

    async fn label_usage(&self, kind: LabelKind) -> StoreResult<Vec<LabelUsage>> {
        let state = self.state.read().await;
        let mut usage: Vec<LabelUsage> = state
            .labels(kind)
            .values()
            .map(|label| {
                let prompt_count = state
                    .joins(kind)
                    .iter()
                    .filter(|(prompt_id, label_id)| {
                        *label_id == label.id
                            && state
                                .prompts
                                .get(prompt_id)
                                .is_some_and(|p| p.deleted_at.is_none())
                    })
                    .count() as i64;
                LabelUsage {
                    label: label.clone(),
                    prompt_count,
                }
            })
            .collect();
        usage.sort_by(|a, b| {
            b.prompt_count
                .cmp(&a.prompt_count)
                .then(a.label.name.cmp(&b.label.name))
        });
        Ok(usage)
    }

    async fn count_prompts(&self, filter: &PromptFilter) -> StoreResult<i64> {
        let state = self.state.read().await;
        Ok(state.live_records().filter(|r| filter.matches(r)).count() as i64)
    }

    async fn find_prompts(&self, query: &PromptQuery) -> StoreResult<Vec<PromptRecord>> {
        let state = self.state.read().await;
        let mut records: Vec<PromptRecord> = state
            .live_records()
            .filter(|r| query.filter.matches(r))
            .collect();
        sort_prompts(&mut records);
        Ok(window(records, query.window.skip, query.window.take))
    }

    async fn find_prompt(&self, id: Uuid) -> StoreResult<Option<PromptRecord>> {
        let state = self.state.read().await;
        Ok(state
            .prompts
            .get(&id)
            .filter(|p| p.deleted_at.is_none())
            .map(|p| state.record(p)))
    }

    async fn find_related_prompts(
        &self,
        exclude: Uuid,
        category_ids: &[Uuid],
        tool_ids: &[Uuid],
        limit: i64,
    ) -> StoreResult<Vec<PromptRecord>> {
        let state = self.state.read().await;
        let mut records: Vec<PromptRecord> = state
            .live_records()
            .filter(|r| r.prompt.id != exclude)
            .filter(|r| {
                r.categories.iter().any(|c| category_ids.contains(&c.id))
                    || r.tools.iter().any(|t| tool_ids.contains(&t.id))
            })
            .collect();
        sort_prompts(&mut records);
        Ok(window(records, 0, limit))
    }

    async fn insert_prompt(&self, prompt: NewPrompt) -> StoreResult<PromptRecord> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        state.ensure_labels_exist(LabelKind::Category, &prompt.category_ids)?;
        state.ensure_labels_exist(LabelKind::Tool, &prompt.tool_ids)?;
        if state.prompts.contains_key(&prompt.id) {
            return Err(StoreError::UniqueViolation(
                "A record with this id already exists".to_string(),
            ));
        }

        let now = state.tick();
        let row = PromptRow {
            id: prompt.id,
            title: prompt.title,
            content: prompt.content,
            description: prompt.description,
            author_id: prompt.author_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.prompts.insert(row.id, row.clone());
        state.replace_joins(LabelKind::Category, row.id, &prompt.category_ids);
        state.replace_joins(LabelKind::Tool, row.id, &prompt.tool_ids);
        Ok(state.record(&row))
    }

    async fn update_prompt(
        &self,
        id: Uuid,
        patch: PromptPatch,
    ) -> StoreResult<Option<PromptRecord>> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let live = state
            .prompts
            .get(&id)
            .is_some_and(|p| p.deleted_at.is_none());
        if !live {
            return Ok(None);
        }
        // Validate everything before the first mutation
        if let Some(ids) = &patch.category_ids {
            state.ensure_labels_exist(LabelKind::Category, ids)?;
        }
        if let Some(ids) = &patch.tool_ids {
            state.ensure_labels_exist(LabelKind::Tool, ids)?;
        }

        let now = state.tick();
        let Some(row) = state.prompts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(content) = patch.content {
            row.content = content;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }
        row.updated_at = now;
        let row = row.clone();

        if let Some(ids) = &patch.category_ids {
            state.replace_joins(LabelKind::Category, id, ids);
        }
        if let Some(ids) = &patch.tool_ids {
            state.replace_joins(LabelKind::Tool, id, ids);
        }
        Ok(Some(state.record(&row)))
    }

    async fn soft_delete_prompt(&self, id: Uuid) -> StoreResult<bool> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let now = state.tick();
        match state.prompts.get_mut(&id) {
            Some(row) if row.deleted_at.is_none() => {
                row.deleted_at = Some(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
