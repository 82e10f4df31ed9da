mod memory;
mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::query::{LabelFilter, LabelQuery, PromptFilter, PromptQuery};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// A referenced row does not exist
    #[error("{0}")]
    ForeignKey(String),

    /// A unique column already holds the value
    #[error("{0}")]
    UniqueViolation(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            // PostgreSQL unique violation
            if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
                return StoreError::UniqueViolation(
                    "A record with this name already exists".to_string(),
                );
            }

            // PostgreSQL foreign key violation
            if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
                return StoreError::ForeignKey("Referenced record does not exist".to_string());
            }
        }

        StoreError::Database(e)
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// =============================================================================
// RECORDS
// =============================================================================

/// Categories and tools share one shape; the kind selects the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Category,
    Tool,
}

impl LabelKind {
    pub fn noun(&self) -> &'static str {
        match self {
            LabelKind::Category => "Category",
            LabelKind::Tool => "Tool",
        }
    }

    fn table(&self) -> &'static str {
        match self {
            LabelKind::Category => "categories",
            LabelKind::Tool => "tools",
        }
    }

    fn join_table(&self) -> &'static str {
        match self {
            LabelKind::Category => "prompt_categories",
            LabelKind::Tool => "prompt_tools",
        }
    }

    fn join_column(&self) -> &'static str {
        match self {
            LabelKind::Category => "category_id",
            LabelKind::Tool => "tool_id",
        }
    }
}

/// Row of `categories` or `tools`
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct LabelRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of `prompts`
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct PromptRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A prompt with its categories and tools, each ordered by name
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRecord {
    pub prompt: PromptRow,
    pub categories: Vec<LabelRow>,
    pub tools: Vec<LabelRow>,
}

#[derive(Debug, Clone)]
pub struct NewLabel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Partial label update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct LabelPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct NewPrompt {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub author_id: String,
    pub category_ids: Vec<Uuid>,
    pub tool_ids: Vec<Uuid>,
}

/// Partial prompt update. `Some(ids)` replaces the whole association set.
#[derive(Debug, Clone, Default)]
pub struct PromptPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub description: Option<Option<String>>,
    pub category_ids: Option<Vec<Uuid>>,
    pub tool_ids: Option<Vec<Uuid>>,
}

impl PromptPatch {
    pub fn touches_scalars(&self) -> bool {
        self.title.is_some() || self.content.is_some() || self.description.is_some()
    }
}

/// A label and how many live prompts use it
#[derive(Debug, Clone, PartialEq)]
pub struct LabelUsage {
    pub label: LabelRow,
    pub prompt_count: i64,
}

// =============================================================================
// STORE
// =============================================================================

/// Persistence backend for prompts, categories, tools and their join rows.
///
/// Prompt reads never return soft-deleted rows. Multi-row writes are atomic.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn count_labels(&self, kind: LabelKind, filter: &LabelFilter) -> StoreResult<i64>;

    async fn list_labels(&self, kind: LabelKind, query: &LabelQuery) -> StoreResult<Vec<LabelRow>>;

    async fn find_label(&self, kind: LabelKind, id: Uuid) -> StoreResult<Option<LabelRow>>;

    /// The subset of `ids` that exist
    async fn existing_label_ids(&self, kind: LabelKind, ids: &[Uuid]) -> StoreResult<Vec<Uuid>>;

    async fn insert_label(&self, kind: LabelKind, label: NewLabel) -> StoreResult<LabelRow>;

    async fn update_label(
        &self,
        kind: LabelKind,
        id: Uuid,
        patch: LabelPatch,
    ) -> StoreResult<Option<LabelRow>>;

    /// Remove the label and every join row referencing it. `false` if absent.
    async fn delete_label(&self, kind: LabelKind, id: Uuid) -> StoreResult<bool>;

    /// Every label with its live prompt count
    async fn label_usage(&self, kind: LabelKind) -> StoreResult<Vec<LabelUsage>>;

    async fn count_prompts(&self, filter: &PromptFilter) -> StoreResult<i64>;

    async fn find_prompts(&self, query: &PromptQuery) -> StoreResult<Vec<PromptRecord>>;

    async fn find_prompt(&self, id: Uuid) -> StoreResult<Option<PromptRecord>>;

    /// Live prompts other than `exclude` sharing any of the given labels, newest first
    async fn find_related_prompts(
        &self,
        exclude: Uuid,
        category_ids: &[Uuid],
        tool_ids: &[Uuid],
        limit: i64,
    ) -> StoreResult<Vec<PromptRecord>>;

    /// Insert the prompt and its join rows in one transaction
    async fn insert_prompt(&self, prompt: NewPrompt) -> StoreResult<PromptRecord>;

    /// Patch a live prompt and replace supplied association sets in one transaction.
    /// `None` if the prompt is absent or soft-deleted.
    async fn update_prompt(&self, id: Uuid, patch: PromptPatch)
        -> StoreResult<Option<PromptRecord>>;

    /// Set `deleted_at` on a live prompt. `false` if absent or already deleted.
    async fn soft_delete_prompt(&self, id: Uuid) -> StoreResult<bool>;
}
