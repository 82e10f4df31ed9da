//! Backend-agnostic query building.
//!
//! Listing requests are reduced to a predicate ([`PromptFilter`] / [`LabelFilter`])
//! and a [`PageWindow`]. Stores translate the predicate into their own query
//! language; [`PromptFilter::matches`] is the reference evaluation. Prompts are
//! always listed most recently updated first, labels alphabetically.

use uuid::Uuid;

use crate::core::error::AppError;
use crate::modules::store::PromptRecord;
use crate::shared::constants::{DEFAULT_LABEL_PAGE_SIZE, DEFAULT_PAGE_SIZE};
use crate::shared::types::{PageWindow, Pagination};

/// Raw prompt listing options as received from a caller
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub search_term: Option<String>,
    pub title: Option<String>,
    pub category_ids: Vec<Uuid>,
    pub tool_ids: Vec<Uuid>,
    pub author_id: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Raw category/tool listing options
#[derive(Debug, Clone, Default)]
pub struct LabelFilterOptions {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Which prompts a query selects.
///
/// Soft-deleted prompts are never selected; there is deliberately no field to
/// opt out of that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFilter {
    /// Case-insensitive substring of title, content or description
    pub search_term: Option<String>,
    /// Case-insensitive substring of title only
    pub title: Option<String>,
    /// Exact owner match
    pub author_id: Option<String>,
    /// Any of these categories (empty = no constraint)
    pub category_ids: Vec<Uuid>,
    /// Any of these tools (empty = no constraint)
    pub tool_ids: Vec<Uuid>,
}

/// Which categories/tools a query selects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFilter {
    /// Case-insensitive substring of name or description
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptQuery {
    pub filter: PromptFilter,
    pub window: PageWindow,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelQuery {
    pub filter: LabelFilter,
    pub window: PageWindow,
    pub pagination: Pagination,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Drop repeated ids, keeping first occurrences in order
pub fn dedup_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut out: Vec<Uuid> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}

impl FilterOptions {
    pub fn build(&self) -> Result<PromptQuery, AppError> {
        let pagination = Pagination::new(self.page, self.page_size, DEFAULT_PAGE_SIZE)?;

        Ok(PromptQuery {
            filter: PromptFilter {
                search_term: non_blank(&self.search_term),
                title: non_blank(&self.title),
                author_id: non_blank(&self.author_id),
                category_ids: dedup_ids(&self.category_ids),
                tool_ids: dedup_ids(&self.tool_ids),
            },
            window: pagination.window(),
            pagination,
        })
    }
}

impl LabelFilterOptions {
    pub fn build(&self) -> Result<LabelQuery, AppError> {
        let pagination = Pagination::new(self.page, self.page_size, DEFAULT_LABEL_PAGE_SIZE)?;

        Ok(LabelQuery {
            filter: LabelFilter {
                search: non_blank(&self.search),
            },
            window: pagination.window(),
            pagination,
        })
    }
}

impl PromptFilter {
    /// Filter used by the cross-entity search
    pub fn search(term: &str) -> Self {
        Self {
            search_term: non_blank(&Some(term.to_string())),
            ..Self::default()
        }
    }

    /// Evaluate the predicate against one prompt and its associations
    pub fn matches(&self, record: &PromptRecord) -> bool {
        let prompt = &record.prompt;
        if prompt.deleted_at.is_some() {
            return false;
        }

        if let Some(term) = &self.search_term {
            let hit = contains_insensitive(&prompt.title, term)
                || contains_insensitive(&prompt.content, term)
                || prompt
                    .description
                    .as_deref()
                    .is_some_and(|d| contains_insensitive(d, term));
            if !hit {
                return false;
            }
        }

        if let Some(wanted) = &self.title {
            if !contains_insensitive(&prompt.title, wanted) {
                return false;
            }
        }

        if let Some(author) = &self.author_id {
            if *author != prompt.author_id {
                return false;
            }
        }

        if !self.category_ids.is_empty()
            && !record
                .categories
                .iter()
                .any(|c| self.category_ids.contains(&c.id))
        {
            return false;
        }

        if !self.tool_ids.is_empty() && !record.tools.iter().any(|t| self.tool_ids.contains(&t.id))
        {
            return false;
        }

        true
    }
}

impl LabelFilter {
    pub fn search(term: &str) -> Self {
        Self {
            search: non_blank(&Some(term.to_string())),
        }
    }

    pub fn matches(&self, name: &str, description: Option<&str>) -> bool {
        match &self.search {
            None => true,
            Some(term) => {
                contains_insensitive(name, term)
                    || description.is_some_and(|d| contains_insensitive(d, term))
            }
        }
    }
}

/// Case-insensitive substring test
pub fn contains_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `%term%` for ILIKE with LIKE metacharacters matched literally
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::{LabelRow, PromptRow};
    use chrono::Utc;

    fn filter() -> PromptFilter {
        PromptFilter::default()
    }

    fn label(id: Uuid) -> LabelRow {
        let now = Utc::now();
        LabelRow {
            id,
            name: format!("label-{}", id),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn record(title: &str, content: &str, description: Option<&str>) -> PromptRecord {
        let now = Utc::now();
        PromptRecord {
            prompt: PromptRow {
                id: Uuid::new_v4(),
                title: title.to_string(),
                content: content.to_string(),
                description: description.map(str::to_string),
                author_id: "u1".to_string(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
            categories: Vec::new(),
            tools: Vec::new(),
        }
    }

    fn tagged(categories: &[Uuid], tools: &[Uuid]) -> PromptRecord {
        let mut r = record("t", "c", None);
        r.categories = categories.iter().copied().map(label).collect();
        r.tools = tools.iter().copied().map(label).collect();
        r
    }

    #[test]
    fn test_build_defaults() {
        let query = FilterOptions::default().build().unwrap();
        assert_eq!(query.filter, PromptFilter::default());
        assert_eq!(query.window, PageWindow { skip: 0, take: 10 });
        assert_eq!(query.pagination.page, 1);
    }

    #[test]
    fn test_build_label_defaults() {
        let query = LabelFilterOptions::default().build().unwrap();
        assert_eq!(query.window.take, DEFAULT_LABEL_PAGE_SIZE);
    }

    #[test]
    fn test_build_rejects_invalid_page() {
        let options = FilterOptions {
            page: Some(0),
            ..Default::default()
        };
        assert!(matches!(options.build(), Err(AppError::Validation(_))));

        let options = FilterOptions {
            page_size: Some(-1),
            ..Default::default()
        };
        assert!(matches!(options.build(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_build_trims_blank_terms_and_dedups_ids() {
        let id = Uuid::new_v4();
        let options = FilterOptions {
            search_term: Some("   ".to_string()),
            title: Some(" Intro ".to_string()),
            category_ids: vec![id, id],
            ..Default::default()
        };
        let query = options.build().unwrap();
        assert_eq!(query.filter.search_term, None);
        assert_eq!(query.filter.title, Some("Intro".to_string()));
        assert_eq!(query.filter.category_ids, vec![id]);
    }

    #[test]
    fn test_deleted_never_matches() {
        let mut r = record("t", "c", None);
        assert!(filter().matches(&r));
        r.prompt.deleted_at = Some(Utc::now());
        assert!(!filter().matches(&r));
        assert!(!PromptFilter::search("t").matches(&r));
    }

    #[test]
    fn test_search_term_spans_title_content_description() {
        let f = PromptFilter::search("api");
        assert!(f.matches(&record("REST API guide", "", None)));
        assert!(f.matches(&record("Guide", "call the API", None)));
        assert!(f.matches(&record("Guide", "", Some("about apis"))));
        assert!(!f.matches(&record("Guide", "nothing", Some("here"))));
    }

    #[test]
    fn test_title_is_anded_with_search_term() {
        let f = PromptFilter {
            search_term: Some("api".to_string()),
            title: Some("draft".to_string()),
            ..filter()
        };
        assert!(f.matches(&record("Draft email", "uses the API", None)));
        assert!(!f.matches(&record("Final email", "uses the API", None)));
        assert!(!f.matches(&record("Draft email", "plain text", None)));
    }

    #[test]
    fn test_author_is_exact() {
        let f = PromptFilter {
            author_id: Some("u1".to_string()),
            ..filter()
        };
        let mut r = record("t", "c", None);
        assert!(f.matches(&r));
        r.prompt.author_id = "u10".to_string();
        assert!(!f.matches(&r));
    }

    #[test]
    fn test_membership_is_or_within_and_across() {
        let (writing, coding, chat, ide) = (
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        let f = PromptFilter {
            category_ids: vec![writing, coding],
            tool_ids: vec![chat],
            ..filter()
        };

        assert!(f.matches(&tagged(&[coding], &[chat, ide])));
        assert!(!f.matches(&tagged(&[coding], &[ide])));
        assert!(!f.matches(&tagged(&[], &[chat])));
    }

    #[test]
    fn test_label_filter() {
        let f = LabelFilter::search("gpt");
        assert!(f.matches("ChatGPT", None));
        assert!(f.matches("Assistant", Some("GPT based")));
        assert!(!f.matches("Claude", Some("assistant")));
        assert!(LabelFilter::default().matches("anything", None));
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("api"), "%api%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }
}
