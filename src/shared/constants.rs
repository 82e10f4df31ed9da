/// Default page size for prompt listings
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default page size for category and tool listings (whole catalog for realistic sizes)
pub const DEFAULT_LABEL_PAGE_SIZE: i64 = MAX_PAGE_SIZE;

/// Default number of related prompts returned
pub const DEFAULT_RELATED_LIMIT: i64 = 5;

/// Results per entity type returned by the cross-entity search
pub const SEARCH_RESULTS_PER_KIND: i64 = 5;
