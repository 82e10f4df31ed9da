use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{
    CatalogStore, LabelKind, LabelPatch, LabelRow, LabelUsage, NewLabel, NewPrompt, PromptPatch,
    PromptRecord, PromptRow, StoreError, StoreResult,
};
use crate::shared::query::{like_pattern, LabelFilter, LabelQuery, PromptFilter, PromptQuery};

const PROMPT_COLUMNS: &str =
    "p.id, p.title, p.content, p.description, p.author_id, p.created_at, p.updated_at, p.deleted_at";

const PROMPT_RETURNING: &str =
    " RETURNING id, title, content, description, author_id, created_at, updated_at, deleted_at";

const LABEL_COLUMNS: &str = "l.id, l.name, l.description, l.created_at, l.updated_at";

#[derive(Debug, FromRow)]
struct JoinedLabelRow {
    prompt_id: Uuid,
    #[sqlx(flatten)]
    label: LabelRow,
}

#[derive(Debug, FromRow)]
struct LabelUsageRow {
    #[sqlx(flatten)]
    label: LabelRow,
    prompt_count: i64,
}

/// PostgreSQL-backed catalog
pub struct PgCatalogStore {
    pool: PgPool,
}

impl std::fmt::Debug for PgCatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCatalogStore")
            .field("pool", &"<PgPool>")
            .finish()
    }
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Newest first; id breaks ties so pages never overlap
const PROMPT_ORDER_SQL: &str = " ORDER BY p.updated_at DESC, p.id DESC";
const LABEL_ORDER_SQL: &str = " ORDER BY l.name ASC, l.id ASC";

/// Append the WHERE clause for a prompt predicate (table alias `p`)
fn push_prompt_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &PromptFilter) {
    qb.push(" WHERE p.deleted_at IS NULL");

    if let Some(term) = &filter.search_term {
        let pattern = like_pattern(term);
        qb.push(" AND (p.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.content ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(title) = &filter.title {
        qb.push(" AND p.title ILIKE ").push_bind(like_pattern(title));
    }

    if let Some(author_id) = &filter.author_id {
        qb.push(" AND p.author_id = ").push_bind(author_id.clone());
    }

    if !filter.category_ids.is_empty() {
        push_membership(qb, LabelKind::Category, &filter.category_ids);
    }

    if !filter.tool_ids.is_empty() {
        push_membership(qb, LabelKind::Tool, &filter.tool_ids);
    }
}

fn push_membership(qb: &mut QueryBuilder<'_, Postgres>, kind: LabelKind, ids: &[Uuid]) {
    qb.push(format!(
        " AND EXISTS (SELECT 1 FROM {join} j WHERE j.prompt_id = p.id AND j.{col} = ANY(",
        join = kind.join_table(),
        col = kind.join_column(),
    ))
    .push_bind(ids.to_vec())
    .push("))");
}

fn push_label_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &LabelFilter) {
    if let Some(term) = &filter.search {
        let pattern = like_pattern(term);
        qb.push(" WHERE (l.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR l.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// Load the labels of `kind` for every prompt in `prompt_ids`, ordered by name
async fn load_labels(
    conn: &mut PgConnection,
    kind: LabelKind,
    prompt_ids: &[Uuid],
) -> StoreResult<HashMap<Uuid, Vec<LabelRow>>> {
    let sql = format!(
        r#"
        SELECT j.prompt_id, {columns}
        FROM {join} j
        JOIN {table} l ON l.id = j.{col}
        WHERE j.prompt_id = ANY($1)
        ORDER BY l.name ASC, l.id ASC
        "#,
        columns = LABEL_COLUMNS,
        join = kind.join_table(),
        table = kind.table(),
        col = kind.join_column(),
    );

    let rows: Vec<JoinedLabelRow> = sqlx::query_as(&sql)
        .bind(prompt_ids.to_vec())
        .fetch_all(&mut *conn)
        .await?;

    let mut grouped: HashMap<Uuid, Vec<LabelRow>> = HashMap::new();
    for row in rows {
        grouped.entry(row.prompt_id).or_default().push(row.label);
    }
    Ok(grouped)
}

/// Attach categories and tools to prompt rows, preserving row order
async fn attach_labels(
    conn: &mut PgConnection,
    rows: Vec<PromptRow>,
) -> StoreResult<Vec<PromptRecord>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let mut categories = load_labels(conn, LabelKind::Category, &ids).await?;
    let mut tools = load_labels(conn, LabelKind::Tool, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|prompt| PromptRecord {
            categories: categories.remove(&prompt.id).unwrap_or_default(),
            tools: tools.remove(&prompt.id).unwrap_or_default(),
            prompt,
        })
        .collect())
}

async fn single_record(conn: &mut PgConnection, row: PromptRow) -> StoreResult<PromptRecord> {
    attach_labels(conn, vec![row])
        .await?
        .pop()
        .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
}

async fn insert_joins(
    conn: &mut PgConnection,
    kind: LabelKind,
    prompt_id: Uuid,
    ids: &[Uuid],
) -> StoreResult<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "INSERT INTO {} (prompt_id, {}) ",
        kind.join_table(),
        kind.join_column()
    ));
    qb.push_values(ids, |mut b, id| {
        b.push_bind(prompt_id).push_bind(*id);
    });
    qb.push(" ON CONFLICT DO NOTHING");
    qb.build().execute(&mut *conn).await?;
    Ok(())
}

/// Delete every join row of the prompt, then insert the new set
async fn replace_joins(
    conn: &mut PgConnection,
    kind: LabelKind,
    prompt_id: Uuid,
    ids: &[Uuid],
) -> StoreResult<()> {
    let sql = format!("DELETE FROM {} WHERE prompt_id = $1", kind.join_table());
    sqlx::query(&sql).bind(prompt_id).execute(&mut *conn).await?;
    insert_joins(conn, kind, prompt_id, ids).await
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn count_labels(&self, kind: LabelKind, filter: &LabelFilter) -> StoreResult<i64> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*) FROM {} l", kind.table()));
        push_label_filter(&mut qb, filter);

        let total = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn list_labels(&self, kind: LabelKind, query: &LabelQuery) -> StoreResult<Vec<LabelRow>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM {} l",
            LABEL_COLUMNS,
            kind.table()
        ));
        push_label_filter(&mut qb, &query.filter);
        qb.push(LABEL_ORDER_SQL)
            .push(" LIMIT ")
            .push_bind(query.window.take)
            .push(" OFFSET ")
            .push_bind(query.window.skip);

        let rows = qb
            .build_query_as::<LabelRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_label(&self, kind: LabelKind, id: Uuid) -> StoreResult<Option<LabelRow>> {
        let sql = format!(
            "SELECT {} FROM {} l WHERE l.id = $1",
            LABEL_COLUMNS,
            kind.table()
        );
        let row = sqlx::query_as::<_, LabelRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn existing_label_ids(&self, kind: LabelKind, ids: &[Uuid]) -> StoreResult<Vec<Uuid>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT id FROM {} WHERE id = ANY($1)", kind.table());
        let found = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(found)
    }

    async fn insert_label(&self, kind: LabelKind, label: NewLabel) -> StoreResult<LabelRow> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_at, updated_at
            "#,
            kind.table()
        );
        let row = sqlx::query_as::<_, LabelRow>(&sql)
            .bind(label.id)
            .bind(label.name)
            .bind(label.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_label(
        &self,
        kind: LabelKind,
        id: Uuid,
        patch: LabelPatch,
    ) -> StoreResult<Option<LabelRow>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("UPDATE {} SET updated_at = NOW()", kind.table()));
        if let Some(name) = patch.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(description) = patch.description {
            qb.push(", description = ").push_bind(description);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING id, name, description, created_at, updated_at");

        let row = qb
            .build_query_as::<LabelRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_label(&self, kind: LabelKind, id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let detach = format!(
            "DELETE FROM {} WHERE {} = $1",
            kind.join_table(),
            kind.join_column()
        );
        let detached = sqlx::query(&detach).bind(id).execute(&mut *tx).await?;

        let remove = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let removed = sqlx::query(&remove).bind(id).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::debug!(
            "Deleted {} {} (detached from {} prompts)",
            kind.noun(),
            id,
            detached.rows_affected()
        );
        Ok(removed.rows_affected() > 0)
    }

    async fn label_usage(&self, kind: LabelKind) -> StoreResult<Vec<LabelUsage>> {
        let sql = format!(
            r#"
            SELECT {columns}, COUNT(p.id) AS prompt_count
            FROM {table} l
            LEFT JOIN {join} j ON j.{col} = l.id
            LEFT JOIN prompts p ON p.id = j.prompt_id AND p.deleted_at IS NULL
            GROUP BY l.id
            ORDER BY prompt_count DESC, l.name ASC
            "#,
            columns = LABEL_COLUMNS,
            table = kind.table(),
            join = kind.join_table(),
            col = kind.join_column(),
        );

        let rows: Vec<LabelUsageRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|r| LabelUsage {
                label: r.label,
                prompt_count: r.prompt_count,
            })
            .collect())
    }

    async fn count_prompts(&self, filter: &PromptFilter) -> StoreResult<i64> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM prompts p");
        push_prompt_filter(&mut qb, filter);

        let total = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn find_prompts(&self, query: &PromptQuery) -> StoreResult<Vec<PromptRecord>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM prompts p", PROMPT_COLUMNS));
        push_prompt_filter(&mut qb, &query.filter);
        qb.push(PROMPT_ORDER_SQL)
            .push(" LIMIT ")
            .push_bind(query.window.take)
            .push(" OFFSET ")
            .push_bind(query.window.skip);

        let mut conn = self.pool.acquire().await?;
        let rows = qb
            .build_query_as::<PromptRow>()
            .fetch_all(&mut *conn)
            .await?;
        attach_labels(&mut conn, rows).await
    }

    async fn find_prompt(&self, id: Uuid) -> StoreResult<Option<PromptRecord>> {
        let sql = format!(
            "SELECT {} FROM prompts p WHERE p.id = $1 AND p.deleted_at IS NULL",
            PROMPT_COLUMNS
        );

        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match row {
            Some(row) => Ok(Some(single_record(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    async fn find_related_prompts(
        &self,
        exclude: Uuid,
        category_ids: &[Uuid],
        tool_ids: &[Uuid],
        limit: i64,
    ) -> StoreResult<Vec<PromptRecord>> {
        if category_ids.is_empty() && tool_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            r#"
            SELECT {columns}
            FROM prompts p
            WHERE p.deleted_at IS NULL
              AND p.id <> $1
              AND (
                EXISTS (SELECT 1 FROM prompt_categories pc WHERE pc.prompt_id = p.id AND pc.category_id = ANY($2))
                OR EXISTS (SELECT 1 FROM prompt_tools pt WHERE pt.prompt_id = p.id AND pt.tool_id = ANY($3))
              )
            ORDER BY p.updated_at DESC, p.id DESC
            LIMIT $4
            "#,
            columns = PROMPT_COLUMNS
        );

        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(exclude)
            .bind(category_ids.to_vec())
            .bind(tool_ids.to_vec())
            .bind(limit)
            .fetch_all(&mut *conn)
            .await?;
        attach_labels(&mut conn, rows).await
    }

    async fn insert_prompt(&self, prompt: NewPrompt) -> StoreResult<PromptRecord> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO prompts (id, title, content, description, author_id) VALUES ($1, $2, $3, $4, $5){}",
            PROMPT_RETURNING
        );
        let row = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(prompt.id)
            .bind(prompt.title)
            .bind(prompt.content)
            .bind(prompt.description)
            .bind(prompt.author_id)
            .fetch_one(&mut *tx)
            .await?;

        insert_joins(&mut tx, LabelKind::Category, row.id, &prompt.category_ids).await?;
        insert_joins(&mut tx, LabelKind::Tool, row.id, &prompt.tool_ids).await?;

        let record = single_record(&mut tx, row).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn update_prompt(
        &self,
        id: Uuid,
        patch: PromptPatch,
    ) -> StoreResult<Option<PromptRecord>> {
        let mut tx = self.pool.begin().await?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE prompts SET updated_at = NOW()");
        if let Some(title) = patch.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(content) = patch.content {
            qb.push(", content = ").push_bind(content);
        }
        if let Some(description) = patch.description {
            qb.push(", description = ").push_bind(description);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" AND deleted_at IS NULL")
            .push(PROMPT_RETURNING);

        let updated = qb
            .build_query_as::<PromptRow>()
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(category_ids) = &patch.category_ids {
            replace_joins(&mut tx, LabelKind::Category, id, category_ids).await?;
        }
        if let Some(tool_ids) = &patch.tool_ids {
            replace_joins(&mut tx, LabelKind::Tool, id, tool_ids).await?;
        }

        let record = single_record(&mut tx, row).await?;
        tx.commit().await?;
        Ok(Some(record))
    }

    async fn soft_delete_prompt(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE prompts
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt_sql(filter: &PromptFilter) -> String {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM prompts p");
        push_prompt_filter(&mut qb, filter);
        qb.sql().to_string()
    }

    #[test]
    fn test_empty_filter_only_excludes_deleted() {
        assert_eq!(
            prompt_sql(&PromptFilter::default()),
            "SELECT COUNT(*) FROM prompts p WHERE p.deleted_at IS NULL"
        );
    }

    #[test]
    fn test_search_term_is_or_of_three_columns() {
        let sql = prompt_sql(&PromptFilter::search("api"));
        assert!(sql.contains(
            "AND (p.title ILIKE $1 OR p.content ILIKE $2 OR p.description ILIKE $3)"
        ));
    }

    #[test]
    fn test_full_filter_binds_in_order() {
        let filter = PromptFilter {
            search_term: Some("api".to_string()),
            title: Some("draft".to_string()),
            author_id: Some("u1".to_string()),
            category_ids: vec![Uuid::new_v4()],
            tool_ids: vec![Uuid::new_v4()],
        };
        let sql = prompt_sql(&filter);

        assert!(sql.contains("AND p.title ILIKE $4"));
        assert!(sql.contains("AND p.author_id = $5"));
        assert!(sql.contains(
            "EXISTS (SELECT 1 FROM prompt_categories j WHERE j.prompt_id = p.id AND j.category_id = ANY($6))"
        ));
        assert!(sql.contains(
            "EXISTS (SELECT 1 FROM prompt_tools j WHERE j.prompt_id = p.id AND j.tool_id = ANY($7))"
        ));
    }

    #[test]
    fn test_label_filter_sql() {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM tools l");
        push_label_filter(&mut qb, &LabelFilter::search("gpt"));
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM tools l WHERE (l.name ILIKE $1 OR l.description ILIKE $2)"
        );

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM tools l");
        push_label_filter(&mut qb, &LabelFilter::default());
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM tools l");
    }

    async fn seeded(pool: PgPool) -> (PgCatalogStore, LabelRow, LabelRow) {
        let store = PgCatalogStore::new(pool);
        let writing = store
            .insert_label(LabelKind::Category, new_label("Writing"))
            .await
            .unwrap();
        let coding = store
            .insert_label(LabelKind::Category, new_label("Coding"))
            .await
            .unwrap();
        (store, writing, coding)
    }

    fn new_label(name: &str) -> NewLabel {
        NewLabel {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
        }
    }

    fn new_prompt(category_ids: Vec<Uuid>, tool_ids: Vec<Uuid>) -> NewPrompt {
        NewPrompt {
            id: Uuid::new_v4(),
            title: "Essay outline".to_string(),
            content: "Outline an essay".to_string(),
            description: None,
            author_id: "u1".to_string(),
            category_ids,
            tool_ids,
        }
    }

    fn category_names(record: &PromptRecord) -> Vec<&str> {
        record.categories.iter().map(|c| c.name.as_str()).collect()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_update_replaces_join_set(pool: PgPool) {
        let (store, writing, coding) = seeded(pool).await;
        let prompt = store
            .insert_prompt(new_prompt(vec![writing.id], Vec::new()))
            .await
            .unwrap();

        let patch = PromptPatch {
            category_ids: Some(vec![coding.id]),
            ..Default::default()
        };
        let updated = store.update_prompt(prompt.prompt.id, patch).await.unwrap().unwrap();
        assert_eq!(category_names(&updated), vec!["Coding"]);

        let cleared = PromptPatch {
            category_ids: Some(Vec::new()),
            ..Default::default()
        };
        let updated = store.update_prompt(prompt.prompt.id, cleared).await.unwrap().unwrap();
        assert!(updated.categories.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_failed_join_replacement_rolls_back(pool: PgPool) {
        let (store, writing, coding) = seeded(pool).await;
        let prompt = store
            .insert_prompt(new_prompt(vec![writing.id], Vec::new()))
            .await
            .unwrap();

        let patch = PromptPatch {
            title: Some("Renamed".to_string()),
            category_ids: Some(vec![coding.id]),
            tool_ids: Some(vec![Uuid::new_v4()]),
            ..Default::default()
        };
        let err = store.update_prompt(prompt.prompt.id, patch).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));

        let record = store.find_prompt(prompt.prompt.id).await.unwrap().unwrap();
        assert_eq!(record.prompt.title, "Essay outline");
        assert_eq!(category_names(&record), vec!["Writing"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_unknown_label_on_insert_leaves_no_prompt(pool: PgPool) {
        let (store, writing, _) = seeded(pool).await;
        let draft = new_prompt(vec![writing.id, Uuid::new_v4()], Vec::new());
        let id = draft.id;

        let err = store.insert_prompt(draft).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));
        assert!(store.find_prompt(id).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_duplicate_label_name_is_unique_violation(pool: PgPool) {
        let (store, _, coding) = seeded(pool).await;

        let err = store
            .insert_label(LabelKind::Category, new_label("Writing"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));

        let rename = LabelPatch {
            name: Some("Writing".to_string()),
            description: None,
        };
        let err = store
            .update_label(LabelKind::Category, coding.id, rename)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));

        // Names are unique per catalog only
        assert!(store
            .insert_label(LabelKind::Tool, new_label("Writing"))
            .await
            .is_ok());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_deleting_label_cascades_joins_only(pool: PgPool) {
        let (store, writing, coding) = seeded(pool).await;
        let prompt = store
            .insert_prompt(new_prompt(vec![writing.id, coding.id], Vec::new()))
            .await
            .unwrap();

        assert!(store.delete_label(LabelKind::Category, writing.id).await.unwrap());

        let record = store.find_prompt(prompt.prompt.id).await.unwrap().unwrap();
        assert_eq!(category_names(&record), vec!["Coding"]);
    }
}
