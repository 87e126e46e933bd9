//! Statement builders for the generic repository.
//!
//! Every builder returns an owned `QueryBuilder` with all values bound as
//! parameters. Table and column names come from [`Entity`] constants or a
//! validated [`Filter`], so they are the only text spliced into SQL.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use groundwork_core::types::filter::{Filter, FilterOp, FilterValue};
use groundwork_core::types::pagination::PagingRequest;
use groundwork_entity::base::BASE_COLUMNS;
use groundwork_entity::{ColumnValue, Entity};

/// PostgreSQL accepts at most this many bind parameters per statement.
pub(crate) const MAX_BIND_PARAMS: usize = 65_535;

/// Ordering used when a list query has no explicit sort.
const DEFAULT_ORDER: &str = " ORDER BY create_date_time ASC, id ASC";

macro_rules! bind_column {
    ($target:expr, $value:expr) => {
        match $value {
            ColumnValue::Bool(v) => {
                $target.push_bind(v);
            }
            ColumnValue::SmallInt(v) => {
                $target.push_bind(v);
            }
            ColumnValue::Int(v) => {
                $target.push_bind(v);
            }
            ColumnValue::BigInt(v) => {
                $target.push_bind(v);
            }
            ColumnValue::Double(v) => {
                $target.push_bind(v);
            }
            ColumnValue::Text(v) => {
                $target.push_bind(v);
            }
            ColumnValue::Uuid(v) => {
                $target.push_bind(v);
            }
            ColumnValue::Timestamp(v) => {
                $target.push_bind(v);
            }
            ColumnValue::Date(v) => {
                $target.push_bind(v);
            }
            ColumnValue::Json(v) => {
                $target.push_bind(v);
            }
            ColumnValue::Bytes(v) => {
                $target.push_bind(v);
            }
        }
    };
}

/// `SELECT * ... WHERE id = $1 AND is_active = $2`.
pub(crate) fn select_by_id(table: &str, id: Uuid, active: bool) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM {table} WHERE id = "));
    qb.push_bind(id);
    qb.push(" AND is_active = ");
    qb.push_bind(active);
    qb
}

/// `SELECT *` for the rows matching `filter`, optionally paged or capped.
pub(crate) fn select(
    table: &str,
    filter: &Filter,
    active: bool,
    page: Option<&PagingRequest>,
    limit: Option<i64>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM {table}"));
    push_where(&mut qb, filter, active);
    push_order(&mut qb, filter);
    if let Some(page) = page {
        qb.push(" LIMIT ");
        qb.push_bind(page.limit());
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());
    } else if let Some(limit) = limit {
        qb.push(" LIMIT ");
        qb.push_bind(limit);
    }
    qb
}

/// `SELECT COUNT(*)` for the rows matching `filter`.
pub(crate) fn count(table: &str, filter: &Filter, active: bool) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {table}"));
    push_where(&mut qb, filter, active);
    qb
}

/// `SELECT EXISTS(...)` for the rows matching `filter`.
pub(crate) fn exists(table: &str, filter: &Filter, active: bool) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT EXISTS(SELECT 1 FROM {table}"));
    push_where(&mut qb, filter, active);
    qb.push(")");
    qb
}

/// Rows per `INSERT` so that one statement stays under the bind limit.
pub(crate) fn insert_chunk_size<E: Entity>(sample: &E) -> usize {
    let per_row = BASE_COLUMNS.len() + sample.columns().len();
    (MAX_BIND_PARAMS / per_row).max(1)
}

/// Multi-row `INSERT ... RETURNING *`. `rows` must not be empty.
pub(crate) fn insert<E: Entity>(rows: &[E]) -> QueryBuilder<'static, Postgres> {
    let mut names: Vec<&str> = BASE_COLUMNS.to_vec();
    if let Some(first) = rows.first() {
        names.extend(first.columns().into_iter().map(|(name, _)| name));
    }

    let mut qb = QueryBuilder::new(format!("INSERT INTO {} ({}) ", E::TABLE, names.join(", ")));
    qb.push_values(rows, |mut row, entity| {
        for value in entity.base().values() {
            bind_column!(row, value);
        }
        for (_, value) in entity.columns() {
            bind_column!(row, value);
        }
    });
    qb.push(" RETURNING *");
    qb
}

/// `UPDATE ... SET <every column> WHERE id = $n RETURNING *`.
pub(crate) fn update<E: Entity>(entity: &E) -> QueryBuilder<'static, Postgres> {
    let base = entity.base();
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET create_date_time = ", E::TABLE));
    qb.push_bind(base.create_date_time);
    qb.push(", modify_date_time = ");
    qb.push_bind(base.modify_date_time);
    qb.push(", is_active = ");
    qb.push_bind(base.is_active);
    for (name, value) in entity.columns() {
        qb.push(format!(", {name} = "));
        bind_column!(qb, value);
    }
    qb.push(" WHERE id = ");
    qb.push_bind(base.id);
    qb.push(" RETURNING *");
    qb
}

/// Soft delete for a set of ids.
pub(crate) fn deactivate(
    table: &str,
    ids: Vec<Uuid>,
    now: DateTime<Utc>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "UPDATE {table} SET is_active = FALSE, modify_date_time = "
    ));
    qb.push_bind(now);
    qb.push(" WHERE id = ANY(");
    qb.push_bind(ids);
    qb.push(") RETURNING *");
    qb
}

/// Hard delete for a set of ids.
pub(crate) fn delete(table: &str, ids: Vec<Uuid>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("DELETE FROM {table} WHERE id = ANY("));
    qb.push_bind(ids);
    qb.push(")");
    qb
}

fn push_where(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter, active: bool) {
    qb.push(" WHERE is_active = ");
    qb.push_bind(active);

    for field in &filter.fields {
        qb.push(format!(" AND {} ", field.field));
        match field.op {
            FilterOp::IsNull | FilterOp::IsNotNull => {
                qb.push(field.op.as_sql());
            }
            FilterOp::In => {
                qb.push("= ANY(");
                push_filter_value(qb, &field.value);
                qb.push(")");
            }
            op => {
                qb.push(op.as_sql());
                qb.push(" ");
                push_filter_value(qb, &field.value);
            }
        }
    }
}

fn push_order(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter) {
    if filter.order_by.is_empty() {
        qb.push(DEFAULT_ORDER);
        return;
    }
    let clauses: Vec<String> = filter
        .order_by
        .iter()
        .map(|sort| format!("{} {}", sort.field, sort.direction.as_sql()))
        .collect();
    qb.push(format!(" ORDER BY {}", clauses.join(", ")));
}

fn push_filter_value(qb: &mut QueryBuilder<'static, Postgres>, value: &FilterValue) {
    match value.clone() {
        FilterValue::Boolean(v) => qb.push_bind(v),
        FilterValue::Integer(v) => qb.push_bind(v),
        FilterValue::Float(v) => qb.push_bind(v),
        FilterValue::Uuid(v) => qb.push_bind(v),
        FilterValue::Timestamp(v) => qb.push_bind(v),
        FilterValue::String(v) => qb.push_bind(v),
        FilterValue::UuidList(v) => qb.push_bind(v),
        FilterValue::StringList(v) => qb.push_bind(v),
        FilterValue::Null => qb.push("NULL"),
    };
}

#[cfg(test)]
mod tests {
    use groundwork_core::types::filter::FilterField;
    use groundwork_core::types::sorting::SortField;
    use groundwork_entity::EntityBase;
    use serde::{Deserialize, Serialize};
    use sqlx::FromRow;

    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
    struct Widget {
        #[sqlx(flatten)]
        #[serde(flatten)]
        base: EntityBase,
        name: String,
        weight: Option<i32>,
    }

    impl Entity for Widget {
        const TABLE: &'static str = "widgets";

        fn base(&self) -> &EntityBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut EntityBase {
            &mut self.base
        }

        fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
            vec![
                ("name", self.name.clone().into()),
                ("weight", ColumnValue::Int(self.weight)),
            ]
        }
    }

    fn widget(name: &str) -> Widget {
        Widget {
            base: EntityBase::new(),
            name: name.to_string(),
            weight: None,
        }
    }

    #[test]
    fn test_select_by_id() {
        let qb = select_by_id("widgets", Uuid::nil(), true);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM widgets WHERE id = $1 AND is_active = $2"
        );
    }

    #[test]
    fn test_select_with_filter_and_paging() {
        let filter = Filter::new()
            .and(FilterField::eq("name", "bolt"))
            .and(FilterField::is_null("weight"))
            .and(FilterField::is_in("id", vec![Uuid::nil()]));
        let page = PagingRequest::new(2, 10);
        let qb = select("widgets", &filter, true, Some(&page), None);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM widgets WHERE is_active = $1 AND name = $2 AND weight IS NULL \
             AND id = ANY($3) ORDER BY create_date_time ASC, id ASC LIMIT $4 OFFSET $5"
        );
    }

    #[test]
    fn test_select_with_explicit_order_and_cap() {
        let filter = Filter::new()
            .and(FilterField::ilike("name", "%nut%"))
            .order(SortField::desc("weight"));
        let qb = select("widgets", &filter, false, None, Some(2));
        assert_eq!(
            qb.sql(),
            "SELECT * FROM widgets WHERE is_active = $1 AND name ILIKE $2 \
             ORDER BY weight DESC LIMIT $3"
        );
    }

    #[test]
    fn test_count_and_exists() {
        let filter = Filter::new().and(FilterField::new("weight", FilterOp::Gt, 5_i64.into()));
        assert_eq!(
            count("widgets", &filter, true).sql(),
            "SELECT COUNT(*) FROM widgets WHERE is_active = $1 AND weight > $2"
        );
        assert_eq!(
            exists("widgets", &Filter::new(), true).sql(),
            "SELECT EXISTS(SELECT 1 FROM widgets WHERE is_active = $1)"
        );
    }

    #[test]
    fn test_insert_many_rows() {
        let rows = vec![widget("a"), widget("b")];
        let qb = insert(&rows);
        assert_eq!(
            qb.sql(),
            "INSERT INTO widgets (id, create_date_time, modify_date_time, is_active, name, weight) \
             VALUES ($1, $2, $3, $4, $5, $6), ($7, $8, $9, $10, $11, $12) RETURNING *"
        );
    }

    #[test]
    fn test_update_sets_every_column() {
        let qb = update(&widget("a"));
        assert_eq!(
            qb.sql(),
            "UPDATE widgets SET create_date_time = $1, modify_date_time = $2, is_active = $3, \
             name = $4, weight = $5 WHERE id = $6 RETURNING *"
        );
    }

    #[test]
    fn test_soft_and_hard_delete() {
        assert_eq!(
            deactivate("widgets", vec![Uuid::nil()], Utc::now()).sql(),
            "UPDATE widgets SET is_active = FALSE, modify_date_time = $1 WHERE id = ANY($2) RETURNING *"
        );
        assert_eq!(
            delete("widgets", vec![Uuid::nil()]).sql(),
            "DELETE FROM widgets WHERE id = ANY($1)"
        );
    }

    #[test]
    fn test_chunk_size_respects_bind_limit() {
        let size = insert_chunk_size(&widget("a"));
        assert_eq!(size, MAX_BIND_PARAMS / 6);
        assert!(size * 6 <= MAX_BIND_PARAMS);
    }
}
