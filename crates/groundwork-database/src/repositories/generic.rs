//! Generic soft-delete repository over any [`Entity`].

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, error};
use uuid::Uuid;

use groundwork_core::error::AppError;
use groundwork_core::message::codes;
use groundwork_core::result::AppResult;
use groundwork_core::traits::repository::Repository;
use groundwork_core::types::filter::Filter;
use groundwork_core::types::pagination::PagingRequest;
use groundwork_entity::Entity;

use super::sql;

/// PostgreSQL implementation of [`Repository`] for entity `E`.
///
/// Writes stamp the base timestamps before persisting: inserts reset the
/// creation time and active flag, updates and soft deletes record the
/// modification time. Bulk writes run inside a single transaction.
pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    /// Create a new repository on the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// Return a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<E: Entity> fmt::Debug for PgRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgRepository")
            .field("table", &E::TABLE)
            .finish_non_exhaustive()
    }
}

/// Map an sqlx error into an [`AppError`], logging it on the way.
fn db_error(action: &'static str, table: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        error!(table, action, error = %e, "Database operation failed");
        let unique = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        let code = if unique {
            codes::CONFLICT
        } else {
            codes::SERVER_ERROR
        };
        AppError::with_source(code, format!("Failed to {action} {table}"), e)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn get_by_id(&self, id: Uuid, active: bool) -> AppResult<Option<E>> {
        sql::select_by_id(E::TABLE, id, active)
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("get", E::TABLE))
    }

    async fn get_all(&self, active: bool) -> AppResult<Vec<E>> {
        sql::select(E::TABLE, &Filter::new(), active, None, None)
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list", E::TABLE))
    }

    async fn find_by(&self, filter: &Filter, active: bool) -> AppResult<Option<E>> {
        filter.validate()?;
        let mut rows = sql::select(E::TABLE, filter, active, None, Some(2))
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("find", E::TABLE))?;

        if rows.len() > 1 {
            return Err(AppError::conflict(format!(
                "More than one {} row matched a single-row lookup",
                E::TABLE
            )));
        }
        Ok(rows.pop())
    }

    async fn filter_by(&self, filter: &Filter, active: bool) -> AppResult<Vec<E>> {
        filter.validate()?;
        sql::select(E::TABLE, filter, active, None, None)
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("filter", E::TABLE))
    }

    async fn filter_paged(
        &self,
        filter: &Filter,
        page: &PagingRequest,
        active: bool,
    ) -> AppResult<Vec<E>> {
        filter.validate()?;
        sql::select(E::TABLE, filter, active, Some(page), None)
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("page", E::TABLE))
    }

    async fn insert(&self, mut entity: E) -> AppResult<E> {
        entity.base_mut().stamp_created(Utc::now());
        sql::insert(std::slice::from_ref(&entity))
            .build_query_as::<E>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("insert", E::TABLE))
    }

    async fn insert_many(&self, mut entities: Vec<E>) -> AppResult<Vec<E>> {
        let Some(first) = entities.first() else {
            return Ok(Vec::new());
        };
        let chunk_size = sql::insert_chunk_size(first);

        let now = Utc::now();
        for entity in &mut entities {
            entity.base_mut().stamp_created(now);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin bulk insert on", E::TABLE))?;

        let mut stored = Vec::with_capacity(entities.len());
        for chunk in entities.chunks(chunk_size) {
            let rows = sql::insert(chunk)
                .build_query_as::<E>()
                .fetch_all(&mut *tx)
                .await
                .map_err(db_error("bulk insert", E::TABLE))?;
            stored.extend(rows);
        }

        tx.commit()
            .await
            .map_err(db_error("commit bulk insert on", E::TABLE))?;

        debug!(table = E::TABLE, rows = stored.len(), "Bulk insert committed");
        Ok(stored)
    }

    async fn update(&self, mut entity: E) -> AppResult<E> {
        entity.base_mut().touch(Utc::now());
        let id = entity.id();
        sql::update(&entity)
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("update", E::TABLE))?
            .ok_or_else(|| AppError::not_found(format!("{} row {id} does not exist", E::TABLE)))
    }

    async fn update_many(&self, mut entities: Vec<E>) -> AppResult<Vec<E>> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }
        let now = Utc::now();
        for entity in &mut entities {
            entity.base_mut().touch(now);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin bulk update on", E::TABLE))?;

        let mut stored = Vec::with_capacity(entities.len());
        for entity in &entities {
            let row = sql::update(entity)
                .build_query_as::<E>()
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("bulk update", E::TABLE))?
                .ok_or_else(|| {
                    AppError::not_found(format!("{} row {} does not exist", E::TABLE, entity.id()))
                })?;
            stored.push(row);
        }

        tx.commit()
            .await
            .map_err(db_error("commit bulk update on", E::TABLE))?;

        debug!(table = E::TABLE, rows = stored.len(), "Bulk update committed");
        Ok(stored)
    }

    async fn delete(&self, mut entity: E) -> AppResult<E> {
        entity.base_mut().deactivate(Utc::now());
        let id = entity.id();
        sql::update(&entity)
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("soft delete", E::TABLE))?
            .ok_or_else(|| AppError::not_found(format!("{} row {id} does not exist", E::TABLE)))
    }

    async fn delete_many(&self, mut entities: Vec<E>) -> AppResult<Vec<E>> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }
        let now = Utc::now();
        for entity in &mut entities {
            entity.base_mut().deactivate(now);
        }
        let ids: Vec<Uuid> = entities.iter().map(|e| e.id()).collect();

        sql::deactivate(E::TABLE, ids, now)
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("bulk soft delete", E::TABLE))
    }

    async fn delete_permanently(&self, id: Uuid) -> AppResult<bool> {
        let result = sql::delete(E::TABLE, vec![id])
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error("delete", E::TABLE))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many_permanently(&self, ids: &[Uuid]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sql::delete(E::TABLE, ids.to_vec())
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error("bulk delete", E::TABLE))?;
        Ok(result.rows_affected())
    }

    async fn count(&self, filter: &Filter, active: bool) -> AppResult<u64> {
        filter.validate()?;
        let total: i64 = sql::count(E::TABLE, filter, active)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count", E::TABLE))?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn any(&self, filter: &Filter, active: bool) -> AppResult<bool> {
        filter.validate()?;
        sql::exists(E::TABLE, filter, active)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("probe", E::TABLE))
    }
}
