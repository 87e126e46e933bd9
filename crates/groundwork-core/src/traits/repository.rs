//! Generic repository trait for soft-delete aware data access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::filter::Filter;
use crate::types::pagination::PagingRequest;

/// Generic CRUD repository over entities keyed by `Uuid`.
///
/// Every read takes an `active` selector: `true` sees live rows, `false`
/// sees soft-deleted ones. `delete` and `delete_many` only flip the active
/// flag; the `*_permanently` variants remove rows.
#[async_trait]
pub trait Repository<Entity>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn get_by_id(&self, id: Uuid, active: bool) -> AppResult<Option<Entity>>;

    /// List every entity with the given active flag.
    async fn get_all(&self, active: bool) -> AppResult<Vec<Entity>>;

    /// Find the single entity matching `filter`.
    ///
    /// Returns a conflict error when more than one row matches.
    async fn find_by(&self, filter: &Filter, active: bool) -> AppResult<Option<Entity>>;

    /// List the entities matching `filter`.
    async fn filter_by(&self, filter: &Filter, active: bool) -> AppResult<Vec<Entity>>;

    /// List one page of the entities matching `filter`.
    async fn filter_paged(
        &self,
        filter: &Filter,
        page: &PagingRequest,
        active: bool,
    ) -> AppResult<Vec<Entity>>;

    /// Insert a new entity and return it as stored.
    async fn insert(&self, entity: Entity) -> AppResult<Entity>;

    /// Insert many entities in one unit of work.
    async fn insert_many(&self, entities: Vec<Entity>) -> AppResult<Vec<Entity>>;

    /// Update an existing entity and return it as stored.
    async fn update(&self, entity: Entity) -> AppResult<Entity>;

    /// Update many entities in one unit of work.
    async fn update_many(&self, entities: Vec<Entity>) -> AppResult<Vec<Entity>>;

    /// Soft-delete an entity and return it with the flag cleared.
    async fn delete(&self, entity: Entity) -> AppResult<Entity>;

    /// Soft-delete many entities.
    async fn delete_many(&self, entities: Vec<Entity>) -> AppResult<Vec<Entity>>;

    /// Remove an entity row. Returns `true` if a row was removed.
    async fn delete_permanently(&self, id: Uuid) -> AppResult<bool>;

    /// Remove many entity rows. Returns the number removed.
    async fn delete_many_permanently(&self, ids: &[Uuid]) -> AppResult<u64>;

    /// Count the entities matching `filter`.
    async fn count(&self, filter: &Filter, active: bool) -> AppResult<u64>;

    /// Check whether any entity matches `filter`.
    async fn any(&self, filter: &Filter, active: bool) -> AppResult<bool>;
}
