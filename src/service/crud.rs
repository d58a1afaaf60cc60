//! Generic CRUD execution for any [`Entity`] against PostgreSQL.
//!
//! Every method takes an executor so the same statements run on the pool or inside a caller's transaction.

use crate::error::AppError;
use crate::models::{Entity, IntoChangeset, Page};
use crate::sql::{delete_by_id, insert, select_by_id, select_page, update};
use sqlx::PgExecutor;

pub struct CrudService;

impl CrudService {
    /// Page of rows ordered by primary key.
    pub async fn list<'c, T, X>(exec: X, page: Page) -> Result<Vec<T>, AppError>
    where
        T: Entity,
        X: PgExecutor<'c>,
    {
        let sql = select_page(T::TABLE, T::PK);
        tracing::debug!(sql = %sql, limit = page.limit(), offset = page.offset(), "query");
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(exec)
            .await?;
        Ok(rows)
    }

    /// Fetch one row by primary key.
    pub async fn read<'c, T, X>(exec: X, id: i32) -> Result<Option<T>, AppError>
    where
        T: Entity,
        X: PgExecutor<'c>,
    {
        let sql = select_by_id(T::TABLE, T::PK);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(exec).await?;
        Ok(row)
    }

    /// Like [`CrudService::read`] but a missing row is a 404.
    pub async fn get<'c, T, X>(exec: X, id: i32) -> Result<T, AppError>
    where
        T: Entity,
        X: PgExecutor<'c>,
    {
        Self::read(exec, id).await?.ok_or_else(|| AppError::not_found(T::NAME))
    }

    /// Insert one row. Returns the created row.
    pub async fn create<'c, T, P, X>(exec: X, payload: P) -> Result<T, AppError>
    where
        T: Entity,
        P: IntoChangeset,
        X: PgExecutor<'c>,
    {
        let mut q = insert(T::TABLE, payload.into_changeset());
        tracing::debug!(sql = %q.sql(), "query");
        let row = q.build_query_as::<T>().fetch_one(exec).await?;
        Ok(row)
    }

    /// Assign the fields present in `payload`. Missing row is a 404; an empty payload returns the row unchanged.
    pub async fn update<'c, T, P, X>(exec: X, id: i32, payload: P) -> Result<T, AppError>
    where
        T: Entity,
        P: IntoChangeset,
        X: PgExecutor<'c>,
    {
        let Some(mut q) = update(T::TABLE, T::PK, id, payload.into_changeset()) else {
            return Self::get(exec, id).await;
        };
        tracing::debug!(sql = %q.sql(), id, "query");
        q.build_query_as::<T>()
            .fetch_optional(exec)
            .await?
            .ok_or_else(|| AppError::not_found(T::NAME))
    }

    /// Delete one row by primary key. Returns the deleted row or None.
    pub async fn remove<'c, T, X>(exec: X, id: i32) -> Result<Option<T>, AppError>
    where
        T: Entity,
        X: PgExecutor<'c>,
    {
        let sql = delete_by_id(T::TABLE, T::PK);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(exec).await?;
        Ok(row)
    }

    /// Like [`CrudService::remove`] but a missing row is a 404.
    pub async fn delete<'c, T, X>(exec: X, id: i32) -> Result<T, AppError>
    where
        T: Entity,
        X: PgExecutor<'c>,
    {
        Self::remove(exec, id).await?.ok_or_else(|| AppError::not_found(T::NAME))
    }
}
