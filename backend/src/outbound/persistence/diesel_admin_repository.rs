//! PostgreSQL-backed `AdminRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AdminRepository, AdminRepositoryError};
use crate::domain::{AdminAccount, NewAdmin};

use super::error_mapping::{DieselFailure, classify, describe};
use super::models::{AdminRow, NewAdminRow};
use super::pool::{DbPool, PoolError};
use super::schema::admins;

/// Diesel implementation of [`AdminRepository`].
#[derive(Clone)]
pub struct DieselAdminRepository {
    pool: DbPool,
}

impl DieselAdminRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AdminRepositoryError {
    AdminRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> AdminRepositoryError {
    match classify(error) {
        DieselFailure::Connection(message) => AdminRepositoryError::connection(message),
        other => AdminRepositoryError::query(describe(&other)),
    }
}

#[async_trait]
impl AdminRepository for DieselAdminRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AdminRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AdminRow> = admins::table
            .filter(admins::username.eq(username))
            .select(AdminRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(AdminAccount::from))
    }

    async fn insert_if_absent(&self, admin: &NewAdmin) -> Result<bool, AdminRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = diesel::insert_into(admins::table)
            .values(&NewAdminRow {
                username: &admin.username,
                password_hash: &admin.password_hash,
            })
            .on_conflict(admins::username)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted > 0)
    }
}
