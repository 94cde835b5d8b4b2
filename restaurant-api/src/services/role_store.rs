// Postgres-backed role store: `users.role` is the single source of truth
use async_trait::async_trait;
use role_gate::{PrincipalId, Role, RoleStore, StoreError};
use sqlx::PgPool;

pub struct PgRoleStore {
    pg: PgPool,
}

impl PgRoleStore {
    pub fn new(pg: PgPool) -> Self {
        Self { pg }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn fetch_role(&self, principal: &PrincipalId) -> Result<Option<String>, StoreError> {
        let row: Option<(Option<String>,)> = sqlx::query_as("SELECT role FROM users WHERE uid = $1")
            .bind(principal.as_str())
            .fetch_optional(&self.pg)
            .await
            .map_err(StoreError::backend)?;

        Ok(row.and_then(|(role,)| role))
    }

    async fn store_role(&self, principal: &PrincipalId, role: Role) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE uid = $1")
            .bind(principal.as_str())
            .bind(role.as_str())
            .execute(&self.pg)
            .await
            .map_err(StoreError::backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(principal.clone()));
        }

        Ok(())
    }
}
