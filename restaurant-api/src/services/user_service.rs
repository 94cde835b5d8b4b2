// User service - user records and login bookkeeping
use role_gate::Role;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::UserRecord;

pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List users, newest first, optionally filtered by email or display name
    pub async fn list_users(&self, search: Option<&str>) -> Result<Vec<UserRecord>> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let users: Vec<UserRecord> = sqlx::query_as(
            r#"
            SELECT uid, email, display_name, role, created_at, last_login
            FROM users
            WHERE $1::TEXT IS NULL OR email ILIKE $1 OR display_name ILIKE $1
            ORDER BY created_at DESC
            "#
        )
        .bind(pattern)
        .fetch_all(&self.db.pg)
        .await?;

        Ok(users)
    }

    pub async fn get_user(&self, uid: &str) -> Result<UserRecord> {
        let user: UserRecord = sqlx::query_as(
            "SELECT uid, email, display_name, role, created_at, last_login FROM users WHERE uid = $1"
        )
        .bind(uid)
        .fetch_optional(&self.db.pg)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))?;

        Ok(user)
    }

    /// Stamp a login, creating the record with the lowest role on first sight.
    ///
    /// An existing role is never touched here.
    pub async fn record_login(
        &self,
        uid: &str,
        email: Option<&str>,
        display_name: Option<&str>,
    ) -> Result<UserRecord> {
        let user: UserRecord = sqlx::query_as(
            r#"
            INSERT INTO users (uid, email, display_name, role, created_at, last_login)
            VALUES ($1, COALESCE($2, ''), COALESCE($3, $2), $4, NOW(), NOW())
            ON CONFLICT (uid) DO UPDATE
            SET last_login = NOW(),
                email = COALESCE($2, users.email),
                display_name = COALESCE(users.display_name, $3, $2)
            RETURNING uid, email, display_name, role, created_at, last_login
            "#
        )
        .bind(uid)
        .bind(email)
        .bind(display_name)
        .bind(Role::Client.as_str())
        .fetch_one(&self.db.pg)
        .await?;

        tracing::debug!(uid = %uid, "Login recorded");

        Ok(user)
    }
}
