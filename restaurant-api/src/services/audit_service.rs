use uuid::Uuid;

use crate::db::Database;
use crate::error::Result;
use crate::models::{AuditLog, CreateAuditLog};

pub struct AuditService {
    db: Database,
}

impl AuditService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn log(&self, entry: CreateAuditLog) -> Result<AuditLog> {
        let log: AuditLog = sqlx::query_as(
            r#"
            INSERT INTO audit_logs (id, actor_id, action, resource_type, resource_id, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(entry.actor_id)
        .bind(entry.action.as_str())
        .bind(entry.resource_type.as_str())
        .bind(entry.resource_id)
        .bind(entry.details)
        .fetch_one(&self.db.pg)
        .await?;

        Ok(log)
    }

    /// Record an entry without failing the surrounding request
    pub async fn record(&self, entry: CreateAuditLog) {
        let action = entry.action;
        if let Err(e) = self.log(entry).await {
            tracing::warn!(action = action.as_str(), "Failed to write audit log: {}", e);
        }
    }

    pub async fn list_recent(&self, limit: i64) -> Result<Vec<AuditLog>> {
        let logs: Vec<AuditLog> = sqlx::query_as(
            "SELECT * FROM audit_logs ORDER BY created_at DESC LIMIT $1"
        )
        .bind(limit)
        .fetch_all(&self.db.pg)
        .await?;

        Ok(logs)
    }
}
