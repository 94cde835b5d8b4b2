// Document service - free-form catalog documents grouped by collection
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{strip_reserved, Collection, Document, DocumentRow};

pub struct DocumentService {
    db: Database,
}

impl DocumentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List every document in a collection, in the collection's listing order
    pub async fn list(&self, collection: Collection) -> Result<Vec<Document>> {
        let query = format!(
            r#"
            SELECT id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1
            ORDER BY {}
            "#,
            collection.order_clause()
        );

        let rows: Vec<DocumentRow> = sqlx::query_as(&query)
            .bind(collection.as_str())
            .fetch_all(&self.db.pg)
            .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    /// Store a new document; the server assigns id and timestamps
    pub async fn create(&self, collection: Collection, body: Map<String, Value>) -> Result<Document> {
        let row: DocumentRow = sqlx::query_as(
            r#"
            INSERT INTO documents (id, collection, data, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, data, created_at, updated_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(collection.as_str())
        .bind(Value::Object(strip_reserved(body)))
        .fetch_one(&self.db.pg)
        .await?;

        Ok(row.into())
    }

    /// Merge `updates` into an existing document
    pub async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        updates: Map<String, Value>,
    ) -> Result<Document> {
        let row: DocumentRow = sqlx::query_as(
            r#"
            UPDATE documents
            SET data = data || $3, updated_at = NOW()
            WHERE id = $1 AND collection = $2
            RETURNING id, data, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(collection.as_str())
        .bind(Value::Object(strip_reserved(updates)))
        .fetch_optional(&self.db.pg)
        .await?
        .ok_or_else(|| not_found(collection, id))?;

        Ok(row.into())
    }

    pub async fn delete(&self, collection: Collection, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND collection = $2")
            .bind(id)
            .bind(collection.as_str())
            .execute(&self.db.pg)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(collection, id));
        }

        Ok(())
    }

    pub async fn exists(&self, collection: Collection, id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM documents WHERE id = $1 AND collection = $2)"
        )
        .bind(id)
        .bind(collection.as_str())
        .fetch_one(&self.db.pg)
        .await?;

        Ok(exists)
    }
}

fn not_found(collection: Collection, id: Uuid) -> AppError {
    AppError::NotFound(format!("{} document {} not found", collection.as_str(), id))
}
