use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use role_gate::Action;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::api::parse_body;
use crate::error::{AppError, Result};
use crate::middleware::CurrentPrincipal;
use crate::models::{AuditAction, Collection, CreateAuditLog, Document};
use crate::services::{AuditService, DocumentService};
use crate::AppState;

/// CRUD routes for one catalog collection
pub fn routes(collection: Collection) -> Router<AppState> {
    Router::new()
        .route("/", get(list_documents).post(create_document))
        .route("/:id", put(update_document).delete(delete_document))
        .layer(Extension(collection))
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest("Invalid document ID".to_string()))
}

async fn list_documents(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Extension(current): Extension<CurrentPrincipal>,
) -> Result<Json<Vec<Document>>> {
    current.require(Action::ViewCatalog)?;

    let documents = DocumentService::new(state.db.clone()).list(collection).await?;
    Ok(Json(documents))
}

async fn create_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Extension(current): Extension<CurrentPrincipal>,
    body: Bytes,
) -> Result<(StatusCode, Json<Document>)> {
    current.require(collection.write_action())?;
    let body: Map<String, Value> = parse_body(&body)?;

    let document = DocumentService::new(state.db.clone())
        .create(collection, body)
        .await?;

    tracing::info!(
        collection = collection.as_str(),
        id = %document.id,
        actor = %current.principal.id,
        "Document created"
    );

    AuditService::new(state.db.clone())
        .record(CreateAuditLog {
            actor_id: current.uid().to_string(),
            action: AuditAction::CreateDocument,
            resource_type: collection.resource_type(),
            resource_id: Some(document.id.to_string()),
            details: None,
        })
        .await;

    Ok((StatusCode::CREATED, Json(document)))
}

async fn update_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Document>> {
    current.require(collection.write_action())?;
    let id = parse_id(&id)?;
    let updates: Map<String, Value> = parse_body(&body)?;

    let changed: Vec<String> = updates.keys().cloned().collect();
    let document = DocumentService::new(state.db.clone())
        .update(collection, id, updates)
        .await?;

    AuditService::new(state.db.clone())
        .record(CreateAuditLog {
            actor_id: current.uid().to_string(),
            action: AuditAction::UpdateDocument,
            resource_type: collection.resource_type(),
            resource_id: Some(id.to_string()),
            details: Some(serde_json::json!({ "fields": changed })),
        })
        .await;

    Ok(Json(document))
}

async fn delete_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    current.require(Action::DeleteContent)?;
    let id = parse_id(&id)?;

    DocumentService::new(state.db.clone())
        .delete(collection, id)
        .await?;

    tracing::info!(
        collection = collection.as_str(),
        id = %id,
        actor = %current.principal.id,
        "Document deleted"
    );

    AuditService::new(state.db.clone())
        .record(CreateAuditLog {
            actor_id: current.uid().to_string(),
            action: AuditAction::DeleteDocument,
            resource_type: collection.resource_type(),
            resource_id: Some(id.to_string()),
            details: None,
        })
        .await;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("{} document {} deleted", collection.as_str(), id),
    })))
}
