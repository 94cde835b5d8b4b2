use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use role_gate::Action;
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::CurrentPrincipal;
use crate::models::AuditLog;
use crate::services::AuditService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_recent))
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

async fn list_recent(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<AuditLog>>> {
    current.require(Action::ListUsers)?;

    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let logs = AuditService::new(state.db.clone()).list_recent(limit).await?;

    Ok(Json(logs))
}
