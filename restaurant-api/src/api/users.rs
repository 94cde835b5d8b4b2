use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use role_gate::{
    permitted_actions,
    ui::{assignable_roles, can_edit_role_of, visible_sections, DashboardSection},
    Action, PrincipalId, Role,
};
use serde::{Deserialize, Serialize};

use crate::api::parse_body;
use crate::error::{AppError, Result};
use crate::middleware::CurrentPrincipal;
use crate::models::{AuditAction, ChangeRoleRequest, CreateAuditLog, ResourceType, UserRecord};
use crate::services::{AuditService, UserService};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_me))
        .route("/me/login", post(record_login))
        .route("/:id/role", put(change_role))
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserSummaryResponse {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
    /// Whether the caller's dashboard offers a role picker for this user
    pub role_editable: bool,
    pub created_at: String,
    pub last_login: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummaryResponse>,
    pub total: usize,
    pub assignable_roles: Vec<Role>,
}

fn summarize(user: UserRecord, viewer: Role) -> UserSummaryResponse {
    let role = user.effective_role();
    UserSummaryResponse {
        uid: user.uid,
        email: user.email,
        display_name: user.display_name,
        role,
        role_editable: can_edit_role_of(viewer, role),
        created_at: user.created_at.to_rfc3339(),
        last_login: user.last_login.map(|t| t.to_rfc3339()),
    }
}

async fn list_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserListResponse>> {
    current.require(Action::ListUsers)?;

    let users = UserService::new(state.db.clone())
        .list_users(query.search.as_deref())
        .await?;

    let users: Vec<UserSummaryResponse> = users
        .into_iter()
        .map(|u| summarize(u, current.role))
        .collect();

    Ok(Json(UserListResponse {
        total: users.len(),
        users,
        assignable_roles: assignable_roles(current.role),
    }))
}

#[derive(Debug, Serialize)]
pub struct NavigationLink {
    pub section: DashboardSection,
    pub path: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Role,
    pub permissions: Vec<Action>,
    pub navigation: Vec<NavigationLink>,
    pub assignable_roles: Vec<Role>,
}

fn me_response(current: &CurrentPrincipal, user: Option<&UserRecord>) -> MeResponse {
    let navigation = visible_sections(current.role)
        .into_iter()
        .map(|section| NavigationLink {
            section,
            path: section.path(),
            label: section.label(),
        })
        .collect();

    MeResponse {
        uid: current.uid().to_string(),
        email: user.map(|u| u.email.clone()).or_else(|| current.email.clone()),
        display_name: user
            .and_then(|u| u.display_name.clone())
            .or_else(|| current.name.clone()),
        role: current.role,
        permissions: permitted_actions(current.role),
        navigation,
        assignable_roles: assignable_roles(current.role),
    }
}

async fn get_me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> Result<Json<MeResponse>> {
    current.require(Action::UseCart)?;

    let user = match UserService::new(state.db.clone()).get_user(current.uid()).await {
        Ok(user) => Some(user),
        Err(AppError::NotFound(_)) => None,
        Err(e) => return Err(e),
    };

    Ok(Json(me_response(&current, user.as_ref())))
}

async fn record_login(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> Result<Json<MeResponse>> {
    let user = UserService::new(state.db.clone())
        .record_login(current.uid(), current.email.as_deref(), current.name.as_deref())
        .await?;

    Ok(Json(me_response(&current, Some(&user))))
}

/// Role validation and permission checks live in the gate so an unknown
/// role is reported as such whoever asks. A missing or non-string `role`
/// counts as unknown.
async fn change_role(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    let payload: ChangeRoleRequest = parse_body(&body)?;
    let target = PrincipalId::from(id);

    let role = state
        .gate
        .change_role(&current.principal, &target, payload.role_name()?)
        .await?;

    AuditService::new(state.db.clone())
        .record(CreateAuditLog {
            actor_id: current.uid().to_string(),
            action: AuditAction::ChangeRole,
            resource_type: ResourceType::User,
            resource_id: Some(target.to_string()),
            details: Some(serde_json::json!({ "role": role })),
        })
        .await;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "User role updated successfully",
        "uid": target,
        "role": role,
    })))
}
