use chrono::{DateTime, Utc};
use role_gate::{GateError, Role};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRecord {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    /// Raw stored value, possibly missing or outside the hierarchy
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Stored role, with anything missing or unrecognized read as client.
    pub fn effective_role(&self) -> Role {
        self.role
            .as_deref()
            .and_then(Role::parse)
            .unwrap_or(Role::Client)
    }
}

/// Body of a role change. `role` is taken as any JSON value so that a
/// missing or non-string role is reported as an invalid role.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    #[serde(default)]
    pub role: Value,
}

impl ChangeRoleRequest {
    pub fn role_name(&self) -> Result<&str, GateError> {
        self.role
            .as_str()
            .ok_or_else(|| GateError::InvalidRole(self.role.to_string()))
    }
}
