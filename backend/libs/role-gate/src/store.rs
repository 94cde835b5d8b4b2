use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::principal::PrincipalId;
use crate::role::Role;

/// Where principal roles are persisted.
///
/// Implementations own timeouts and retries; the gate calls straight through.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Raw stored role value.
    ///
    /// Returns `Ok(None)` when the principal has no record or the record has no
    /// role set. The value is not validated here.
    async fn fetch_role(&self, principal: &PrincipalId) -> Result<Option<String>, StoreError>;

    /// Persist a new role for the principal.
    async fn store_role(&self, principal: &PrincipalId, role: Role) -> Result<(), StoreError>;
}

/// Process-local role store, used by tests and local tooling.
///
/// Writes upsert: storing a role for an unknown principal creates the record.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleStore {
    roles: Arc<RwLock<HashMap<PrincipalId, String>>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, principal: impl Into<PrincipalId>, role: Role) {
        self.insert_raw(principal, role.as_str()).await;
    }

    /// Store an arbitrary value, bypassing role validation.
    pub async fn insert_raw(&self, principal: impl Into<PrincipalId>, raw: impl Into<String>) {
        self.roles.write().await.insert(principal.into(), raw.into());
    }

    pub async fn get_raw(&self, principal: &PrincipalId) -> Option<String> {
        self.roles.read().await.get(principal).cloned()
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn fetch_role(&self, principal: &PrincipalId) -> Result<Option<String>, StoreError> {
        Ok(self.get_raw(principal).await)
    }

    async fn store_role(&self, principal: &PrincipalId, role: Role) -> Result<(), StoreError> {
        self.roles
            .write()
            .await
            .insert(principal.clone(), role.as_str().to_string());
        Ok(())
    }
}
