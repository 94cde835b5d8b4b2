use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{GateError, Result};
use crate::principal::{AccessRequest, Principal, PrincipalId};
use crate::role::Role;
use crate::store::RoleStore;

/// Authorization gate over the role store.
///
/// Holds no state of its own: every call re-reads the principal's role.
#[derive(Clone)]
pub struct RoleGate {
    store: Arc<dyn RoleStore>,
}

impl RoleGate {
    pub fn new(store: Arc<dyn RoleStore>) -> Self {
        Self { store }
    }

    /// Effective role of a principal.
    ///
    /// A missing record, a missing or unrecognized role value, and a failed
    /// lookup all resolve to [`Role::Client`].
    pub async fn resolve_role(&self, principal: &Principal) -> Role {
        match self.store.fetch_role(&principal.id).await {
            Ok(Some(raw)) => Role::parse(&raw).unwrap_or_else(|| {
                warn!(
                    principal = %principal.id,
                    stored_role = %raw,
                    "Unrecognized stored role, resolving to client"
                );
                Role::Client
            }),
            Ok(None) => {
                debug!(principal = %principal.id, "No stored role, resolving to client");
                Role::Client
            }
            Err(e) => {
                warn!(principal = %principal.id, error = %e, "Role lookup failed, resolving to client");
                Role::Client
            }
        }
    }

    /// Resolve the principal's role and require it to reach `required`.
    ///
    /// Returns the resolved role on success.
    pub async fn authorize(&self, principal: &Principal, required: Role) -> Result<Role> {
        let current = self.resolve_role(principal).await;

        if !AccessRequest::new(current, required).is_granted() {
            debug!(
                principal = %principal.id,
                current = %current,
                required = %required,
                "Access denied"
            );
            return Err(GateError::Forbidden);
        }

        Ok(current)
    }

    /// Assign `new_role` to `target` on behalf of `acting`.
    ///
    /// Fails with `InvalidRole` for any value outside the hierarchy, before the
    /// actor is looked at. The actor must be an admin or above, and a super
    /// admin may not assign itself anything other than super admin.
    pub async fn change_role(
        &self,
        acting: &Principal,
        target: &PrincipalId,
        new_role: &str,
    ) -> Result<Role> {
        let new_role: Role = new_role.parse()?;
        let actor_role = self.authorize(acting, Role::Admin).await?;

        if *target == acting.id && actor_role == Role::SuperAdmin && new_role != Role::SuperAdmin {
            warn!(principal = %acting.id, requested = %new_role, "Super admin self-demotion rejected");
            return Err(GateError::Forbidden);
        }

        self.store.store_role(target, new_role).await?;

        info!(
            actor = %acting.id,
            actor_role = %actor_role,
            target = %target,
            role = %new_role,
            "Role changed"
        );

        Ok(new_role)
    }
}

impl std::fmt::Debug for RoleGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleGate").finish_non_exhaustive()
    }
}
