use thiserror::Error;

use crate::principal::PrincipalId;

/// Failure reported by a [`RoleStore`](crate::RoleStore) collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No record for principal {0}")]
    NotFound(PrincipalId),

    #[error("Role store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

/// Authorization outcomes surfaced to callers of the gate.
///
/// None of these are retried.
#[derive(Debug, Error)]
pub enum GateError {
    /// No verified session; raised by whoever resolves the caller's identity
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, GateError>;
