//! Role Gate Library
//!
//! One shared definition of the restaurant role hierarchy and the decisions
//! made over it. The API request filter and the dashboard both import this
//! crate, so the ordinal logic exists in exactly one place.
//!
//! **Hierarchy** (lowest first):
//! `cliente < vendedor < promotor < administrador < superadministrador`
//!
//! **Pieces**:
//! - [`Role`], [`is_authorized`], [`is_authorized_str`]: pure predicates
//! - [`RoleGate`]: role resolution and role changes over a [`RoleStore`]
//! - [`Action`]: minimum role per gated operation
//! - [`ui`]: advisory dashboard affordances
//!
//! ```
//! use role_gate::{is_authorized_str, Action, Role};
//!
//! assert!(is_authorized_str("promotor", "vendedor"));
//! assert!(!Action::DeleteContent.is_permitted(Role::Promoter));
//! ```

mod error;
mod gate;
mod policy;
mod principal;
mod role;
mod store;
pub mod ui;

pub use error::{GateError, Result, StoreError};
pub use gate::RoleGate;
pub use policy::{permitted_actions, Action};
pub use principal::{AccessRequest, Principal, PrincipalId};
pub use role::{is_authorized, is_authorized_str, role_ordinal, Role, ROLE_HIERARCHY};
pub use store::{InMemoryRoleStore, RoleStore};
