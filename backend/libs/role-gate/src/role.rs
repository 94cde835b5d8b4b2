//! Role hierarchy for restaurant principals
//!
//! Roles have a strict total order by privilege:
//! Client < Seller < Promoter < Admin < SuperAdmin
//!
//! The storage and wire spelling of each role is its lowercase Spanish name
//! (`cliente`, `vendedor`, `promotor`, `administrador`, `superadministrador`).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GateError;

/// Principal role with natural hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Customer - browses the catalog, owns a cart and coupons
    #[serde(rename = "cliente")]
    Client = 0,
    /// Seller - manages products
    #[serde(rename = "vendedor")]
    Seller = 1,
    /// Promoter - manages events and offers
    #[serde(rename = "promotor")]
    Promoter = 2,
    /// Admin - deletes content and manages user roles
    #[serde(rename = "administrador")]
    Admin = 3,
    /// Super admin - full control, including granting super admin
    #[serde(rename = "superadministrador")]
    SuperAdmin = 4,
}

/// The fixed role sequence, lowest privilege first.
pub const ROLE_HIERARCHY: [Role; 5] = [
    Role::Client,
    Role::Seller,
    Role::Promoter,
    Role::Admin,
    Role::SuperAdmin,
];

impl Role {
    /// Parse a stored role string. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cliente" => Some(Self::Client),
            "vendedor" => Some(Self::Seller),
            "promotor" => Some(Self::Promoter),
            "administrador" => Some(Self::Admin),
            "superadministrador" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    /// Convert role to its stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "cliente",
            Self::Seller => "vendedor",
            Self::Promoter => "promotor",
            Self::Admin => "administrador",
            Self::SuperAdmin => "superadministrador",
        }
    }

    /// Zero-based position in [`ROLE_HIERARCHY`]
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    pub fn all() -> &'static [Role] {
        &ROLE_HIERARCHY
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Client
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse from string (for API requests)
impl std::str::FromStr for Role {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| GateError::InvalidRole(s.to_string()))
    }
}

/// Ordinal of a role string, or -1 when it is not one of the five roles.
pub fn role_ordinal(role: &str) -> i32 {
    Role::parse(role).map_or(-1, |r| r.ordinal() as i32)
}

/// True iff `current` sits at or above `required` in the hierarchy.
pub fn is_authorized(current: Role, required: Role) -> bool {
    current >= required
}

/// String form of [`is_authorized`] for untyped boundaries.
///
/// An unrecognized string on either side never authorizes.
pub fn is_authorized_str(current: &str, required: &str) -> bool {
    let current = role_ordinal(current);
    let required = role_ordinal(required);

    current >= 0 && required >= 0 && current >= required
}
