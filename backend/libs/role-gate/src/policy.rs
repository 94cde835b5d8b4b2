//! Minimum role for every gated operation.
//!
//! Both the HTTP routes and the dashboard read this table.

use serde::Serialize;

use crate::role::{is_authorized, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// List products, events and offers
    ViewCatalog,
    /// Own cart, own coupons, own profile
    UseCart,
    ManageProducts,
    ManageEvents,
    ManageOffers,
    /// Delete products, events or offers
    DeleteContent,
    ListUsers,
    ChangeRole,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::ViewCatalog,
        Action::UseCart,
        Action::ManageProducts,
        Action::ManageEvents,
        Action::ManageOffers,
        Action::DeleteContent,
        Action::ListUsers,
        Action::ChangeRole,
    ];

    pub fn required_role(&self) -> Role {
        match self {
            Action::ViewCatalog | Action::UseCart => Role::Client,
            Action::ManageProducts => Role::Seller,
            Action::ManageEvents | Action::ManageOffers => Role::Promoter,
            Action::DeleteContent | Action::ListUsers | Action::ChangeRole => Role::Admin,
        }
    }

    pub fn is_permitted(&self, role: Role) -> bool {
        is_authorized(role, self.required_role())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ViewCatalog => "view_catalog",
            Action::UseCart => "use_cart",
            Action::ManageProducts => "manage_products",
            Action::ManageEvents => "manage_events",
            Action::ManageOffers => "manage_offers",
            Action::DeleteContent => "delete_content",
            Action::ListUsers => "list_users",
            Action::ChangeRole => "change_role",
        }
    }
}

/// Actions a role may perform, in table order.
pub fn permitted_actions(role: Role) -> Vec<Action> {
    Action::ALL
        .into_iter()
        .filter(|action| action.is_permitted(role))
        .collect()
}
