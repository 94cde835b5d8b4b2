//! Dashboard affordances derived from the shared policy.
//!
//! These decide what a client renders. They are advisory only; the API
//! re-checks every request.

use serde::Serialize;

use crate::policy::Action;
use crate::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSection {
    Home,
    Cart,
    Orders,
    Products,
    Events,
    Offers,
    Users,
}

impl DashboardSection {
    /// Display order
    pub const ALL: [DashboardSection; 7] = [
        DashboardSection::Home,
        DashboardSection::Cart,
        DashboardSection::Orders,
        DashboardSection::Products,
        DashboardSection::Events,
        DashboardSection::Offers,
        DashboardSection::Users,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            DashboardSection::Home => "/dashboard",
            DashboardSection::Cart => "/dashboard/cart",
            DashboardSection::Orders => "/dashboard/orders",
            DashboardSection::Products => "/dashboard/products",
            DashboardSection::Events => "/dashboard/events",
            DashboardSection::Offers => "/dashboard/offers",
            DashboardSection::Users => "/dashboard/users",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DashboardSection::Home => "Dashboard",
            DashboardSection::Cart => "Shopping cart",
            DashboardSection::Orders => "My orders",
            DashboardSection::Products => "Product management",
            DashboardSection::Events => "Event management",
            DashboardSection::Offers => "Offer management",
            DashboardSection::Users => "User management",
        }
    }

    pub fn required_action(&self) -> Action {
        match self {
            DashboardSection::Home => Action::ViewCatalog,
            DashboardSection::Cart | DashboardSection::Orders => Action::UseCart,
            DashboardSection::Products => Action::ManageProducts,
            DashboardSection::Events => Action::ManageEvents,
            DashboardSection::Offers => Action::ManageOffers,
            DashboardSection::Users => Action::ListUsers,
        }
    }
}

/// Sections a role may navigate to, in display order.
pub fn visible_sections(role: Role) -> Vec<DashboardSection> {
    DashboardSection::ALL
        .into_iter()
        .filter(|section| section.required_action().is_permitted(role))
        .collect()
}

/// Roles offered in the role picker for `viewer`.
///
/// Only a super admin is offered super admin.
pub fn assignable_roles(viewer: Role) -> Vec<Role> {
    if !Action::ChangeRole.is_permitted(viewer) {
        return Vec::new();
    }

    Role::all()
        .iter()
        .copied()
        .filter(|role| *role != Role::SuperAdmin || viewer == Role::SuperAdmin)
        .collect()
}

/// Whether the role picker is shown for a user holding `target`.
pub fn can_edit_role_of(viewer: Role, target: Role) -> bool {
    Action::ChangeRole.is_permitted(viewer) && target != Role::SuperAdmin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_sections_per_role() {
        use DashboardSection::*;

        assert_eq!(visible_sections(Role::Client), vec![Home, Cart, Orders]);
        assert_eq!(
            visible_sections(Role::Seller),
            vec![Home, Cart, Orders, Products]
        );
        assert_eq!(
            visible_sections(Role::Promoter),
            vec![Home, Cart, Orders, Products, Events, Offers]
        );
        assert_eq!(visible_sections(Role::Admin), DashboardSection::ALL.to_vec());
        assert_eq!(visible_sections(Role::SuperAdmin), DashboardSection::ALL.to_vec());
    }

    #[test]
    fn test_assignable_roles() {
        assert!(assignable_roles(Role::Client).is_empty());
        assert!(assignable_roles(Role::Promoter).is_empty());
        assert_eq!(
            assignable_roles(Role::Admin),
            vec![Role::Client, Role::Seller, Role::Promoter, Role::Admin]
        );
        assert_eq!(assignable_roles(Role::SuperAdmin), Role::all().to_vec());
    }

    #[test]
    fn test_super_admins_are_not_editable_from_the_picker() {
        assert!(can_edit_role_of(Role::Admin, Role::Seller));
        assert!(can_edit_role_of(Role::SuperAdmin, Role::Admin));
        assert!(!can_edit_role_of(Role::SuperAdmin, Role::SuperAdmin));
        assert!(!can_edit_role_of(Role::Admin, Role::SuperAdmin));
        assert!(!can_edit_role_of(Role::Seller, Role::Client));
    }

    #[test]
    fn test_section_paths_are_unique() {
        let mut paths: Vec<_> = DashboardSection::ALL.iter().map(|s| s.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), DashboardSection::ALL.len());
    }
}
