//! Roles, permissions and the views they unlock.
//!
//! Roles are derived from the user's directory group memberships. The result
//! is carried in a [`CurrentUser`] value that callers pass explicitly; nothing
//! here reads process-wide state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Roles held by a user. Same JSON shape as the upstream `/me` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    pub is_admin: bool,
    pub is_solution_architect: bool,
    pub has_catalog_access: bool,
}

impl Default for RoleSet {
    /// Every identified user can browse the catalog.
    fn default() -> Self {
        Self {
            is_admin: false,
            is_solution_architect: false,
            has_catalog_access: true,
        }
    }
}

/// Directory group names that grant each role.
///
/// An empty `catalog` list means every identified user has catalog access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleGroups {
    pub admin: Vec<String>,
    pub solution_architect: Vec<String>,
    pub catalog: Vec<String>,
}

impl RoleSet {
    pub fn from_groups<S: AsRef<str>>(groups: &[S], mapping: &RoleGroups) -> Self {
        let member_of = |names: &[String]| {
            groups
                .iter()
                .any(|g| names.iter().any(|n| n.eq_ignore_ascii_case(g.as_ref().trim())))
        };
        let is_admin = member_of(&mapping.admin);
        Self {
            is_admin,
            is_solution_architect: member_of(&mapping.solution_architect),
            has_catalog_access: mapping.catalog.is_empty() || member_of(&mapping.catalog) || is_admin,
        }
    }

    pub fn can_build_solutions(&self) -> bool {
        self.is_solution_architect || self.is_admin
    }
}

/// The identified user on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub roles: RoleSet,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            id: id.into(),
            roles,
        }
    }

    pub fn permissions(&self) -> Permissions {
        Permissions::for_roles(&self.roles)
    }

    /// Check whether this user may open `view`.
    pub fn authorize(&self, view: View) -> Result<(), AccessDenied> {
        let allowed = match view {
            View::Catalog | View::OfferingDetail => self.roles.has_catalog_access,
            View::UserProfile => true,
            View::SolutionBuilder => self.roles.can_build_solutions(),
            View::Admin(_) => self.roles.is_admin,
        };
        if allowed {
            Ok(())
        } else {
            Err(AccessDenied {
                required: view.required_role(),
            })
        }
    }
}

/// The permission matrix derived from a [`RoleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub can_view_catalog: bool,
    pub can_build_solutions: bool,
    pub can_link_activities: bool,
    pub can_update_sequence: bool,
    pub can_edit_activities: bool,
    pub can_edit_offerings: bool,
    pub can_edit_pricing: bool,
    pub can_edit_staffing: bool,
    pub can_edit_wbs: bool,
    pub can_edit_brands: bool,
    pub can_edit_products: bool,
    pub can_edit_countries: bool,
    pub can_delete_activities: bool,
    pub can_delete_offerings: bool,
}

impl Permissions {
    pub fn for_roles(roles: &RoleSet) -> Self {
        let builder = roles.can_build_solutions();
        let admin = roles.is_admin;
        Self {
            can_view_catalog: roles.has_catalog_access,
            can_build_solutions: builder,
            can_link_activities: builder,
            can_update_sequence: builder,
            can_edit_activities: admin,
            can_edit_offerings: admin,
            can_edit_pricing: admin,
            can_edit_staffing: admin,
            can_edit_wbs: admin,
            can_edit_brands: admin,
            can_edit_products: admin,
            can_edit_countries: admin,
            can_delete_activities: admin,
            can_delete_offerings: admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    CatalogViewer,
    SolutionArchitect,
    Administrator,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CatalogViewer => "Catalog",
            Self::SolutionArchitect => "Solution Architect",
            Self::Administrator => "Administrator",
        }
    }
}

/// Master-data screens under the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminSection {
    Brands,
    Products,
    Countries,
    Offerings,
    Activities,
    Pricing,
    Staffing,
    Wbs,
}

impl AdminSection {
    pub const ALL: [AdminSection; 8] = [
        Self::Brands,
        Self::Products,
        Self::Countries,
        Self::Offerings,
        Self::Activities,
        Self::Pricing,
        Self::Staffing,
        Self::Wbs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brands => "brands",
            Self::Products => "products",
            Self::Countries => "countries",
            Self::Offerings => "offerings",
            Self::Activities => "activities",
            Self::Pricing => "pricing",
            Self::Staffing => "staffing",
            Self::Wbs => "wbs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Catalog,
    OfferingDetail,
    SolutionBuilder,
    UserProfile,
    Admin(AdminSection),
}

impl View {
    pub fn required_role(&self) -> Role {
        match self {
            Self::Catalog | Self::OfferingDetail | Self::UserProfile => Role::CatalogViewer,
            Self::SolutionBuilder => Role::SolutionArchitect,
            Self::Admin(_) => Role::Administrator,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("You need {} access to view this page.", .required.label())]
pub struct AccessDenied {
    pub required: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub path: String,
}

impl NavItem {
    fn new(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: path.to_string(),
        }
    }
}

/// What a user sees: top navigation, admin screens and the permission matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub user: CurrentUser,
    pub navigation: Vec<NavItem>,
    pub admin_sections: Vec<AdminSection>,
    pub permissions: Permissions,
}

pub fn compose_layout(user: &CurrentUser) -> Layout {
    let permissions = user.permissions();
    let mut navigation = Vec::new();

    if permissions.can_view_catalog {
        navigation.push(NavItem::new("Catalog", "/catalog"));
    }
    if permissions.can_build_solutions {
        navigation.push(NavItem::new("Solution Builder", "/solution-builder"));
    }
    if user.roles.is_admin {
        navigation.push(NavItem::new("Admin", "/admin"));
    }

    let admin_sections = if user.roles.is_admin {
        AdminSection::ALL.to_vec()
    } else {
        Vec::new()
    };

    Layout {
        user: user.clone(),
        navigation,
        admin_sections,
        permissions,
    }
}
