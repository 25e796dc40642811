//! The role sets route groups declare, and the admission rule.

use std::collections::BTreeSet;

use quizhub_entity::role::ADMIN_ROLE;

/// Roles a route group admits.
///
/// Holders of the `admin` role are admitted by every set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedRoles {
    /// Any authenticated role.
    Any,
    /// Only the listed role names.
    Only(BTreeSet<String>),
}

impl AllowedRoles {
    /// Admit exactly the given role names (plus `admin`).
    pub fn only<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(roles.into_iter().map(Into::into).collect())
    }

    /// Whether a caller holding `role_name` may pass.
    pub fn admits(&self, role_name: &str) -> bool {
        if role_name == ADMIN_ROLE {
            return true;
        }
        match self {
            Self::Any => true,
            Self::Only(roles) => roles.contains(role_name),
        }
    }
}
