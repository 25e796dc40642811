//! The seeded roles and the self-registration role mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use quizhub_core::types::RoleId;

/// Name of the superuser role. Holders pass every role gate.
pub const ADMIN_ROLE: &str = "admin";

/// Roles created by the initial migration with fixed identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinRole {
    /// Superuser.
    Admin,
    /// Default self-registered role.
    Student,
    /// Self-registered role for quiz authors.
    Teacher,
}

impl BuiltinRole {
    /// The fixed identifier this role is seeded with.
    pub fn id(&self) -> RoleId {
        match self {
            Self::Admin => RoleId::ADMIN,
            Self::Student => RoleId::STUDENT,
            Self::Teacher => RoleId::TEACHER,
        }
    }

    /// Return the role name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ADMIN_ROLE,
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }

    /// Map a role name requested at self-registration.
    ///
    /// `student`/`user` select [`BuiltinRole::Student`] and
    /// `teacher`/`moderator` select [`BuiltinRole::Teacher`]. Anything else,
    /// `admin` included, is refused.
    pub fn for_registration(requested: &str) -> Option<Self> {
        match requested.trim().to_lowercase().as_str() {
            "student" | "user" => Some(Self::Student),
            "teacher" | "moderator" => Some(Self::Teacher),
            _ => None,
        }
    }
}

impl fmt::Display for BuiltinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuiltinRole {
    type Err = quizhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            _ => Err(quizhub_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, student, teacher"
            ))),
        }
    }
}
