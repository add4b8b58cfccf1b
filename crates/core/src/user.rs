//! Platform users and role-based routing.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const ROLE_LEARNER: &str = "LEARNER";
pub const ROLE_CONTENT_MANAGER: &str = "CONTENT_MANAGER";
pub const ROLE_ADMIN: &str = "ADMIN";

/// All valid role strings.
pub const VALID_ROLES: &[&str] = &[ROLE_LEARNER, ROLE_CONTENT_MANAGER, ROLE_ADMIN];

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Backend user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Learner,
    ContentManager,
    Admin,
}

impl Role {
    /// Convert from the backend string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_LEARNER => Ok(Self::Learner),
            ROLE_CONTENT_MANAGER => Ok(Self::ContentManager),
            ROLE_ADMIN => Ok(Self::Admin),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    /// Convert to the backend string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learner => ROLE_LEARNER,
            Self::ContentManager => ROLE_CONTENT_MANAGER,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// Landing page after a successful login for this role.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin-dashboard",
            Self::ContentManager => "/content-manager-dashboard",
            Self::Learner => "/dashboard",
        }
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A platform user as returned by `/auth/profile/` and the admin user
/// endpoints. Profile fields the client never computes with stay
/// optional so partial admin payloads still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub is_verified: bool,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

impl User {
    /// Display name shown in headers and certificate rendering.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
