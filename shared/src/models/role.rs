//! User Role Model

use serde::{Deserialize, Serialize};

/// Role carried by the session-check response.
///
/// The service serializes Java enum names (`ROLE_USER` / `ROLE_ADMIN`); the
/// bare spellings are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER", alias = "USER")]
    User,
    #[serde(rename = "ROLE_ADMIN", alias = "ADMIN")]
    Admin,
}

impl Role {
    /// Whether this role passes the admin-only page layer.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}
