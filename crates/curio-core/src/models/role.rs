//! Role domain model.
//!
//! Roles are global reference data, not tenant-scoped: the same four
//! capability bundles are shared by every business. The lowercase names
//! are a persisted contract.

use serde::{Deserialize, Serialize};

/// The fixed role enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Admin,
    Editor,
    Approver,
    Viewer,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "admin",
            RoleName::Editor => "editor",
            RoleName::Approver => "approver",
            RoleName::Viewer => "viewer",
        }
    }

    /// Parse a stored role name. Unknown names yield `None`, which the
    /// capability layer treats as "no capabilities" rather than an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(RoleName::Admin),
            "editor" => Some(RoleName::Editor),
            "approver" => Some(RoleName::Approver),
            "viewer" => Some(RoleName::Viewer),
            _ => None,
        }
    }
}

impl core::fmt::Display for RoleName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role reference row: name plus a human-readable description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub name: RoleName,
    pub description: String,
}
