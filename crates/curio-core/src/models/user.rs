//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::RoleName;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// `None` only transiently; registration always provisions a business.
    pub business_id: Option<Uuid>,
    /// Globally unique login identifier.
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Absence means no elevated capability.
    pub role: Option<RoleName>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub business_id: Option<Uuid>,
    pub username: String,
    pub email: String,
    /// Raw password (hashed with Argon2id before storage).
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<RoleName>,
}

/// Fields that can be updated through the generic admin path.
///
/// `business_id` and `password_hash` are deliberately absent: tenant
/// membership is immutable and credentials never travel this path.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `Some(Some(role))` = assign, `Some(None)` = clear, `None` = no change.
    pub role: Option<Option<RoleName>>,
}
