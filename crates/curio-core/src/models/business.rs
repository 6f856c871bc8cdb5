//! Business domain model.
//!
//! A business is the tenant boundary: every user and product belongs to
//! exactly one. Deleting a business removes its users and products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBusiness {
    pub name: String,
    pub description: Option<String>,
}
