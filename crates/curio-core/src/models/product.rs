//! Product domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product lifecycle status. The lowercase snake_case names are a
/// persisted contract; no other value is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Draft,
    PendingApproval,
    Approved,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::PendingApproval => "pending_approval",
            ProductStatus::Approved => "approved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ProductStatus::Draft),
            "pending_approval" => Some(ProductStatus::PendingApproval),
            "approved" => Some(ProductStatus::Approved),
            _ => None,
        }
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub business_id: Uuid,
    /// Authoring user. Set once at creation, never reassigned.
    pub created_by: Uuid,
    pub name: String,
    pub description: String,
    /// Fixed-point price, two decimal places.
    pub price: Decimal,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation input. `business_id` and `created_by` are stamped from the
/// acting user's context by the service layer, never from request input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    pub business_id: Uuid,
    pub created_by: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// Fields that can be updated through the generic path.
///
/// `business_id`, `created_by` and `status` are deliberately absent:
/// ownership is immutable and status only changes via lifecycle
/// transitions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

/// Public catalog read model: what an unauthenticated browser sees.
/// Only approved products ever take this shape, and it carries no
/// creator identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicProduct {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub business_name: String,
    pub created_at: DateTime<Utc>,
}
