//! Product lifecycle state machine.
//!
//! `draft` is the initial state, `approved` the terminal one. Rejection
//! returns a product to `draft` rather than parking it in a separate
//! archival state, so there is exactly one re-editable failure state.
//!
//! The table here is pure data. Enforcement against the store happens in
//! the repository layer as a single conditional update, with this module
//! supplying the required `from`/`to` pair; see
//! `ProductRepository::transition`.

use serde::{Deserialize, Serialize};

use crate::error::{CurioError, CurioResult};
use crate::models::product::ProductStatus;

/// A guarded lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Submit,
    Approve,
    Reject,
}

impl Transition {
    /// The status a product must currently hold for this operation.
    pub fn from_status(&self) -> ProductStatus {
        match self {
            Transition::Submit => ProductStatus::Draft,
            Transition::Approve | Transition::Reject => ProductStatus::PendingApproval,
        }
    }

    /// The status this operation moves a product to.
    pub fn to_status(&self) -> ProductStatus {
        match self {
            Transition::Submit => ProductStatus::PendingApproval,
            Transition::Approve => ProductStatus::Approved,
            Transition::Reject => ProductStatus::Draft,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Submit => "submit",
            Transition::Approve => "approve",
            Transition::Reject => "reject",
        }
    }
}

impl core::fmt::Display for Transition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate an operation against an observed status, returning the
/// target status on success. Pure; never touches storage.
pub fn check_transition(current: ProductStatus, op: Transition) -> CurioResult<ProductStatus> {
    if current == op.from_status() {
        Ok(op.to_status())
    } else {
        Err(CurioError::InvalidTransition {
            current,
            attempted: op,
        })
    }
}
