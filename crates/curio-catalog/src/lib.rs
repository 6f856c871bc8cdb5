//! Curio catalog — the workflow services of the system.
//!
//! [`AccountService`] handles registration and user administration;
//! [`CatalogService`] handles the product lifecycle. Both are generic
//! over the `curio-core` repository traits: every operation takes the
//! acting user explicitly (no ambient request state), checks the
//! authorization policy, and then calls the repository with the actor's
//! own business as the tenant scope.

pub mod accounts;
pub mod products;

pub use accounts::{AccountService, CreateUserInput, RegisterInput};
pub use products::CatalogService;
