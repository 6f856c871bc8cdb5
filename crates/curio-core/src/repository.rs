//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped repositories take a
//! `business_id` parameter on every read and write so that isolation is
//! enforced by query filtering, not by post-hoc checks. A lookup that
//! misses, because the record is absent or because it belongs to
//! another business, reports `NotFound` either way; existence must not
//! leak across tenants.

use uuid::Uuid;

use crate::error::CurioResult;
use crate::lifecycle::Transition;
use crate::models::{
    business::{Business, CreateBusiness},
    product::{CreateProduct, Product, PublicProduct, UpdateProduct},
    role::Role,
    user::{CreateUser, UpdateUser, User},
};

pub trait BusinessRepository: Send + Sync {
    /// Create a business together with its first admin user, atomically:
    /// either both records exist afterwards or neither does. The owner's
    /// `business_id` and `role` are stamped by the implementation
    /// (membership in the new business, admin role) regardless of input.
    fn create_with_owner(
        &self,
        business: CreateBusiness,
        owner: CreateUser,
    ) -> impl Future<Output = CurioResult<(Business, User)>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CurioResult<Business>> + Send;

    /// Delete a business and everything it owns (users, products) in one
    /// transaction.
    fn delete(&self, id: Uuid) -> impl Future<Output = CurioResult<()>> + Send;
}

pub trait RoleRepository: Send + Sync {
    /// The global role reference rows (admin/editor/approver/viewer).
    fn list(&self) -> impl Future<Output = CurioResult<Vec<Role>>> + Send;
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = CurioResult<User>> + Send;

    fn get_by_id(
        &self,
        business_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = CurioResult<User>> + Send;

    /// Global lookup; usernames are unique across businesses. Used by
    /// the login path and the registration uniqueness probe.
    fn get_by_username(&self, username: &str) -> impl Future<Output = CurioResult<User>> + Send;

    fn update(
        &self,
        business_id: Uuid,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = CurioResult<User>> + Send;

    fn delete(&self, business_id: Uuid, id: Uuid) -> impl Future<Output = CurioResult<()>> + Send;

    fn list(&self, business_id: Uuid) -> impl Future<Output = CurioResult<Vec<User>>> + Send;
}

pub trait ProductRepository: Send + Sync {
    /// `input.business_id` and `input.created_by` come from the acting
    /// user's context (the service layer stamps them); status starts at
    /// `draft`.
    fn create(&self, input: CreateProduct) -> impl Future<Output = CurioResult<Product>> + Send;

    fn get_by_id(
        &self,
        business_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = CurioResult<Product>> + Send;

    fn list(&self, business_id: Uuid) -> impl Future<Output = CurioResult<Vec<Product>>> + Send;

    /// Approved products across all businesses, in the public read-model
    /// shape. The only unauthenticated query in the system.
    fn list_public(&self) -> impl Future<Output = CurioResult<Vec<PublicProduct>>> + Send;

    fn update(
        &self,
        business_id: Uuid,
        id: Uuid,
        input: UpdateProduct,
    ) -> impl Future<Output = CurioResult<Product>> + Send;

    fn delete(&self, business_id: Uuid, id: Uuid)
    -> impl Future<Output = CurioResult<()>> + Send;

    /// Apply a lifecycle transition as a single conditional update:
    /// `status` is set to the target value only where the row still holds
    /// the transition's required source status (and belongs to
    /// `business_id`). Implementations MUST NOT read-then-write in
    /// separate steps: two concurrent calls must resolve to exactly one
    /// winner. Failures are `NotFound` (absent or cross-tenant,
    /// indistinguishable) or `InvalidTransition` carrying the observed
    /// status.
    fn transition(
        &self,
        business_id: Uuid,
        id: Uuid,
        op: Transition,
    ) -> impl Future<Output = CurioResult<Product>> + Send;
}
