//! Product catalog operations and lifecycle workflow.

use curio_core::error::{CurioError, CurioResult};
use curio_core::lifecycle::Transition;
use curio_core::models::product::{CreateProduct, Product, PublicProduct, UpdateProduct};
use curio_core::models::user::User;
use curio_core::policy::{business_scope, require_approve_products, require_manage_products};
use curio_core::repository::ProductRepository;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

fn validate_name(name: &str) -> CurioResult<()> {
    if name.trim().is_empty() {
        return Err(CurioError::Validation {
            message: "product name must not be empty".into(),
        });
    }
    Ok(())
}

/// Normalize a price to two decimal places, rejecting negatives.
fn validate_price(price: Decimal) -> CurioResult<Decimal> {
    if price.is_sign_negative() {
        return Err(CurioError::Validation {
            message: "price must not be negative".into(),
        });
    }
    Ok(price.round_dp(2))
}

/// Catalog service: product CRUD and the approval workflow.
pub struct CatalogService<P: ProductRepository> {
    product_repo: P,
}

impl<P: ProductRepository> CatalogService<P> {
    pub fn new(product_repo: P) -> Self {
        Self { product_repo }
    }

    /// The public storefront listing: approved products across all
    /// businesses. The only operation without an actor.
    pub async fn list_public_products(&self) -> CurioResult<Vec<PublicProduct>> {
        self.product_repo.list_public().await
    }

    /// All products of the actor's business, any role.
    pub async fn list_products(&self, actor: &User) -> CurioResult<Vec<Product>> {
        let scope = business_scope(actor)?;
        self.product_repo.list(scope).await
    }

    pub async fn get_product(&self, actor: &User, id: Uuid) -> CurioResult<Product> {
        let scope = business_scope(actor)?;
        self.product_repo.get_by_id(scope, id).await
    }

    /// Create a draft. Ownership comes from the actor: the payload
    /// cannot place a product under a foreign business or a different
    /// author.
    pub async fn create_product(
        &self,
        actor: &User,
        name: String,
        description: String,
        price: Decimal,
    ) -> CurioResult<Product> {
        require_manage_products(actor)?;
        let scope = business_scope(actor)?;
        validate_name(&name)?;
        let price = validate_price(price)?;

        self.product_repo
            .create(CreateProduct {
                business_id: scope,
                created_by: actor.id,
                name,
                description,
                price,
            })
            .await
    }

    pub async fn update_product(
        &self,
        actor: &User,
        id: Uuid,
        mut input: UpdateProduct,
    ) -> CurioResult<Product> {
        require_manage_products(actor)?;
        let scope = business_scope(actor)?;

        if let Some(name) = &input.name {
            validate_name(name)?;
        }
        if let Some(price) = input.price {
            input.price = Some(validate_price(price)?);
        }

        self.product_repo.update(scope, id, input).await
    }

    pub async fn delete_product(&self, actor: &User, id: Uuid) -> CurioResult<()> {
        require_manage_products(actor)?;
        let scope = business_scope(actor)?;
        self.product_repo.delete(scope, id).await
    }

    /// draft → pending_approval.
    pub async fn submit_product(&self, actor: &User, id: Uuid) -> CurioResult<Product> {
        require_manage_products(actor)?;
        self.transition(actor, id, Transition::Submit).await
    }

    /// pending_approval → approved.
    pub async fn approve_product(&self, actor: &User, id: Uuid) -> CurioResult<Product> {
        require_approve_products(actor)?;
        self.transition(actor, id, Transition::Approve).await
    }

    /// pending_approval → draft.
    pub async fn reject_product(&self, actor: &User, id: Uuid) -> CurioResult<Product> {
        require_approve_products(actor)?;
        self.transition(actor, id, Transition::Reject).await
    }

    async fn transition(&self, actor: &User, id: Uuid, op: Transition) -> CurioResult<Product> {
        let scope = business_scope(actor)?;
        let product = self.product_repo.transition(scope, id, op).await?;
        info!(product = %product.id, op = %op, status = %product.status, "product transition");
        Ok(product)
    }
}
