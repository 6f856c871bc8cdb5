//! SurrealDB implementation of [`ProductRepository`].
//!
//! Lifecycle transitions are a single conditional UPDATE: the status
//! column is written only where the row still holds the transition's
//! required source status. Two concurrent transition calls therefore
//! resolve to exactly one winner; there is no read-then-write window.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use curio_core::error::CurioResult;
use curio_core::lifecycle::{Transition, check_transition};
use curio_core::models::product::{
    CreateProduct, Product, ProductStatus, PublicProduct, UpdateProduct,
};
use curio_core::repository::ProductRepository;
use rust_decimal::Decimal;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, is_retryable_conflict};

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ProductRow {
    business_id: String,
    created_by: String,
    name: String,
    description: String,
    price: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ProductRowWithId {
    record_id: String,
    business_id: String,
    created_by: String,
    name: String,
    description: String,
    price: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct BusinessNameRow {
    record_id: String,
    name: String,
}

fn parse_price(s: &str) -> Result<Decimal, DbError> {
    Decimal::from_str(s).map_err(|e| DbError::Decode(format!("invalid price: {e}")))
}

fn parse_status(s: &str) -> Result<ProductStatus, DbError> {
    ProductStatus::parse(s).ok_or_else(|| DbError::Decode(format!("unknown product status: {s}")))
}

impl ProductRow {
    fn into_product(self, id: Uuid) -> Result<Product, DbError> {
        let business_id = Uuid::parse_str(&self.business_id)
            .map_err(|e| DbError::Decode(format!("invalid business UUID: {e}")))?;
        let created_by = Uuid::parse_str(&self.created_by)
            .map_err(|e| DbError::Decode(format!("invalid creator UUID: {e}")))?;
        Ok(Product {
            id,
            business_id,
            created_by,
            name: self.name,
            description: self.description,
            price: parse_price(&self.price)?,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ProductRowWithId {
    fn try_into_product(self) -> Result<Product, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let row = ProductRow {
            business_id: self.business_id,
            created_by: self.created_by,
            name: self.name,
            description: self.description,
            price: self.price,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.into_product(id)
    }
}

/// SurrealDB implementation of the Product repository.
#[derive(Clone)]
pub struct SurrealProductRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProductRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ProductRepository for SurrealProductRepository<C> {
    async fn create(&self, input: CreateProduct) -> CurioResult<Product> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('product', $id) SET \
                 business_id = $business_id, \
                 created_by = $created_by, \
                 name = $name, description = $description, \
                 price = $price, \
                 status = 'draft'",
            )
            .bind(("id", id_str.clone()))
            .bind(("business_id", input.business_id.to_string()))
            .bind(("created_by", input.created_by.to_string()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("price", input.price.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id)?)
    }

    async fn get_by_id(&self, business_id: Uuid, id: Uuid) -> CurioResult<Product> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('product', $id) \
                 WHERE business_id = $business_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("business_id", business_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id)?)
    }

    async fn list(&self, business_id: Uuid) -> CurioResult<Vec<Product>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM product \
                 WHERE business_id = $business_id \
                 ORDER BY created_at DESC",
            )
            .bind(("business_id", business_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_product())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }

    async fn list_public(&self) -> CurioResult<Vec<PublicProduct>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM product \
                 WHERE status = 'approved' \
                 ORDER BY created_at DESC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRowWithId> = result.take(0).map_err(DbError::from)?;
        let products = rows
            .into_iter()
            .map(|row| row.try_into_product())
            .collect::<Result<Vec<_>, DbError>>()?;

        if products.is_empty() {
            return Ok(Vec::new());
        }

        // Resolve business names in one batch query.
        let mut ids: Vec<String> = products
            .iter()
            .map(|p| p.business_id.to_string())
            .collect();
        ids.sort();
        ids.dedup();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, name FROM business \
                 WHERE meta::id(id) IN $ids",
            )
            .bind(("ids", ids))
            .await
            .map_err(DbError::from)?;

        let name_rows: Vec<BusinessNameRow> = result.take(0).map_err(DbError::from)?;
        let names: HashMap<String, String> = name_rows
            .into_iter()
            .map(|row| (row.record_id, row.name))
            .collect();

        let items = products
            .into_iter()
            .map(|p| {
                let business_name = names
                    .get(&p.business_id.to_string())
                    .cloned()
                    .ok_or_else(|| {
                        DbError::Decode(format!(
                            "product {} references missing business {}",
                            p.id, p.business_id
                        ))
                    })?;
                Ok(PublicProduct {
                    id: p.id,
                    name: p.name,
                    description: p.description,
                    price: p.price,
                    business_name,
                    created_at: p.created_at,
                })
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }

    async fn update(
        &self,
        business_id: Uuid,
        id: Uuid,
        input: UpdateProduct,
    ) -> CurioResult<Product> {
        let id_str = id.to_string();

        // `business_id`, `created_by` and `status` never appear here:
        // the update type has no such fields, so the generic path cannot
        // touch them.
        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.price.is_some() {
            sets.push("price = $price");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('product', $id) SET {} \
             WHERE business_id = $business_id",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("business_id", business_id.to_string()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(price) = input.price {
            builder = builder.bind(("price", price.to_string()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id)?)
    }

    async fn delete(&self, business_id: Uuid, id: Uuid) -> CurioResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "DELETE type::record('product', $id) \
                 WHERE business_id = $business_id RETURN BEFORE",
            )
            .bind(("id", id_str.clone()))
            .bind(("business_id", business_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "product".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn transition(&self, business_id: Uuid, id: Uuid, op: Transition) -> CurioResult<Product> {
        let id_str = id.to_string();
        let from = op.from_status();
        let to = op.to_status();

        loop {
            // The whole guard is this one statement: only a row that
            // still holds the source status (and belongs to the caller's
            // business) is written.
            let mut result = self
                .db
                .query(
                    "UPDATE type::record('product', $id) SET \
                     status = $to, updated_at = time::now() \
                     WHERE business_id = $business_id AND status = $from",
                )
                .bind(("id", id_str.clone()))
                .bind(("business_id", business_id.to_string()))
                .bind(("from", from.as_str().to_string()))
                .bind(("to", to.as_str().to_string()))
                .await
                .map_err(DbError::from)?;

            let rows: Vec<ProductRow> = match result.take(0) {
                Ok(rows) => rows,
                // A concurrent writer can make the commit conflict; the
                // statement is safe to reissue, and the re-check below
                // decides the outcome.
                Err(e) if is_retryable_conflict(&e) => {
                    let current = self.get_by_id(business_id, id).await?;
                    check_transition(current.status, op)?;
                    continue;
                }
                Err(e) => return Err(DbError::from(e).into()),
            };
            if let Some(row) = rows.into_iter().next() {
                return Ok(row.into_product(id)?);
            }

            // Nothing was written. Re-read (scoped to the business, so a
            // cross-tenant miss stays a plain NotFound) purely to label
            // the failure; this read never influences state.
            let current = self.get_by_id(business_id, id).await?;
            check_transition(current.status, op)?;

            // The status matched the source again by the time we
            // re-read: a concurrent transition won and was undone (e.g.
            // submit → reject). Take another shot at the conditional
            // update.
        }
    }
}
