//! SurrealDB implementation of [`BusinessRepository`].
//!
//! Registration (business + first admin user) and deletion (business +
//! everything it owns) are the two multi-record operations in the
//! system; both run as a single SurrealDB transaction so partial state
//! can never persist.

use chrono::{DateTime, Utc};
use curio_core::error::CurioResult;
use curio_core::models::business::{Business, CreateBusiness};
use curio_core::models::role::RoleName;
use curio_core::models::user::{CreateUser, User};
use curio_core::repository::BusinessRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, classify_index_error};
use crate::repository::user::hash_password;

#[derive(Debug, SurrealValue)]
struct BusinessRow {
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BusinessRow {
    fn into_business(self, id: Uuid) -> Business {
        Business {
            id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, SurrealValue)]
struct OwnerRow {
    business_id: Option<String>,
    username: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    role: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// SurrealDB implementation of the Business repository.
#[derive(Clone)]
pub struct SurrealBusinessRepository<C: Connection> {
    db: Surreal<C>,
    /// Optional server-side pepper for password hashing.
    pepper: Option<String>,
}

impl<C: Connection> SurrealBusinessRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }
}

impl<C: Connection> BusinessRepository for SurrealBusinessRepository<C> {
    async fn create_with_owner(
        &self,
        business: CreateBusiness,
        owner: CreateUser,
    ) -> CurioResult<(Business, User)> {
        let business_id = Uuid::new_v4();
        let business_id_str = business_id.to_string();
        let user_id = Uuid::new_v4();
        let user_id_str = user_id.to_string();

        let password_hash = hash_password(&owner.password, self.pepper.as_deref())?;

        // One transaction: if the user creation fails (e.g. the unique
        // username index rejects it), the business is rolled back too.
        // The owner is always a member of the new business with the
        // admin role, whatever the input said.
        let result = self
            .db
            .query(
                "BEGIN TRANSACTION; \
                 CREATE type::record('business', $business_id) SET \
                 name = $business_name, description = $business_description; \
                 CREATE type::record('user', $user_id) SET \
                 business_id = $business_id, \
                 username = $username, email = $email, \
                 password_hash = $password_hash, \
                 first_name = $first_name, last_name = $last_name, \
                 role = 'admin'; \
                 COMMIT TRANSACTION;",
            )
            .bind(("business_id", business_id_str.clone()))
            .bind(("business_name", business.name))
            .bind(("business_description", business.description.unwrap_or_default()))
            .bind(("user_id", user_id_str.clone()))
            .bind(("username", owner.username))
            .bind(("email", owner.email))
            .bind(("password_hash", password_hash))
            .bind(("first_name", owner.first_name))
            .bind(("last_name", owner.last_name))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| classify_index_error(e, "idx_user_username", "user"))?;

        // Statement 0 is the business CREATE, statement 1 the user CREATE.
        let business_rows: Vec<BusinessRow> = result.take(0).map_err(DbError::from)?;
        let business_row = business_rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                entity: "business".into(),
                id: business_id_str,
            })?;

        let owner_rows: Vec<OwnerRow> = result.take(1).map_err(DbError::from)?;
        let owner_row = owner_rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                entity: "user".into(),
                id: user_id_str,
            })?;

        let user = User {
            id: user_id,
            business_id: Some(business_id),
            username: owner_row.username,
            email: owner_row.email,
            password_hash: owner_row.password_hash,
            first_name: owner_row.first_name,
            last_name: owner_row.last_name,
            role: owner_row.role.as_deref().and_then(RoleName::parse),
            created_at: owner_row.created_at,
            updated_at: owner_row.updated_at,
        };

        Ok((business_row.into_business(business_id), user))
    }

    async fn get_by_id(&self, id: Uuid) -> CurioResult<Business> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('business', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BusinessRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "business".into(),
            id: id_str,
        })?;

        Ok(row.into_business(id))
    }

    async fn delete(&self, id: Uuid) -> CurioResult<()> {
        let id_str = id.to_string();

        // Ownership cascade: users and products go with the business,
        // all in one transaction.
        let mut result = self
            .db
            .query(
                "BEGIN TRANSACTION; \
                 DELETE product WHERE business_id = $id; \
                 DELETE user WHERE business_id = $id; \
                 DELETE type::record('business', $id) RETURN BEFORE; \
                 COMMIT TRANSACTION;",
            )
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BusinessRow> = result.take(2).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "business".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }
}
