//! SurrealDB implementation of [`RoleRepository`].
//!
//! Roles are global reference data seeded by the initial migration;
//! this repository only reads them.

use curio_core::error::CurioResult;
use curio_core::models::role::{Role, RoleName};
use curio_core::repository::RoleRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct RoleRow {
    name: String,
    description: String,
}

impl RoleRow {
    fn try_into_role(self) -> Result<Role, DbError> {
        let name = RoleName::parse(&self.name)
            .ok_or_else(|| DbError::Decode(format!("unknown role name: {}", self.name)))?;
        Ok(Role {
            name,
            description: self.description,
        })
    }
}

/// SurrealDB implementation of the Role repository.
#[derive(Clone)]
pub struct SurrealRoleRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealRoleRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> RoleRepository for SurrealRoleRepository<C> {
    async fn list(&self) -> CurioResult<Vec<Role>> {
        let mut result = self
            .db
            .query("SELECT name, description FROM role ORDER BY name ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoleRow> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_role())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
