//! Shared application state for the HTTP layer.

use std::sync::Arc;

use curio_auth::{AuthConfig, AuthService};
use curio_catalog::{AccountService, CatalogService};
use curio_db::DbManager;
use curio_db::repository::{
    SurrealBusinessRepository, SurrealProductRepository, SurrealRoleRepository,
    SurrealUserRepository,
};
use surrealdb::engine::remote::ws::Client;

pub type Accounts = AccountService<
    SurrealBusinessRepository<Client>,
    SurrealUserRepository<Client>,
    SurrealRoleRepository<Client>,
>;
pub type Catalog = CatalogService<SurrealProductRepository<Client>>;
pub type Auth = AuthService<SurrealUserRepository<Client>>;

#[derive(Clone)]
pub struct AppState {
    pub auth_config: AuthConfig,
    /// Used by the request extractor to reload the acting user.
    pub user_repo: SurrealUserRepository<Client>,
    pub auth: Arc<Auth>,
    pub accounts: Arc<Accounts>,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(manager: &DbManager, auth_config: AuthConfig) -> Self {
        let db = manager.db();

        let user_repo = match &auth_config.pepper {
            Some(pepper) => SurrealUserRepository::with_pepper(db.clone(), pepper.clone()),
            None => SurrealUserRepository::new(db.clone()),
        };
        let business_repo = match &auth_config.pepper {
            Some(pepper) => SurrealBusinessRepository::with_pepper(db.clone(), pepper.clone()),
            None => SurrealBusinessRepository::new(db.clone()),
        };

        Self {
            auth_config: auth_config.clone(),
            user_repo: user_repo.clone(),
            auth: Arc::new(AuthService::new(user_repo.clone(), auth_config)),
            accounts: Arc::new(AccountService::new(
                business_repo,
                user_repo,
                SurrealRoleRepository::new(db.clone()),
            )),
            catalog: Arc::new(CatalogService::new(SurrealProductRepository::new(db))),
        }
    }
}
