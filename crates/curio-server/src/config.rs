//! Server configuration, loaded from environment variables.

use std::env;

use curio_auth::AuthConfig;
use curio_db::DbConfig;

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    /// Read configuration from the environment. The JWT key pair is the
    /// only setting without a default; the server refuses to start
    /// without it.
    pub fn from_env() -> Result<Self, String> {
        let jwt_private_key_pem = env::var("CURIO_JWT_PRIVATE_KEY_PEM")
            .map_err(|_| "CURIO_JWT_PRIVATE_KEY_PEM is not set".to_string())?;
        let jwt_public_key_pem = env::var("CURIO_JWT_PUBLIC_KEY_PEM")
            .map_err(|_| "CURIO_JWT_PUBLIC_KEY_PEM is not set".to_string())?;

        let access_token_lifetime_secs = var_or("CURIO_TOKEN_LIFETIME_SECS", "900")
            .parse::<u64>()
            .map_err(|e| format!("CURIO_TOKEN_LIFETIME_SECS: {e}"))?;

        let db_defaults = DbConfig::default();

        Ok(Self {
            bind_addr: var_or("CURIO_BIND_ADDR", "0.0.0.0:3000"),
            db: DbConfig {
                url: var_or("CURIO_DB_URL", &db_defaults.url),
                namespace: var_or("CURIO_DB_NAMESPACE", &db_defaults.namespace),
                database: var_or("CURIO_DB_DATABASE", &db_defaults.database),
                username: var_or("CURIO_DB_USERNAME", &db_defaults.username),
                password: var_or("CURIO_DB_PASSWORD", &db_defaults.password),
            },
            auth: AuthConfig {
                jwt_private_key_pem,
                jwt_public_key_pem,
                access_token_lifetime_secs,
                jwt_issuer: var_or("CURIO_JWT_ISSUER", "curio"),
                pepper: env::var("CURIO_PASSWORD_PEPPER").ok(),
            },
        })
    }
}
