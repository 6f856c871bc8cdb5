//! Curio authentication — password verification, JWT access tokens,
//! and the login service.
//!
//! Generic over the `curio-core` repository traits so this crate has no
//! dependency on the database crate. Tokens are stateless: there is no
//! session store, and authorization decisions are never derived from
//! token contents alone; the server reloads the user row per request.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginInput, LoginOutput};
