//! SurrealDB repository implementations.

mod business;
mod product;
mod role;
mod user;

pub use business::SurrealBusinessRepository;
pub use product::SurrealProductRepository;
pub use role::SurrealRoleRepository;
pub use user::SurrealUserRepository;
