//! Registration and user administration.

use curio_core::error::{CurioError, CurioResult};
use curio_core::models::business::CreateBusiness;
use curio_core::models::role::{Role, RoleName};
use curio_core::models::user::{CreateUser, UpdateUser, User};
use curio_core::policy::{business_scope, require_administer_users};
use curio_core::repository::{BusinessRepository, RoleRepository, UserRepository};
use tracing::info;
use uuid::Uuid;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Input for self-service registration: a new business plus its first
/// admin user, created atomically.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub business_name: String,
    pub business_description: Option<String>,
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Input for an admin creating a user inside their own business.
///
/// Carries no business id; membership always comes from the actor.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<RoleName>,
}

fn validate_username(username: &str) -> CurioResult<()> {
    if username.trim().is_empty() {
        return Err(CurioError::Validation {
            message: "username must not be empty".into(),
        });
    }
    Ok(())
}

fn validate_email(email: &str) -> CurioResult<()> {
    if !email.contains('@') {
        return Err(CurioError::Validation {
            message: "email address is not valid".into(),
        });
    }
    Ok(())
}

fn validate_password(password: &str) -> CurioResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CurioError::Validation {
            message: format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
        });
    }
    Ok(())
}

/// Account service: registration, roles, and tenant-scoped user
/// administration.
pub struct AccountService<B, U, R>
where
    B: BusinessRepository,
    U: UserRepository,
    R: RoleRepository,
{
    business_repo: B,
    user_repo: U,
    role_repo: R,
}

impl<B, U, R> AccountService<B, U, R>
where
    B: BusinessRepository,
    U: UserRepository,
    R: RoleRepository,
{
    pub fn new(business_repo: B, user_repo: U, role_repo: R) -> Self {
        Self {
            business_repo,
            user_repo,
            role_repo,
        }
    }

    /// Register a new business with its first admin user.
    ///
    /// The uniqueness probe gives a clean validation error for the
    /// common case; a race past it still cannot produce an orphaned
    /// business because creation is one repository transaction and the
    /// unique username index fails it as a whole.
    pub async fn register(&self, input: RegisterInput) -> CurioResult<User> {
        validate_username(&input.username)?;
        validate_email(&input.email)?;
        validate_password(&input.password)?;
        if input.business_name.trim().is_empty() {
            return Err(CurioError::Validation {
                message: "business name must not be empty".into(),
            });
        }

        match self.user_repo.get_by_username(&input.username).await {
            Ok(_) => {
                return Err(CurioError::Validation {
                    message: "username already exists".into(),
                });
            }
            Err(CurioError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let (business, owner) = self
            .business_repo
            .create_with_owner(
                CreateBusiness {
                    name: input.business_name,
                    description: input.business_description,
                },
                CreateUser {
                    business_id: None,
                    username: input.username,
                    email: input.email,
                    password: input.password,
                    first_name: input.first_name.unwrap_or_default(),
                    last_name: input.last_name.unwrap_or_default(),
                    role: None,
                },
            )
            .await?;

        info!(business = %business.name, username = %owner.username, "registered new business");
        Ok(owner)
    }

    /// The global role reference list.
    pub async fn list_roles(&self) -> CurioResult<Vec<Role>> {
        self.role_repo.list().await
    }

    pub async fn list_users(&self, actor: &User) -> CurioResult<Vec<User>> {
        require_administer_users(actor)?;
        let scope = business_scope(actor)?;
        self.user_repo.list(scope).await
    }

    pub async fn get_user(&self, actor: &User, id: Uuid) -> CurioResult<User> {
        require_administer_users(actor)?;
        let scope = business_scope(actor)?;
        self.user_repo.get_by_id(scope, id).await
    }

    /// Create a user inside the actor's business. Membership is stamped
    /// from the actor, never from the payload.
    pub async fn create_user(&self, actor: &User, input: CreateUserInput) -> CurioResult<User> {
        require_administer_users(actor)?;
        let scope = business_scope(actor)?;

        validate_username(&input.username)?;
        validate_email(&input.email)?;
        validate_password(&input.password)?;

        self.user_repo
            .create(CreateUser {
                business_id: Some(scope),
                username: input.username,
                email: input.email,
                password: input.password,
                first_name: input.first_name.unwrap_or_default(),
                last_name: input.last_name.unwrap_or_default(),
                role: input.role,
            })
            .await
    }

    pub async fn update_user(
        &self,
        actor: &User,
        id: Uuid,
        input: UpdateUser,
    ) -> CurioResult<User> {
        require_administer_users(actor)?;
        let scope = business_scope(actor)?;

        if let Some(username) = &input.username {
            validate_username(username)?;
        }
        if let Some(email) = &input.email {
            validate_email(email)?;
        }

        self.user_repo.update(scope, id, input).await
    }

    pub async fn delete_user(&self, actor: &User, id: Uuid) -> CurioResult<()> {
        require_administer_users(actor)?;
        let scope = business_scope(actor)?;

        if id == actor.id {
            return Err(CurioError::Forbidden {
                reason: "you cannot delete your own account".into(),
            });
        }

        self.user_repo.delete(scope, id).await
    }
}
