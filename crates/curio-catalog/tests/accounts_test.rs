//! End-to-end account tests: registration, the role list, and
//! tenant-scoped user administration.

use curio_catalog::{AccountService, CreateUserInput, RegisterInput};
use curio_core::error::CurioError;
use curio_core::models::role::RoleName;
use curio_core::models::user::UpdateUser;
use curio_db::repository::{
    SurrealBusinessRepository, SurrealRoleRepository, SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

type Db = surrealdb::engine::local::Db;

async fn setup() -> AccountService<
    SurrealBusinessRepository<Db>,
    SurrealUserRepository<Db>,
    SurrealRoleRepository<Db>,
> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    curio_db::run_migrations(&db).await.unwrap();

    AccountService::new(
        SurrealBusinessRepository::new(db.clone()),
        SurrealUserRepository::new(db.clone()),
        SurrealRoleRepository::new(db),
    )
}

fn register_input(business: &str, username: &str) -> RegisterInput {
    RegisterInput {
        business_name: business.into(),
        business_description: Some("desc".into()),
        username: username.into(),
        email: format!("{username}@example.com"),
        password: "password123".into(),
        first_name: Some("First".into()),
        last_name: Some("Last".into()),
    }
}

#[tokio::test]
async fn register_provisions_admin_user() {
    let accounts = setup().await;

    let user = accounts
        .register(register_input("Acme Corp", "acme_admin"))
        .await
        .unwrap();

    assert_eq!(user.username, "acme_admin");
    assert_eq!(user.role, Some(RoleName::Admin));
    assert!(user.business_id.is_some());
}

#[tokio::test]
async fn register_rejects_short_password() {
    let accounts = setup().await;

    let mut input = register_input("Acme Corp", "acme_admin");
    input.password = "12345".into();
    let err = accounts.register(input).await.unwrap_err();
    assert!(matches!(err, CurioError::Validation { .. }));
}

#[tokio::test]
async fn register_rejects_taken_username() {
    let accounts = setup().await;

    accounts
        .register(register_input("Acme Corp", "shared_name"))
        .await
        .unwrap();

    // Username uniqueness is global, across businesses.
    let err = accounts
        .register(register_input("Globex Inc", "shared_name"))
        .await
        .unwrap_err();
    assert!(matches!(err, CurioError::Validation { .. }));
}

#[tokio::test]
async fn roles_are_the_fixed_four() {
    let accounts = setup().await;

    let roles = accounts.list_roles().await.unwrap();
    let mut names: Vec<_> = roles.iter().map(|r| r.name).collect();
    names.sort_by_key(|n| n.as_str());
    assert_eq!(
        names,
        vec![
            RoleName::Admin,
            RoleName::Approver,
            RoleName::Editor,
            RoleName::Viewer,
        ]
    );
    assert!(roles.iter().all(|r| !r.description.is_empty()));
}

#[tokio::test]
async fn only_admins_administer_users() {
    let accounts = setup().await;

    let admin = accounts
        .register(register_input("Acme Corp", "acme_admin"))
        .await
        .unwrap();
    let editor = accounts
        .create_user(
            &admin,
            CreateUserInput {
                username: "acme_editor".into(),
                email: "editor@example.com".into(),
                password: "password123".into(),
                first_name: None,
                last_name: None,
                role: Some(RoleName::Editor),
            },
        )
        .await
        .unwrap();

    let err = accounts.list_users(&editor).await.unwrap_err();
    assert!(matches!(err, CurioError::Forbidden { .. }));

    let err = accounts
        .create_user(
            &editor,
            CreateUserInput {
                username: "sneaky".into(),
                email: "sneaky@example.com".into(),
                password: "password123".into(),
                first_name: None,
                last_name: None,
                role: Some(RoleName::Admin),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CurioError::Forbidden { .. }));

    let users = accounts.list_users(&admin).await.unwrap();
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn user_administration_is_tenant_scoped() {
    let accounts = setup().await;

    let acme_admin = accounts
        .register(register_input("Acme Corp", "acme_admin"))
        .await
        .unwrap();
    let globex_admin = accounts
        .register(register_input("Globex Inc", "globex_admin"))
        .await
        .unwrap();

    let acme_editor = accounts
        .create_user(
            &acme_admin,
            CreateUserInput {
                username: "acme_editor".into(),
                email: "editor@acme.example".into(),
                password: "password123".into(),
                first_name: None,
                last_name: None,
                role: Some(RoleName::Editor),
            },
        )
        .await
        .unwrap();

    // A foreign admin sees nothing of Acme's users, and cannot touch
    // them; absent and cross-tenant are the same NotFound.
    let globex_users = accounts.list_users(&globex_admin).await.unwrap();
    assert_eq!(globex_users.len(), 1);

    let err = accounts
        .get_user(&globex_admin, acme_editor.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CurioError::NotFound { .. }));

    let err = accounts
        .update_user(
            &globex_admin,
            acme_editor.id,
            UpdateUser {
                role: Some(Some(RoleName::Admin)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CurioError::NotFound { .. }));

    let err = accounts
        .delete_user(&globex_admin, acme_editor.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CurioError::NotFound { .. }));
}

#[tokio::test]
async fn created_users_belong_to_the_actors_business() {
    let accounts = setup().await;

    let admin = accounts
        .register(register_input("Acme Corp", "acme_admin"))
        .await
        .unwrap();

    // The payload has no business field at all; membership is stamped
    // from the actor.
    let member = accounts
        .create_user(
            &admin,
            CreateUserInput {
                username: "member".into(),
                email: "member@example.com".into(),
                password: "password123".into(),
                first_name: None,
                last_name: None,
                role: Some(RoleName::Viewer),
            },
        )
        .await
        .unwrap();

    assert_eq!(member.business_id, admin.business_id);
}

#[tokio::test]
async fn admins_cannot_delete_themselves() {
    let accounts = setup().await;

    let admin = accounts
        .register(register_input("Acme Corp", "acme_admin"))
        .await
        .unwrap();

    let err = accounts.delete_user(&admin, admin.id).await.unwrap_err();
    assert!(matches!(err, CurioError::Forbidden { .. }));

    // Deleting another member works.
    let member = accounts
        .create_user(
            &admin,
            CreateUserInput {
                username: "member".into(),
                email: "member@example.com".into(),
                password: "password123".into(),
                first_name: None,
                last_name: None,
                role: None,
            },
        )
        .await
        .unwrap();
    accounts.delete_user(&admin, member.id).await.unwrap();

    let remaining = accounts.list_users(&admin).await.unwrap();
    assert_eq!(remaining.len(), 1);
}
