//! Integration tests for the Product repository using in-memory
//! SurrealDB: lifecycle transitions, tenant scoping, and the
//! conditional-update race guarantee.

use curio_core::error::CurioError;
use curio_core::lifecycle::Transition;
use curio_core::models::business::CreateBusiness;
use curio_core::models::product::{CreateProduct, ProductStatus, UpdateProduct};
use curio_core::models::user::CreateUser;
use curio_core::repository::{BusinessRepository, ProductRepository};
use curio_db::repository::{SurrealBusinessRepository, SurrealProductRepository};
use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

struct Fixture {
    db: Surreal<surrealdb::engine::local::Db>,
    business_id: Uuid,
    creator_id: Uuid,
    other_business_id: Uuid,
}

/// Spin up in-memory DB, run migrations, provision two businesses.
async fn setup() -> Fixture {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    curio_db::run_migrations(&db).await.unwrap();

    let business_repo = SurrealBusinessRepository::new(db.clone());
    let (acme, acme_owner) = business_repo
        .create_with_owner(
            CreateBusiness {
                name: "Acme Corp".into(),
                description: None,
            },
            CreateUser {
                business_id: None,
                username: "acme_admin".into(),
                email: "admin@acme.example".into(),
                password: "password123".into(),
                first_name: String::new(),
                last_name: String::new(),
                role: None,
            },
        )
        .await
        .unwrap();
    let (globex, _) = business_repo
        .create_with_owner(
            CreateBusiness {
                name: "Globex Inc".into(),
                description: None,
            },
            CreateUser {
                business_id: None,
                username: "globex_admin".into(),
                email: "admin@globex.example".into(),
                password: "password123".into(),
                first_name: String::new(),
                last_name: String::new(),
                role: None,
            },
        )
        .await
        .unwrap();

    Fixture {
        db,
        business_id: acme.id,
        creator_id: acme_owner.id,
        other_business_id: globex.id,
    }
}

fn widget(fixture: &Fixture) -> CreateProduct {
    CreateProduct {
        business_id: fixture.business_id,
        created_by: fixture.creator_id,
        name: "Widget".into(),
        description: "A high-quality widget".into(),
        price: Decimal::new(2999, 2),
    }
}

#[tokio::test]
async fn create_starts_in_draft() {
    let fixture = setup().await;
    let repo = SurrealProductRepository::new(fixture.db.clone());

    let product = repo.create(widget(&fixture)).await.unwrap();
    assert_eq!(product.status, ProductStatus::Draft);
    assert_eq!(product.business_id, fixture.business_id);
    assert_eq!(product.created_by, fixture.creator_id);
    assert_eq!(product.price, Decimal::new(2999, 2));

    let fetched = repo
        .get_by_id(fixture.business_id, product.id)
        .await
        .unwrap();
    assert_eq!(fetched.status, ProductStatus::Draft);
    assert_eq!(fetched.price, product.price);
}

#[tokio::test]
async fn update_touches_only_payload_fields() {
    let fixture = setup().await;
    let repo = SurrealProductRepository::new(fixture.db.clone());

    let product = repo.create(widget(&fixture)).await.unwrap();

    let updated = repo
        .update(
            fixture.business_id,
            product.id,
            UpdateProduct {
                name: Some("Widget Pro".into()),
                price: Some(Decimal::new(3999, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Widget Pro");
    assert_eq!(updated.price, Decimal::new(3999, 2));
    assert_eq!(updated.description, product.description);
    // Immutable columns are untouched by construction.
    assert_eq!(updated.status, ProductStatus::Draft);
    assert_eq!(updated.business_id, product.business_id);
    assert_eq!(updated.created_by, product.created_by);
}

#[tokio::test]
async fn cross_tenant_access_is_not_found() {
    let fixture = setup().await;
    let repo = SurrealProductRepository::new(fixture.db.clone());

    let product = repo.create(widget(&fixture)).await.unwrap();
    let foreign = fixture.other_business_id;

    let err = repo.get_by_id(foreign, product.id).await.unwrap_err();
    assert!(matches!(err, CurioError::NotFound { .. }));

    let err = repo
        .update(
            foreign,
            product.id,
            UpdateProduct {
                name: Some("Stolen".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CurioError::NotFound { .. }));

    let err = repo.delete(foreign, product.id).await.unwrap_err();
    assert!(matches!(err, CurioError::NotFound { .. }));

    // Transitions leak nothing either: NotFound, never a status hint.
    let err = repo
        .transition(foreign, product.id, Transition::Submit)
        .await
        .unwrap_err();
    assert!(matches!(err, CurioError::NotFound { .. }));

    // And the row is exactly as it was.
    let unchanged = repo
        .get_by_id(fixture.business_id, product.id)
        .await
        .unwrap();
    assert_eq!(unchanged.name, "Widget");
    assert_eq!(unchanged.status, ProductStatus::Draft);
}

#[tokio::test]
async fn full_lifecycle_submit_approve() {
    let fixture = setup().await;
    let repo = SurrealProductRepository::new(fixture.db.clone());

    let product = repo.create(widget(&fixture)).await.unwrap();

    let pending = repo
        .transition(fixture.business_id, product.id, Transition::Submit)
        .await
        .unwrap();
    assert_eq!(pending.status, ProductStatus::PendingApproval);

    let approved = repo
        .transition(fixture.business_id, product.id, Transition::Approve)
        .await
        .unwrap();
    assert_eq!(approved.status, ProductStatus::Approved);
}

#[tokio::test]
async fn reject_returns_to_draft() {
    let fixture = setup().await;
    let repo = SurrealProductRepository::new(fixture.db.clone());

    let product = repo.create(widget(&fixture)).await.unwrap();
    repo.transition(fixture.business_id, product.id, Transition::Submit)
        .await
        .unwrap();
    let rejected = repo
        .transition(fixture.business_id, product.id, Transition::Reject)
        .await
        .unwrap();

    assert_eq!(rejected.status, ProductStatus::Draft);
    // Indistinguishable from a never-submitted draft apart from timestamps.
    assert_eq!(rejected.name, product.name);
    assert_eq!(rejected.description, product.description);
    assert_eq!(rejected.price, product.price);
    assert_eq!(rejected.created_by, product.created_by);

    // And it can go around again.
    let pending = repo
        .transition(fixture.business_id, product.id, Transition::Submit)
        .await
        .unwrap();
    assert_eq!(pending.status, ProductStatus::PendingApproval);
}

#[tokio::test]
async fn wrong_state_is_invalid_transition_with_no_write() {
    let fixture = setup().await;
    let repo = SurrealProductRepository::new(fixture.db.clone());

    let product = repo.create(widget(&fixture)).await.unwrap();

    // approve/reject require pending_approval.
    for op in [Transition::Approve, Transition::Reject] {
        match repo
            .transition(fixture.business_id, product.id, op)
            .await
            .unwrap_err()
        {
            CurioError::InvalidTransition { current, attempted } => {
                assert_eq!(current, ProductStatus::Draft);
                assert_eq!(attempted, op);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    // submit requires draft.
    repo.transition(fixture.business_id, product.id, Transition::Submit)
        .await
        .unwrap();
    match repo
        .transition(fixture.business_id, product.id, Transition::Submit)
        .await
        .unwrap_err()
    {
        CurioError::InvalidTransition { current, attempted } => {
            assert_eq!(current, ProductStatus::PendingApproval);
            assert_eq!(attempted, Transition::Submit);
        }
        other => panic!("expected InvalidTransition, got {other:?}"),
    }

    let unchanged = repo
        .get_by_id(fixture.business_id, product.id)
        .await
        .unwrap();
    assert_eq!(unchanged.status, ProductStatus::PendingApproval);
}

#[tokio::test]
async fn concurrent_approvals_have_exactly_one_winner() {
    let fixture = setup().await;
    let repo = SurrealProductRepository::new(fixture.db.clone());

    let product = repo.create(widget(&fixture)).await.unwrap();
    repo.transition(fixture.business_id, product.id, Transition::Submit)
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        repo.transition(fixture.business_id, product.id, Transition::Approve),
        repo.transition(fixture.business_id, product.id, Transition::Approve),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one approve may win: {a:?} / {b:?}");

    let loser = if a.is_err() { a } else { b };
    match loser.unwrap_err() {
        CurioError::InvalidTransition { current, attempted } => {
            assert_eq!(current, ProductStatus::Approved);
            assert_eq!(attempted, Transition::Approve);
        }
        other => panic!("expected InvalidTransition, got {other:?}"),
    }

    let final_state = repo
        .get_by_id(fixture.business_id, product.id)
        .await
        .unwrap();
    assert_eq!(final_state.status, ProductStatus::Approved);
}

#[tokio::test]
async fn public_listing_shows_only_approved() {
    let fixture = setup().await;
    let repo = SurrealProductRepository::new(fixture.db.clone());

    let draft = repo.create(widget(&fixture)).await.unwrap();

    let mut approved_input = widget(&fixture);
    approved_input.name = "Gadget".into();
    let approved = repo.create(approved_input).await.unwrap();
    repo.transition(fixture.business_id, approved.id, Transition::Submit)
        .await
        .unwrap();
    repo.transition(fixture.business_id, approved.id, Transition::Approve)
        .await
        .unwrap();

    let listing = repo.list_public().await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, approved.id);
    assert_eq!(listing[0].name, "Gadget");
    assert_eq!(listing[0].business_name, "Acme Corp");
    assert!(listing.iter().all(|p| p.id != draft.id));
}
