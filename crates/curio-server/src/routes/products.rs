//! Product catalog routes: the public storefront listing, tenant-scoped
//! CRUD, and the lifecycle workflow endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use curio_core::models::product::{PublicProduct, UpdateProduct};
use uuid::Uuid;

use crate::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/public", get(list_public))
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/submit", post(submit_product))
        .route("/{id}/approve", post(approve_product))
        .route("/{id}/reject", post(reject_product))
}

/// The only unauthenticated endpoint: approved products across all
/// businesses.
async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicProduct>>, ApiError> {
    let products = state.catalog.list_public_products().await?;
    Ok(Json(products))
}

async fn list_products(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.catalog.list_products(&actor).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

async fn create_product(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state
        .catalog
        .create_product(&actor, body.name, body.description, body.price)
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

async fn get_product(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.catalog.get_product(&actor, id).await?;
    Ok(Json(product.into()))
}

async fn update_product(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .catalog
        .update_product(
            &actor,
            id,
            UpdateProduct {
                name: body.name,
                description: body.description,
                price: body.price,
            },
        )
        .await?;
    Ok(Json(product.into()))
}

async fn delete_product(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_product(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit_product(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.catalog.submit_product(&actor, id).await?;
    Ok(Json(product.into()))
}

async fn approve_product(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.catalog.approve_product(&actor, id).await?;
    Ok(Json(product.into()))
}

async fn reject_product(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.catalog.reject_product(&actor, id).await?;
    Ok(Json(product.into()))
}
