use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use role_gate::Action;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::parse_body;
use crate::error::{AppError, Result};
use crate::middleware::CurrentPrincipal;
use crate::models::{AddCartItem, CartItem, Collection, Coupon, UpdateCartItem};
use crate::services::{CartService, DocumentService};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cart).post(add_item).delete(clear_cart))
        .route("/:id", put(update_item).delete(remove_item))
}

pub fn coupon_routes() -> Router<AppState> {
    Router::new().route("/", get(list_coupons))
}

fn parse_item_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest("Invalid cart item ID".to_string()))
}

async fn list_cart(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> Result<Json<Vec<CartItem>>> {
    current.require(Action::UseCart)?;

    let items = CartService::new(state.db.clone())
        .list_items(current.uid())
        .await?;

    Ok(Json(items))
}

async fn add_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    current.require(Action::UseCart)?;
    let payload: AddCartItem = parse_body(&body)?;
    payload.validate()?;

    let product_exists = DocumentService::new(state.db.clone())
        .exists(Collection::Products, payload.product_id)
        .await?;
    if !product_exists {
        return Err(AppError::NotFound(format!(
            "Product {} not found",
            payload.product_id
        )));
    }

    let id = CartService::new(state.db.clone())
        .add_item(current.uid(), payload.product_id, payload.quantity)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": id,
        })),
    ))
}

async fn update_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    current.require(Action::UseCart)?;
    let payload: UpdateCartItem = parse_body(&body)?;
    payload.validate()?;
    let item_id = parse_item_id(&id)?;

    CartService::new(state.db.clone())
        .update_quantity(current.uid(), item_id, payload.quantity)
        .await?;

    Ok(Json(json!({
        "success": true,
        "quantity": payload.quantity,
    })))
}

async fn remove_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    current.require(Action::UseCart)?;
    let item_id = parse_item_id(&id)?;

    CartService::new(state.db.clone())
        .remove_item(current.uid(), item_id)
        .await?;

    Ok(Json(json!({ "success": true })))
}

async fn clear_cart(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> Result<Json<serde_json::Value>> {
    current.require(Action::UseCart)?;

    let removed = CartService::new(state.db.clone())
        .clear(current.uid())
        .await?;

    Ok(Json(json!({
        "success": true,
        "removed": removed,
    })))
}

async fn list_coupons(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> Result<Json<Vec<Coupon>>> {
    current.require(Action::UseCart)?;

    let coupons = CartService::new(state.db.clone())
        .list_coupons(current.uid())
        .await?;

    Ok(Json(coupons))
}
