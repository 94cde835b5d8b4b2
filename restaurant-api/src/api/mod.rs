mod audit;
mod cart;
mod catalog;
mod users;

use axum::Router;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::Collection;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", catalog::routes(Collection::Products))
        .nest("/events", catalog::routes(Collection::Events))
        .nest("/offers", catalog::routes(Collection::Offers))
        .nest("/users", users::routes())
        .nest("/cart", cart::routes())
        .nest("/coupons", cart::coupon_routes())
        .nest("/audit-logs", audit::routes())
}

/// Decode a raw request body. Handlers take `Bytes` and call this only after
/// the role check, so a caller without permission always sees 403.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
}
