// Cart service - per-user cart lines and coupons
use uuid::Uuid;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{CartItem, Coupon, MAX_CART_QUANTITY};

pub struct CartService {
    db: Database,
}

impl CartService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list_items(&self, user_id: &str) -> Result<Vec<CartItem>> {
        let items: Vec<CartItem> = sqlx::query_as(
            r#"
            SELECT c.id, c.product_id, c.quantity, d.data AS product, c.created_at
            FROM cart_items c
            LEFT JOIN documents d ON d.id = c.product_id AND d.collection = 'products'
            WHERE c.user_id = $1
            ORDER BY c.created_at ASC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.db.pg)
        .await?;

        Ok(items)
    }

    /// Add a product, bumping the quantity if it is already in the cart.
    /// The combined quantity is capped at `MAX_CART_QUANTITY`.
    pub async fn add_item(&self, user_id: &str, product_id: Uuid, quantity: i32) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO cart_items (id, user_id, product_id, quantity, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (user_id, product_id) DO UPDATE
            SET quantity = LEAST(cart_items.quantity + EXCLUDED.quantity, $5)
            RETURNING id
            "#
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(MAX_CART_QUANTITY)
        .fetch_one(&self.db.pg)
        .await?;

        Ok(id)
    }

    pub async fn update_quantity(&self, user_id: &str, item_id: Uuid, quantity: i32) -> Result<()> {
        let result = sqlx::query("UPDATE cart_items SET quantity = $3 WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id)
            .bind(quantity)
            .execute(&self.db.pg)
            .await?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(item_id));
        }

        Ok(())
    }

    pub async fn remove_item(&self, user_id: &str, item_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id)
            .execute(&self.db.pg)
            .await?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(item_id));
        }

        Ok(())
    }

    /// Empty the cart, returning how many lines were removed
    pub async fn clear(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db.pg)
            .await?;

        Ok(result.rows_affected())
    }

    /// Unused coupons belonging to the user
    pub async fn list_coupons(&self, user_id: &str) -> Result<Vec<Coupon>> {
        let coupons: Vec<Coupon> = sqlx::query_as(
            r#"
            SELECT u.id, u.offer_id, u.code, d.data AS offer, u.created_at
            FROM user_coupons u
            LEFT JOIN documents d ON d.id = u.offer_id AND d.collection = 'offers'
            WHERE u.user_id = $1 AND u.used = FALSE
            ORDER BY u.created_at DESC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.db.pg)
        .await?;

        Ok(coupons)
    }
}

fn item_not_found(item_id: Uuid) -> AppError {
    AppError::NotFound(format!("Cart item {} not found", item_id))
}
