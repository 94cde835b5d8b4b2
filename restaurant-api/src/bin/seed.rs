//! Database seed script for creating the initial super administrator
//! Run with: cargo run --bin seed
//!
//! The identity provider owns credentials; this only records the role for an
//! existing uid.

use role_gate::Role;
use sqlx::postgres::PgPoolOptions;
use validator::Validate;

#[derive(Debug, Validate)]
struct SeedAdmin {
    #[validate(length(min = 1))]
    uid: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = 1))]
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "seed=info".into()))
        .init();

    let database_url = std::env::var("DATABASE__URL")
        .unwrap_or_else(|_| "postgres://localhost/restaurant".to_string());

    let admin = SeedAdmin {
        uid: std::env::var("SEED_ADMIN_UID").unwrap_or_default(),
        email: std::env::var("SEED_ADMIN_EMAIL").unwrap_or_default(),
        name: std::env::var("SEED_ADMIN_NAME").unwrap_or_else(|_| "Super Administrator".to_string()),
    };
    admin
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid seed admin settings: {}", e))?;

    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    // Only one bootstrap: refuse once any super admin exists
    let existing: Option<(String,)> = sqlx::query_as(
        "SELECT uid FROM users WHERE role = $1 LIMIT 1"
    )
    .bind(Role::SuperAdmin.as_str())
    .fetch_optional(&pool)
    .await?;

    if let Some((uid,)) = existing {
        anyhow::bail!("A super administrator already exists (uid {})", uid);
    }

    sqlx::query(
        r#"
        INSERT INTO users (uid, email, display_name, role, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        ON CONFLICT (uid) DO UPDATE
        SET role = EXCLUDED.role, email = EXCLUDED.email, display_name = EXCLUDED.display_name
        "#
    )
    .bind(&admin.uid)
    .bind(&admin.email)
    .bind(&admin.name)
    .bind(Role::SuperAdmin.as_str())
    .execute(&pool)
    .await?;

    tracing::info!(
        uid = %admin.uid,
        email = %admin.email,
        role = %Role::SuperAdmin,
        "Super administrator ready"
    );

    Ok(())
}
