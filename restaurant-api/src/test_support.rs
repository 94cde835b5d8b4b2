//! Router fixtures: a lazily connected pool, an in-memory role store and
//! session tokens signed with the test secret.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use role_gate::{InMemoryRoleStore, RoleGate};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use crate::config::{Config, DatabaseConfig, JwtConfig, ServerConfig};
use crate::db::Database;
use crate::middleware::Claims;
use crate::AppState;

pub const SECRET: &str = "test-secret";

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/restaurant_test".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        },
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            leeway_secs: 0,
        },
    }
}

/// State whose pool never connects unless a handler reaches the database.
pub fn test_state(store: &InMemoryRoleStore) -> AppState {
    let pg = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy("postgres://localhost/restaurant_test")
        .unwrap();

    AppState {
        db: Database { pg },
        config: test_config(),
        gate: RoleGate::new(Arc::new(store.clone())),
    }
}

pub fn token_for(uid: &str, secret: &str) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: uid.to_string(),
        email: Some(format!("{uid}@example.com")),
        name: None,
        exp: now + 3600,
        iat: now,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

/// Send one request and return the status with the JSON body (`Null` if none).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let response = app
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Error code from an `AppError` JSON body.
pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
