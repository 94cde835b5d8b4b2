use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use role_gate::{Action, GateError, Principal, Role};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::{AppError, Result};
use crate::AppState;

/// Session token claims. The role is deliberately absent: it is looked up
/// on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,       // Principal uid
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: usize,        // Expiration time
    pub iat: usize,        // Issued at
}

#[derive(Debug, Clone)]
pub struct CurrentPrincipal {
    pub principal: Principal,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Role,
}

impl CurrentPrincipal {
    pub fn uid(&self) -> &str {
        self.principal.id.as_str()
    }

    pub fn require(&self, action: Action) -> Result<()> {
        if !action.is_permitted(self.role) {
            tracing::debug!(
                principal = %self.principal.id,
                role = %self.role,
                action = action.as_str(),
                "Action denied"
            );
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub fn decode_claims(token: &str, config: &JwtConfig) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = config.leeway_secs;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Rejected session token: {}", e);
        GateError::Unauthenticated.into()
    })
}

/// Resolve the caller's identity and current role, then hand over to the route.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(request.headers()).ok_or(GateError::Unauthenticated)?;
    let claims = decode_claims(token, &state.config.jwt)?;

    let principal = Principal::new(claims.sub);
    let role = state.gate.resolve_role(&principal).await;

    request.extensions_mut().insert(CurrentPrincipal {
        principal,
        email: claims.email,
        name: claims.name,
        role,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Extension, Router};
    use role_gate::InMemoryRoleStore;

    use crate::test_support::{error_code, send, test_config, test_state, token_for, SECRET};

    async fn manage_products(Extension(current): Extension<CurrentPrincipal>) -> Result<String> {
        current.require(Action::ManageProducts)?;
        Ok(current.role.to_string())
    }

    fn router(state: AppState) -> Router {
        Router::new()
            .route("/guarded", get(manage_products))
            .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
    }

    async fn call(app: Router, token: Option<String>) -> StatusCode {
        send(app, "GET", "/guarded", token.as_deref(), "").await.0
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthenticated() {
        let store = InMemoryRoleStore::new();
        let (status, body) = send(router(test_state(&store)), "GET", "/guarded", None, "").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(&body), "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_unauthenticated() {
        let store = InMemoryRoleStore::new();
        store.insert("seller", Role::Seller).await;
        let app = router(test_state(&store));

        let token = token_for("seller", "someone-else");
        assert_eq!(call(app, Some(token)).await, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_decode_claims_rejects_with_gate_error() {
        let err = decode_claims("not-a-jwt", &test_config().jwt).unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));

        let token = token_for("u1", SECRET);
        assert_eq!(decode_claims(&token, &test_config().jwt).unwrap().sub, "u1");
    }

    #[tokio::test]
    async fn test_role_below_action_minimum_is_forbidden() {
        let store = InMemoryRoleStore::new();
        store.insert("client", Role::Client).await;
        let app = router(test_state(&store));

        let token = token_for("client", SECRET);
        assert_eq!(call(app, Some(token)).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_principal_without_record_is_treated_as_client() {
        let store = InMemoryRoleStore::new();
        let app = router(test_state(&store));

        let token = token_for("fresh-signup", SECRET);
        assert_eq!(call(app, Some(token)).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_sufficient_role_passes() {
        let store = InMemoryRoleStore::new();
        store.insert("seller", Role::Seller).await;
        store.insert("root", Role::SuperAdmin).await;
        let state = test_state(&store);

        let token = token_for("seller", SECRET);
        assert_eq!(call(router(state.clone()), Some(token)).await, StatusCode::OK);

        let token = token_for("root", SECRET);
        assert_eq!(call(router(state), Some(token)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_role_change_applies_to_next_request() {
        let store = InMemoryRoleStore::new();
        store.insert("u1", Role::Client).await;
        let state = test_state(&store);
        let token = token_for("u1", SECRET);

        assert_eq!(call(router(state.clone()), Some(token.clone())).await, StatusCode::FORBIDDEN);

        store.insert("u1", Role::Seller).await;
        assert_eq!(call(router(state), Some(token)).await, StatusCode::OK);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }
}
