//! Authentication / authorization primitives.
//!
//! Tokens are issued locally at `/login/petugas` and verified here as HS256
//! bearer tokens. Handlers downstream only ever see [`Claims`]; they never
//! inspect the token themselves.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    config::AuthConfig,
    models::staff::{Role, Staff},
    state::AppState,
    Error, Result,
};

/// Token payload. `sub` is the staff id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn staff_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// Issue an access token for a staff member.
pub fn sign_token(config: &AuthConfig, staff: &Staff) -> Result<String> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: staff.id.to_string(),
        username: staff.username.clone(),
        role: staff.role,
        iat: now.timestamp(),
        exp: (now + chrono::Duration::hours(config.token_ttl_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("failed to sign token: {e}")))
}

/// Decode and validate a bearer token (signature + expiry).
pub fn verify_token(config: &AuthConfig, token: &str) -> std::result::Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

/// Salted digest, `salt$hexdigest`.
///
/// The hashing scheme is a stand-in collaborator; swap these two functions
/// for a KDF without touching callers.
pub fn hash_password(password: &str) -> String {
    let salt = uuid::Uuid::new_v4().simple().to_string();
    let digest = digest_with_salt(&salt, password);
    format!("{salt}${digest}")
}

/// Verify a password against an encoded `salt$hexdigest` value.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let Some((salt, digest)) = encoded.split_once('$') else {
        return false;
    };
    let candidate = digest_with_salt(salt, password);

    // Compare without short-circuiting on the first differing byte.
    candidate.len() == digest.len()
        && candidate
            .bytes()
            .zip(digest.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn digest_with_salt(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"$");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Middleware attaching [`Claims`] on protected routes, rejecting requests
/// without a valid bearer token.
pub async fn auth_middleware(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(authz) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized("Authorization header is required");
    };

    let Ok(authz) = authz.to_str() else {
        return unauthorized("Authorization header is not valid UTF-8");
    };

    let Some(token) = authz
        .strip_prefix("Bearer ")
        .or_else(|| authz.strip_prefix("bearer "))
    else {
        return unauthorized("Authorization header format must be 'Bearer <token>'");
    };

    match verify_token(&state.config.auth, token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(_) => unauthorized("Invalid or expired token"),
    }
}

/// Role gate; layer after [`auth_middleware`] with a static allow-list.
pub async fn authorize(allowed: &'static [Role], req: Request, next: Next) -> Response {
    let Some(claims) = req.extensions().get::<Claims>() else {
        return Error::Forbidden("user role not found in token".to_string()).into_response();
    };

    if !allowed.contains(&claims.role) {
        return Error::Forbidden("you are not authorized to access this resource".to_string())
            .into_response();
    }

    next.run(req).await
}

/// Extractor for the authenticated caller attached by the middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedStaff(pub Claims);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedStaff
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthenticatedStaff)
            .ok_or_else(|| {
                Error::Unauthorized("missing bearer token".to_string()).into_response()
            })
    }
}

fn unauthorized(message: &str) -> Response {
    Error::Unauthorized(message.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn staff() -> Staff {
        Staff {
            id: 7,
            clinic_id: None,
            username: "admin".into(),
            name: "Administrator".into(),
            status: "active".into(),
            role: Role::Admin,
            password_hash: String::new(),
            must_change_password: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn auth_config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 1,
            default_staff_password: "changeme123".to_string(),
        }
    }

    #[test]
    fn token_round_trips() {
        let config = auth_config("secret-a");
        let token = sign_token(&config, &staff()).unwrap();
        let claims = verify_token(&config, &token).unwrap();
        assert_eq!(claims.staff_id(), Some(7));
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = sign_token(&auth_config("secret-a"), &staff()).unwrap();
        assert!(verify_token(&auth_config("secret-b"), &token).is_err());
    }

    #[test]
    fn password_hash_verifies_and_salts_differ() {
        let first = hash_password("s3cret-pass");
        let second = hash_password("s3cret-pass");

        assert_ne!(first, second);
        assert!(verify_password("s3cret-pass", &first));
        assert!(verify_password("s3cret-pass", &second));
        assert!(!verify_password("wrong-pass", &first));
        assert!(!verify_password("s3cret-pass", "garbage-without-separator"));
    }
}
