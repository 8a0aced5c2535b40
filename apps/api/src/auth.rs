//! Bearer-token authentication extractor.
//!
//! Tokens are opaque API keys; only their SHA-256 digest is stored in the
//! `users` table. Handlers take `AuthUser` and scope every query by the
//! resolved user id — rows owned by someone else surface as 404, never 403,
//! so resource existence is not leaked.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller, resolved from the `Authorization` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let user_id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE api_token_hash = $1")
                .bind(token_digest(token))
                .fetch_optional(&state.db)
                .await?;

        user_id.map(AuthUser).ok_or(AppError::Unauthorized)
    }
}

/// SHA-256 hex digest of an API token. This is what the `users` table stores.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_digest_is_hex_sha256() {
        let digest = token_digest("secret-token");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_token_digest_is_deterministic() {
        assert_eq!(token_digest("abc"), token_digest("abc"));
        assert_ne!(token_digest("abc"), token_digest("abd"));
    }
}
