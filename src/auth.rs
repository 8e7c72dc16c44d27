//! Admin Gating
//!
//! Write and list endpoints are restricted to allow-listed issuer
//! identities. A bearer token resolves to an email through configuration;
//! the email must additionally be on the allow-list, so revoking an admin
//! is a config edit even while their token is still known.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::configs::AdminConfig;
use crate::error::ApiError;

/// Resolve the caller to an allow-listed admin email.
///
/// Missing or unknown credentials are `Unauthorized`; a known token whose
/// email has been removed from the allow-list is `Forbidden`.
pub fn require_admin(admin: &AdminConfig, headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let email = admin.tokens.get(token).ok_or(ApiError::Unauthorized)?;

    if !admin.emails.iter().any(|allowed| allowed == email) {
        return Err(ApiError::Forbidden);
    }

    Ok(email.clone())
}
