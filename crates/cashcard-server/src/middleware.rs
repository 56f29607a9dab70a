//! HTTP Basic authentication middleware.
//!
//! Parses the `Authorization: Basic <base64 name:password>` header, verifies
//! the pair against the user registry, and injects the resulting
//! [`Principal`] into request extensions for the card handlers. Credential
//! verification is the only thing that happens here — ownership decisions
//! belong to `cashcard-core`.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;

use cashcard_core::Principal;

use crate::error::AppError;
use crate::state::AppState;

/// Split a `Basic` authorization header value into name and password.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] if the scheme is not `Basic`, the
/// payload is not valid base64, or the decoded payload has no `:`.
pub fn parse_basic(header: &str) -> Result<(String, String), AppError> {
    let payload = header.strip_prefix("Basic ").ok_or_else(|| {
        AppError::Unauthorized("Authorization header must use Basic scheme".to_owned())
    })?;

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| AppError::Unauthorized("invalid base64 in Authorization header".to_owned()))?;

    let decoded = String::from_utf8(decoded)
        .map_err(|_| AppError::Unauthorized("credentials are not valid UTF-8".to_owned()))?;

    let (name, password) = decoded
        .split_once(':')
        .ok_or_else(|| AppError::Unauthorized("credentials must be name:password".to_owned()))?;

    Ok((name.to_owned(), password.to_owned()))
}

/// Authenticate a request against the registry.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] for a missing header, a malformed
/// header, or credentials the registry does not accept.
fn authenticate(state: &AppState, req: &Request) -> Result<Principal, AppError> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_owned()))?;

    let (name, password) = parse_basic(header)?;

    state
        .users
        .verify(&name, &password)
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_owned()))
}

/// Middleware guarding the card routes.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] when authentication fails; the
/// request never reaches a handler.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = authenticate(&state, &req)?;

    tracing::debug!(principal = %principal.name, "request authenticated");
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(raw: &str) -> String {
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }

    #[test]
    fn parses_name_and_password() {
        let (name, password) = parse_basic(&encode("LeudiX1:leo123")).unwrap();
        assert_eq!(name, "LeudiX1");
        assert_eq!(password, "leo123");
    }

    #[test]
    fn password_may_contain_colons() {
        let (name, password) = parse_basic(&encode("Sarah:sa:ra:123")).unwrap();
        assert_eq!(name, "Sarah");
        assert_eq!(password, "sa:ra:123");
    }

    #[test]
    fn rejects_non_basic_scheme() {
        assert!(parse_basic("Bearer abcdef").is_err());
    }

    #[test]
    fn rejects_bad_base64() {
        assert!(parse_basic("Basic %%%not-base64%%%").is_err());
    }

    #[test]
    fn rejects_payload_without_colon() {
        let header = format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode("no-separator")
        );
        assert!(parse_basic(&header).is_err());
    }
}
