use axum::extract::Query;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;
use serde::Deserialize;

use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated username in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: Username,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Middleware that validates access tokens and adds the username to request extensions
///
/// The token is read from `Authorization: Bearer <token>`, falling back to a
/// `token` query parameter.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&req)?;

    // Expired, tampered and malformed tokens all look the same from here
    let claims = state.authenticator.validate_token(&token).ok_or_else(|| {
        tracing::warn!(path = %req.uri().path(), "Rejected access token");
        invalid_token()
    })?;

    let username = Username::new(claims.sub).map_err(|e| {
        tracing::error!(error = %e, "Token subject is not a valid username");
        invalid_token()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { username });

    Ok(next.run(req).await)
}

fn invalid_token() -> ApiError {
    ApiError::Unauthorized("Invalid token".to_string())
}

fn extract_token(req: &Request) -> Result<String, ApiError> {
    if let Some(auth_header) = req.headers().get(http::header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().map_err(|_| {
            ApiError::Unauthorized("Invalid Authorization header".to_string())
        })?;

        // The scheme name is case-insensitive
        return auth_str
            .split_once(' ')
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim().to_string())
            .ok_or_else(|| {
                ApiError::Unauthorized(
                    "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
                )
            });
    }

    Query::<TokenQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(query)| query.token)
        .ok_or_else(|| ApiError::Unauthorized("Missing access token".to_string()))
}
