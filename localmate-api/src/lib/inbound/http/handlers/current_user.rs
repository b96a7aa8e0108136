use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Resolve the bearer of a valid token to their account.
///
/// The token can outlive the account it was issued for; that case is a 404.
pub async fn current_user(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<CurrentUserResponseData>, ApiError> {
    state
        .user_service
        .get_user_by_username(&authenticated.username)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub language: String,
}

impl From<&User> for CurrentUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            language: user.language.code().to_string(),
        }
    }
}
