use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::models::user::User;

/// Resolves an already-issued bearer token to its owning `User`. There is no
/// HTML login form in this repo to set a cookie from — credential
/// verification is an external collaborator's job (§4.8); this extractor
/// only trusts a token it was handed.
pub struct CurrentUser {
    pub user: User,
}

impl std::ops::Deref for CurrentUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

impl FromRequestParts<crate::AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        let user = User::find_by_api_token(&state.db, &token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("unknown api token".to_string()))?;

        Ok(CurrentUser { user })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    header.strip_prefix("Bearer ").map(str::to_string)
}
