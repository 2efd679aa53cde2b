use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};
use sea_orm::EntityTrait;

use crate::{
    entity::{Users, users},
    error::AppError,
    state::AppState,
    token,
};

/// Authenticated caller, resolved fresh on every request.
///
/// The token is only checked for shape; the lookup of the decoded user id in
/// the store is the sole validation it receives. There is no signature and no
/// expiry.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: users::Model,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthenticated("Authorization header is required".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthenticated("Invalid Authorization header".into()))?;

        let token_str = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthenticated("Authorization header format must be Bearer <token>".into())
        })?;

        let claims = token::parse(token_str.trim())?;

        let state = AppState::from_ref(state);
        let user = Users::find_by_id(claims.user_id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("Invalid token".into()))?;

        tracing::debug!(user_id = user.id, "session resolved");

        Ok(AuthUser { user })
    }
}
