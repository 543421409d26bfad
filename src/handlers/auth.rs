//! Session extractors for protected routes.

use axum::{
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};

use crate::entities::users;
use crate::errors::{ApiError, ServiceError};
use crate::services::account;
use crate::AppState;

pub const ADMIN_COOKIE: &str = "admin_access_token";

/// Customer resolved from `Authorization: Bearer <token>`.
pub struct CurrentUser(pub users::Model);

/// Administrator resolved from the admin cookie or a bearer token.
pub struct AdminUser(pub users::Model);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn cookie<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ServiceError::Unauthorized("Not authenticated".to_string()))?;

        let user = account::current_user(&state.db, &state.auth, token).await?;
        Ok(CurrentUser(user))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = cookie(parts, ADMIN_COOKIE).or_else(|| bearer_token(parts));

        let user = account::current_admin(&state.db, &state.auth, token).await?;
        Ok(AdminUser(user))
    }
}
