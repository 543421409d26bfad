use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::{header::SET_COOKIE, HeaderName, StatusCode},
    Form, Json,
};

use crate::errors::ApiError;
use crate::handlers::auth::{CurrentUser, ADMIN_COOKIE};
use crate::handlers::{body_rejection, form_rejection};
use crate::models::account::{
    AdminLoginRequest, AdminLoginResponse, LoginForm, RegisterRequest, TokenResponse, UserOut,
};
use crate::services::account;
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserOut>), ApiError> {
    let Json(req) = payload.map_err(body_rejection)?;
    let user = account::register(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Form(form) = form.map_err(form_rejection)?;
    let user = account::authenticate(&state.db, &form.username, &form.password).await?;
    let token = account::issue_access_token(&state.auth, &user)?;
    Ok(Json(TokenResponse::bearer(token)))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserOut> {
    Json(user.into())
}

pub async fn admin_login(
    State(state): State<AppState>,
    payload: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> Result<([(HeaderName, String); 1], Json<AdminLoginResponse>), ApiError> {
    let Json(req) = payload.map_err(body_rejection)?;
    let (user, token) =
        account::admin_login(&state.db, &state.auth, &req.username, &req.password).await?;

    let cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        ADMIN_COOKIE,
        token,
        state.auth.admin_token_ttl.num_seconds()
    );

    Ok((
        [(SET_COOKIE, cookie)],
        Json(AdminLoginResponse {
            access_token: token,
            token_type: "bearer".to_string(),
            user: user.into(),
        }),
    ))
}
