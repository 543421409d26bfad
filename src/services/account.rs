//! Registration, credential checks and bearer-token sessions.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, SqlErr,
};
use serde::{Deserialize, Serialize};

use crate::config::AuthSettings;
use crate::entities::{prelude::*, users};
use crate::errors::{ServiceError, ServiceResult};
use crate::models::account::RegisterRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email for customer tokens, numeric user id for admin tokens
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(format!("password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is unreadable: {}", e);
            false
        }
    }
}

fn issue_token(
    settings: &AuthSettings,
    sub: String,
    role: Option<String>,
    ttl: chrono::Duration,
) -> ServiceResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
        role,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(format!("token signing failed: {}", e)))
}

/// Checks signature and expiry.
pub fn decode_token(settings: &AuthSettings, token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| tracing::debug!("Rejected token: {}", e))
    .ok()
}

pub fn issue_access_token(settings: &AuthSettings, user: &users::Model) -> ServiceResult<String> {
    issue_token(settings, user.email.clone(), None, settings.access_token_ttl)
}

pub fn issue_admin_token(settings: &AuthSettings, user: &users::Model) -> ServiceResult<String> {
    issue_token(
        settings,
        user.id.to_string(),
        user.role.clone(),
        settings.admin_token_ttl,
    )
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> ServiceResult<Option<users::Model>> {
    Ok(Users::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?)
}

pub async fn register(db: &DatabaseConnection, req: &RegisterRequest) -> ServiceResult<users::Model> {
    let email = req.email.trim();
    let name = req.name.trim();

    if email.is_empty() || !email.contains('@') {
        return Err(ServiceError::Validation("A valid email is required".to_string()));
    }
    if name.is_empty() {
        return Err(ServiceError::Validation("Name is required".to_string()));
    }
    if name.chars().count() > 255 {
        return Err(ServiceError::Validation(
            "Name is longer than 255 characters".to_string(),
        ));
    }
    if req.password.is_empty() {
        return Err(ServiceError::Validation("Password is required".to_string()));
    }

    if find_by_email(db, email).await?.is_some() {
        tracing::info!("Registration refused, {} already exists", email);
        return Err(ServiceError::Conflict("Email already registered".to_string()));
    }

    let user = users::ActiveModel {
        email: Set(email.to_string()),
        hashed_password: Set(hash_password(&req.password)?),
        name: Set(name.to_string()),
        points: Set(0),
        role: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| match e.sql_err() {
        // Lost a race with a concurrent registration
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ServiceError::Conflict("Email already registered".to_string())
        }
        _ => ServiceError::Database(e),
    })?;

    tracing::info!("Registered user {} ({})", user.id, user.email);
    Ok(user)
}

/// Same error for unknown email and wrong password.
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> ServiceResult<users::Model> {
    match find_by_email(db, email.trim()).await? {
        Some(user) if verify_password(password, &user.hashed_password) => Ok(user),
        _ => {
            tracing::warn!("Failed login for {}", email);
            Err(ServiceError::Unauthorized(
                "Incorrect email or password".to_string(),
            ))
        }
    }
}

/// Resolves a customer bearer token to its user.
pub async fn current_user(
    db: &DatabaseConnection,
    settings: &AuthSettings,
    token: &str,
) -> ServiceResult<users::Model> {
    let unauthorized = || ServiceError::Unauthorized("Could not validate credentials".to_string());

    let claims = decode_token(settings, token).ok_or_else(unauthorized)?;
    find_by_email(db, &claims.sub)
        .await?
        .ok_or_else(unauthorized)
}

pub async fn admin_login(
    db: &DatabaseConnection,
    settings: &AuthSettings,
    username: &str,
    password: &str,
) -> ServiceResult<(users::Model, String)> {
    let user = authenticate(db, username, password)
        .await
        .map_err(|_| ServiceError::Unauthorized("Invalid credentials".to_string()))?;

    if !user.is_admin() {
        tracing::warn!("User {} tried to open an admin session", user.id);
        return Err(ServiceError::Forbidden("Admin access required".to_string()));
    }

    let token = issue_admin_token(settings, &user)?;
    tracing::info!("Admin session opened for user {}", user.id);
    Ok((user, token))
}

/// Resolves an admin session token. A missing token is 401, anything else
/// that fails is 403.
pub async fn current_admin(
    db: &DatabaseConnection,
    settings: &AuthSettings,
    token: Option<&str>,
) -> ServiceResult<users::Model> {
    let token = token.ok_or_else(|| ServiceError::Unauthorized("Not authenticated".to_string()))?;
    let forbidden = || ServiceError::Forbidden("Admin access required".to_string());

    let claims = decode_token(settings, token).ok_or_else(forbidden)?;
    let user_id: i32 = claims.sub.parse().map_err(|_| forbidden())?;

    let user = Users::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(forbidden)?;

    if !user.is_admin() {
        return Err(forbidden());
    }

    Ok(user)
}

/// Operator reset of a stored password.
pub async fn set_password(
    db: &DatabaseConnection,
    email: &str,
    new_password: &str,
) -> ServiceResult<users::Model> {
    if new_password.is_empty() {
        return Err(ServiceError::Validation("Password is required".to_string()));
    }

    let user = find_by_email(db, email)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", email)))?;

    let mut active = user.into_active_model();
    active.hashed_password = Set(hash_password(new_password)?);
    Ok(active.update(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AuthSettings {
        AuthSettings::new("unit-test-secret")
    }

    fn user(role: Option<&str>) -> users::Model {
        users::Model {
            id: 7,
            email: "ada@example.com".to_string(),
            hashed_password: String::new(),
            name: "Ada".to_string(),
            points: 0,
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn access_token_carries_email() {
        let settings = settings();
        let token = issue_access_token(&settings, &user(None)).unwrap();
        let claims = decode_token(&settings, &token).unwrap();
        assert_eq!(claims.sub, "ada@example.com");
        assert!(claims.role.is_none());
    }

    #[test]
    fn admin_token_carries_id_and_role() {
        let settings = settings();
        let token = issue_admin_token(&settings, &user(Some("admin"))).unwrap();
        let claims = decode_token(&settings, &token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role.as_deref(), Some("admin"));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut settings = settings();
        settings.access_token_ttl = chrono::Duration::minutes(-10);
        let token = issue_access_token(&settings, &user(None)).unwrap();
        assert!(decode_token(&settings, &token).is_none());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_access_token(&AuthSettings::new("other"), &user(None)).unwrap();
        assert!(decode_token(&settings(), &token).is_none());
    }
}
