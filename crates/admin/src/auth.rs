use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    Extension, Json,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;
use validator::Validate;

use seeder::PgStorage;

use crate::errors::AppError;

// JWT secret - in production, load from environment
pub(crate) fn jwt_secret() -> Vec<u8> {
    std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "lorem-seeder-dev-secret-change-in-production".to_string())
        .into_bytes()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub email: String,
    /// Whether the caller holds the content-management capability.
    pub manage_content: bool,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at
}

/// A user row as read for login.
#[derive(Debug, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub manage_content: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InvalidInput(format!("Failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::InvalidInput(format!("Invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn create_token(account: &Account) -> Result<String, AppError> {
    let now = OffsetDateTime::now_utc();
    let exp = now + Duration::days(7);

    let claims = Claims {
        sub: account.id,
        email: account.email.clone(),
        manage_content: account.manage_content,
        exp: exp.unix_timestamp(),
        iat: now.unix_timestamp(),
    };

    let secret = jwt_secret();
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(&secret),
    )
    .map_err(|_| AppError::Internal)
}

pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = jwt_secret();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&secret),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;
    Ok(token_data.claims)
}

/// Pulls the session token from a Bearer header or the `admin_token` cookie
/// (the admin forms authenticate through the cookie).
fn token_from_parts(parts: &Parts) -> Option<String> {
    if let Some(auth) = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix("admin_token=").map(str::to_string))
}

// Extractor for authenticated user
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or(AppError::Unauthorized)?;
        let claims = verify_token(&token)?;
        Ok(AuthUser(claims))
    }
}

/// Extractor for callers holding the content-management capability.
/// Rejects with an explicit 403 rather than silently ignoring the request.
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if !claims.manage_content {
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(claims))
    }
}

// Handler for user login
pub async fn login(
    Extension(storage): Extension<PgStorage>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    // Validate input using validator crate
    req.validate().map_err(|e| {
        let messages: Vec<String> = e
            .field_errors()
            .into_iter()
            .flat_map(|(_, errors)| {
                errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            })
            .collect();
        AppError::InvalidInput(messages.join(", "))
    })?;

    let account: Account = sqlx::query_as(
        r#"
        SELECT id, email, name, password_hash, manage_content
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(&req.email)
    .fetch_optional(storage.pool())
    .await?
    .ok_or(AppError::Unauthorized)?;

    if !verify_password(&req.password, &account.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = create_token(&account)?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse {
            id: account.id,
            email: account.email,
            name: account.name,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(manage_content: bool) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "admin@example.org".to_string(),
            name: "Admin".to_string(),
            password_hash: String::new(),
            manage_content,
        }
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
    }

    #[test]
    fn test_token_round_trip_carries_capability() {
        let account = account(true);
        let token = create_token(&account).unwrap();
        let claims = verify_token(&token).unwrap();

        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.email, account.email);
        assert!(claims.manage_content);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token("not-a-token").is_err());
    }
}
