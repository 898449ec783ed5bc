//! Per-action anti-forgery tokens for the admin forms.
//!
//! Each form embeds a short-lived signed token binding the authenticated
//! user to a named action. A token minted for one action (or another user)
//! does not verify for a different one, so a stolen generate token cannot
//! drive the delete form.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{auth, errors::AppError};

/// Action name for the content-generation form.
pub const GENERATE_ACTION: &str = "lorem_content_generator_action";

/// Action name for the test-comment deletion form.
pub const DELETE_ACTION: &str = "delete_test_comments_action";

const TOKEN_TTL_MINUTES: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
struct CsrfClaims {
    sub: Uuid,
    act: String,
    exp: i64,
    iat: i64,
}

/// Mints a token tying `user_id` to `action`.
pub fn issue(user_id: Uuid, action: &str) -> Result<String, AppError> {
    let now = OffsetDateTime::now_utc();
    let claims = CsrfClaims {
        sub: user_id,
        act: action.to_string(),
        exp: (now + Duration::minutes(TOKEN_TTL_MINUTES)).unix_timestamp(),
        iat: now.unix_timestamp(),
    };

    let secret = auth::jwt_secret();
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(&secret),
    )
    .map_err(|_| AppError::Internal)
}

/// Verifies that `token` was minted for exactly this user and action.
pub fn verify(token: &str, user_id: Uuid, action: &str) -> Result<(), AppError> {
    let secret = auth::jwt_secret();
    let data = decode::<CsrfClaims>(
        token,
        &DecodingKey::from_secret(&secret),
        &Validation::default(),
    )
    .map_err(|_| AppError::Forbidden)?;

    if data.claims.sub != user_id || data.claims.act != action {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let user = Uuid::new_v4();
        let token = issue(user, GENERATE_ACTION).unwrap();
        assert!(verify(&token, user, GENERATE_ACTION).is_ok());
    }

    #[test]
    fn test_wrong_action_is_rejected() {
        let user = Uuid::new_v4();
        let token = issue(user, GENERATE_ACTION).unwrap();
        assert!(matches!(
            verify(&token, user, DELETE_ACTION),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_foreign_user_is_rejected() {
        let token = issue(Uuid::new_v4(), DELETE_ACTION).unwrap();
        assert!(matches!(
            verify(&token, Uuid::new_v4(), DELETE_ACTION),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let user = Uuid::new_v4();
        let mut token = issue(user, GENERATE_ACTION).unwrap();
        token.push('x');
        assert!(verify(&token, user, GENERATE_ACTION).is_err());
    }
}
