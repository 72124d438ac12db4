use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

const ACCESS_TTL_HOURS: i64 = 24;
const REFRESH_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    exp: usize,
    token_type: String,
}

fn create_token(
    id: i64,
    secret: &str,
    token_type: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = Utc::now() + ttl;

    let claims = Claims {
        sub: id,
        exp: expiration.timestamp() as usize,
        token_type: token_type.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn create_access_token(id: i64, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    create_token(id, secret, TOKEN_TYPE_ACCESS, Duration::hours(ACCESS_TTL_HOURS))
}

pub fn create_refresh_token(id: i64, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    create_token(id, secret, TOKEN_TYPE_REFRESH, Duration::days(REFRESH_TTL_DAYS))
}

/// Decode a token and check it carries the expected `token_type` claim, so a
/// refresh token cannot be replayed on a protected route and vice versa.
pub fn verify_token(
    token: &str,
    secret: &str,
    expected_type: &str,
) -> Result<i64, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;

    if data.claims.token_type != expected_type {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }

    Ok(data.claims.sub)
}

/// Fetch the caller id that the auth middleware stored in request extensions.
pub fn extract_user_id(req: &HttpRequest) -> Result<i64, HttpResponse> {
    match req.extensions().get::<i64>() {
        Some(id) => Ok(*id),
        None => Err(HttpResponse::Unauthorized().json(json!({
            "status": "error",
            "message": "Authentication required"
        }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn access_token_round_trips() {
        let token = create_access_token(42, SECRET).unwrap();
        let id = verify_token(&token, SECRET, TOKEN_TYPE_ACCESS).unwrap();
        assert_eq!(id, 42);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let token = create_refresh_token(42, SECRET).unwrap();
        assert!(verify_token(&token, SECRET, TOKEN_TYPE_ACCESS).is_err());
        assert_eq!(verify_token(&token, SECRET, TOKEN_TYPE_REFRESH).unwrap(), 42);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_access_token(7, SECRET).unwrap();
        assert!(verify_token(&token, "other-secret", TOKEN_TYPE_ACCESS).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = create_token(7, SECRET, TOKEN_TYPE_ACCESS, Duration::seconds(-120)).unwrap();
        assert!(verify_token(&token, SECRET, TOKEN_TYPE_ACCESS).is_err());
    }
}
