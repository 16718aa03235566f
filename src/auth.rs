use bcrypt::{hash, verify, DEFAULT_COST};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::AuthPayload;

const TOKEN_TTL_SECS: usize = 30 * 24 * 3600; // 30 days

fn secret() -> Vec<u8> {
    std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "default-secret-key".to_string())
        .into_bytes()
}

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

pub fn create_jwt(user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0)
        + TOKEN_TTL_SECS;

    let claims = AuthPayload {
        sub: user_id.to_owned(),
        exp: expiration,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(&secret()))
}

pub fn validate_jwt(token: &str) -> Result<AuthPayload, jsonwebtoken::errors::Error> {
    let token_data = decode::<AuthPayload>(
        token,
        &DecodingKey::from_secret(&secret()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_roundtrip() {
        let hashed = hash_password("hunter42").unwrap();
        assert!(verify_password("hunter42", &hashed).unwrap());
        assert!(!verify_password("hunter43", &hashed).unwrap());
    }

    #[test]
    fn jwt_roundtrip_carries_user_id() {
        let token = create_jwt("user-123").unwrap();
        let claims = validate_jwt(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(validate_jwt("not.a.jwt").is_err());
    }
}
