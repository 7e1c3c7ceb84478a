use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorMessage, HttpError};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn create_token(
    user_id: &str,
    role: &str,
    secret: &[u8],
    expires_in_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    if user_id.is_empty() {
        return Err(ErrorKind::InvalidSubject.into());
    }

    let now = Utc::now();
    let iat = now.timestamp() as usize;
    let exp = (now + Duration::minutes(expires_in_minutes)).timestamp() as usize;
    let claims = TokenClaims {
        sub: user_id.to_string(),
        role: role.to_string(),
        iat,
        exp,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

pub fn decode_token<T: Into<String>>(token: T, secret: &[u8]) -> Result<TokenClaims, HttpError> {
    let decoded = decode::<TokenClaims>(
        &token.into(),
        &DecodingKey::from_secret(secret),
        &Validation::new(Algorithm::HS256),
    );

    match decoded {
        Ok(token) => Ok(token.claims),
        Err(_) => Err(HttpError::unauthorized(ErrorMessage::InvalidToken.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn token_round_trip_carries_subject_and_role() {
        let token = create_token("user-1", "agent", SECRET, 60).unwrap();
        let claims = decode_token(token, SECRET).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, "agent");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_foreign_and_expired_tokens() {
        let token = create_token("user-1", "agent", SECRET, 60).unwrap();
        assert!(decode_token(token, b"other-secret").is_err());

        let expired = create_token("user-1", "agent", SECRET, -120).unwrap();
        assert!(decode_token(expired, SECRET).is_err());

        assert!(create_token("", "agent", SECRET, 60).is_err());
    }
}
