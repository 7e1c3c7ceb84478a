use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::{ErrorMessage, HttpError},
    service::error::ServiceError,
    utils::token,
    AppState,
};

/// What the caller presented as proof of identity on a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Credential {
    Missing,
    /// A token was sent but failed signature or expiry checks.
    Invalid,
    Verified { subject: String },
}

impl Credential {
    pub fn authenticate(&self) -> Result<&str, ServiceError> {
        match self {
            Credential::Verified { subject } => Ok(subject),
            Credential::Missing | Credential::Invalid => Err(ServiceError::Unauthenticated),
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}

pub fn resolve_credential(cookie_jar: &CookieJar, headers: &HeaderMap, secret: &[u8]) -> Credential {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(headers));

    let Some(token) = token else {
        return Credential::Missing;
    };

    match token::decode_token(token, secret) {
        Ok(claims) => Credential::Verified {
            subject: claims.sub,
        },
        Err(_) => {
            tracing::debug!("rejected an unverifiable token");
            Credential::Invalid
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = parts
            .extensions
            .get::<Arc<AppState>>()
            .ok_or_else(|| HttpError::server_error(ErrorMessage::ServerError.to_string()))?;

        let cookie_jar = CookieJar::from_headers(&parts.headers);

        Ok(resolve_credential(
            &cookie_jar,
            &parts.headers,
            app_state.env.jwt_secret.as_bytes(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &[u8] = b"test-secret";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn classifies_authorization_header() {
        let jar = CookieJar::new();
        assert_eq!(
            resolve_credential(&jar, &HeaderMap::new(), SECRET),
            Credential::Missing
        );
        assert_eq!(
            resolve_credential(&jar, &headers_with("Bearer not-a-jwt"), SECRET),
            Credential::Invalid
        );
        assert_eq!(
            resolve_credential(&jar, &headers_with("Basic abc"), SECRET),
            Credential::Missing
        );

        let token = token::create_token("user-1", "agent", SECRET, 10).unwrap();
        assert_eq!(
            resolve_credential(&jar, &headers_with(&format!("Bearer {}", token)), SECRET),
            Credential::Verified {
                subject: "user-1".to_string()
            }
        );
    }

    #[test]
    fn cookie_takes_precedence() {
        let token = token::create_token("user-2", "customer", SECRET, 10).unwrap();
        let jar = CookieJar::new().add(axum_extra::extract::cookie::Cookie::new("token", token));

        assert_eq!(
            resolve_credential(&jar, &headers_with("Bearer garbage"), SECRET),
            Credential::Verified {
                subject: "user-2".to_string()
            }
        );
    }

    #[test]
    fn only_verified_credentials_authenticate() {
        assert!(Credential::Missing.authenticate().is_err());
        assert!(Credential::Invalid.authenticate().is_err());
        let verified = Credential::Verified {
            subject: "u1".to_string(),
        };
        assert_eq!(verified.authenticate().unwrap(), "u1");
    }
}
