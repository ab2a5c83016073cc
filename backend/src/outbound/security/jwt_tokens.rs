//! HS256 JSON Web Tokens implementing [`TokenService`].
//!
//! Claims: `sub` (user id), `iss`, `iat`, `exp`, and a random `jti`. Tokens
//! are stateless; deleting a user invalidates their tokens because the
//! subject no longer resolves.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{AccessToken, TokenError, TokenService};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
    jti: String,
}

/// Issues and verifies signed bearer tokens.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl_secs: i64,
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.issuer)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl JwtTokenService {
    /// Sign with `secret`; tokens live for `ttl_secs` seconds.
    #[must_use]
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }

    fn sign(&self, claims: &Claims) -> Result<AccessToken, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::issue(err.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &UserId) -> Result<AccessToken, TokenError> {
        let now = Utc::now().timestamp();
        self.sign(&Claims {
            sub: user.to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
            jti: Uuid::new_v4().to_string(),
        })
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation())
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        data.claims
            .sub
            .parse()
            .map_err(|_| TokenError::invalid("subject is not a user id"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn service() -> JwtTokenService {
        JwtTokenService::new(b"test-secret", "tenant-directory", 3600)
    }

    fn claims_for(service: &JwtTokenService, sub: String, exp_offset: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub,
            iss: service.issuer.clone(),
            iat: now,
            exp: now + exp_offset,
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[rstest]
    fn issued_tokens_verify_to_the_subject(service: JwtTokenService) {
        let user = UserId::random();
        let token = service.issue(&user).expect("issue");
        assert_eq!(service.verify(token.as_str()).expect("verify"), user);
    }

    #[rstest]
    fn tokens_are_unique_per_issue(service: JwtTokenService) {
        let user = UserId::random();
        let first = service.issue(&user).expect("issue");
        let second = service.issue(&user).expect("issue");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    fn expired_tokens_are_rejected(service: JwtTokenService) {
        let token = service
            .sign(&claims_for(&service, UserId::random().to_string(), -60))
            .expect("sign");
        assert!(matches!(
            service.verify(token.as_str()),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn foreign_signatures_and_issuers_are_rejected(service: JwtTokenService) {
        let user = UserId::random();
        let other_key = JwtTokenService::new(b"other-secret", "tenant-directory", 3600);
        let other_issuer = JwtTokenService::new(b"test-secret", "someone-else", 3600);

        for token in [
            other_key.issue(&user).expect("issue"),
            other_issuer.issue(&user).expect("issue"),
        ] {
            assert!(service.verify(token.as_str()).is_err());
        }
        assert!(service.verify("not.a.jwt").is_err());
    }

    #[rstest]
    fn non_uuid_subjects_are_rejected(service: JwtTokenService) {
        let token = service
            .sign(&claims_for(&service, "admin".to_owned(), 60))
            .expect("sign");
        assert!(service.verify(token.as_str()).is_err());
    }
}
