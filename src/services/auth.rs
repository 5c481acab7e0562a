use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Account has not been activated by an admin")]
    NotActivated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Matchmaker,
}

/// Session claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Matchmaker account id
    pub sub: Uuid,
    pub role: Role,
    #[serde(default)]
    pub activated: bool,
    pub exp: usize,
}

/// The matchmaker on whose behalf a request runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedMatchmaker {
    pub id: Uuid,
}

/// Validates HS256 session tokens
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify an `Authorization` header value of the form `Bearer <token>`
    pub fn verify_header(&self, header: Option<&str>) -> Result<AuthenticatedMatchmaker, AuthError> {
        let token = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.verify(token)
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedMatchmaker, AuthError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)?.claims;

        if !claims.activated {
            tracing::info!("Rejected session for non-activated account {}", claims.sub);
            return Err(AuthError::NotActivated);
        }

        tracing::debug!("Authenticated {:?} {}", claims.role, claims.sub);
        Ok(AuthenticatedMatchmaker { id: claims.sub })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, activated: bool) -> (Uuid, String) {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id,
            role: Role::Matchmaker,
            activated,
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap();
        (id, token)
    }

    #[test]
    fn test_valid_token() {
        let verifier = JwtVerifier::new("secret");
        let (id, token) = token("secret", true);
        let who = verifier.verify_header(Some(&format!("Bearer {}", token))).unwrap();
        assert_eq!(who.id, id);
    }

    #[test]
    fn test_missing_and_malformed_header() {
        let verifier = JwtVerifier::new("secret");
        assert!(matches!(verifier.verify_header(None), Err(AuthError::MissingToken)));
        assert!(matches!(
            verifier.verify_header(Some("Basic abc")),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let verifier = JwtVerifier::new("secret");
        let (_, token) = token("other", true);
        assert!(matches!(verifier.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_not_activated() {
        let verifier = JwtVerifier::new("secret");
        let (_, token) = token("secret", false);
        assert!(matches!(verifier.verify(&token), Err(AuthError::NotActivated)));
    }
}
