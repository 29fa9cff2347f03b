use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Role, User};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub username: String,
    /// Role spelling at issue time (`"user"` or `"Admin"`). Kept as a string so that
    /// the admin gate can compare it verbatim.
    pub role: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, ttl: Duration) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin.as_str()
    }
}

/// Why a token was not accepted. The three rejection kinds are distinct so callers
/// (and tests) can tell a forged token from a stale one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The string is not a decodable JWT.
    Malformed(String),
    /// The token decodes, but was not signed with our secret.
    InvalidSignature,
    /// Signature is valid and `now >= exp`.
    Expired,
    /// Issuing failed.
    Signing(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Malformed(msg) => write!(f, "malformed token: {}", msg),
            TokenError::InvalidSignature => write!(f, "token signature mismatch"),
            TokenError::Expired => write!(f, "token expired"),
            TokenError::Signing(msg) => write!(f, "failed to sign token: {}", msg),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(error: jsonwebtoken::errors::Error) -> TokenError {
        match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed(error.to_string()),
        }
    }
}

/// Issues and validates HS256 tokens with a secret fixed at construction.
///
/// Built once from configuration and shared read-only between workers through
/// `web::Data`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: no grace period past `exp`.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Generates a token for `user` that expires `ttl` from now.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.encode(&Claims::new(user, self.ttl))
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies a token string and decodes its claims.
    ///
    /// The signature is checked before expiry, so a forged token never reports
    /// `Expired`.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        // jsonwebtoken accepts `exp == now`; a token is only valid strictly before it.
        if Utc::now().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
