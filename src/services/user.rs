use std::fmt;
use std::sync::Arc;
use validator::Validate;

use crate::auth::{hash_password, verify_password, RegisterRequest, TokenError, TokenService};
use crate::models::{Role, User};
use crate::repositories::{RepositoryError, UserRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    InvalidInput(String),
    UsernameTaken,
    /// Unknown username or wrong password. The two cases are indistinguishable to the
    /// caller.
    InvalidCredentials,
    NotFound,
    Hashing(String),
    Token(TokenError),
    Store(RepositoryError),
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserError::InvalidInput(msg) => write!(f, "invalid data: {}", msg),
            UserError::UsernameTaken => write!(f, "username is already taken"),
            UserError::InvalidCredentials => write!(f, "invalid credentials"),
            UserError::NotFound => write!(f, "user not found"),
            UserError::Hashing(msg) => write!(f, "password hashing failed: {}", msg),
            UserError::Token(e) => write!(f, "{}", e),
            UserError::Store(e) => write!(f, "{}", e),
        }
    }
}

/// Registration, login and promotion over an injected `UserRepository`.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            repo,
            tokens,
            bcrypt_cost,
        }
    }

    /// Creates a credential with role `user`.
    pub async fn register(&self, request: RegisterRequest) -> Result<(), UserError> {
        request
            .validate()
            .map_err(|e| UserError::InvalidInput(e.to_string()))?;

        if self
            .repo
            .find_by_username(&request.username)
            .await
            .map_err(UserError::Store)?
            .is_some()
        {
            return Err(UserError::UsernameTaken);
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost)
            .map_err(|e| UserError::Hashing(e.to_string()))?;

        let user = User::new(request.username, password_hash);
        // A concurrent registration can slip in between the lookup and the insert.
        self.repo.insert(&user).await.map_err(|e| match e {
            RepositoryError::Duplicate => UserError::UsernameTaken,
            other => UserError::Store(other),
        })?;

        log::info!("Registered user {}", user.username);
        Ok(())
    }

    /// Returns a signed token carrying the user's current role.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, UserError> {
        let Some(user) = self
            .repo
            .find_by_username(username)
            .await
            .map_err(UserError::Store)?
        else {
            log::warn!("Login rejected for {}", username);
            return Err(UserError::InvalidCredentials);
        };

        let matches = verify_password(password, &user.password_hash)
            .map_err(|e| UserError::Hashing(e.to_string()))?;
        if !matches {
            log::warn!("Login rejected for {}", username);
            return Err(UserError::InvalidCredentials);
        }

        self.tokens.issue(&user).map_err(UserError::Token)
    }

    pub async fn promote(&self, username: &str) -> Result<(), UserError> {
        self.repo
            .set_role(username, Role::Admin)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => UserError::NotFound,
                other => UserError::Store(other),
            })?;
        log::info!("Promoted user {} to {}", username, Role::Admin);
        Ok(())
    }
}
