pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub use extractors::AuthenticatedUser;
pub use middleware::{AdminOnly, AuthMiddleware};
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenError, TokenService};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Represents the payload for a user login request.
///
/// Deliberately unvalidated: an empty username or password simply fails to match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Must contain at least one non-whitespace character.
    #[validate(custom = "not_blank")]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "test_user-123".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let blank_username = RegisterRequest {
            username: "   ".to_string(),
            password: "password123".to_string(),
        };
        assert!(blank_username.validate().is_err());

        let empty_password = RegisterRequest {
            username: "tu".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());
    }
}
