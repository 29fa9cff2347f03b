use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried by a stored credential and by every token issued for it.
///
/// The wire spellings are `"user"` and `"Admin"`; the admin gate compares against
/// `"Admin"` exactly, so the capitalisation is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "Admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "Admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A stored credential.
///
/// Created at registration with `Role::User`; the only later mutation is promotion.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub username: String,
    /// bcrypt hash. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            role: Role::User,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_spelling() {
        assert_eq!(Role::Admin.as_str(), "Admin");
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new("alice".into(), "$2b$04$secret".into());
        assert!(!user.is_admin());

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["role"], "user");
        assert!(json.get("password_hash").is_none());
    }
}
