use std::env;

use crate::error::AppError;

const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const DEFAULT_BCRYPT_COST: u32 = 12;

/// Process configuration, read once at startup.
///
/// `JWT_SECRET` is the only required variable. Without `DATABASE_URL` the service
/// runs on the in-process memory store.
#[derive(Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    pub server_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AppError::InternalServerError("JWT_SECRET must be set".into()))?;

        let token_ttl_hours = parse_var("JWT_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?;
        if token_ttl_hours <= 0 {
            return Err(AppError::InternalServerError(
                "JWT_TTL_HOURS must be a positive number".into(),
            ));
        }

        let bcrypt_cost = parse_var("BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::InternalServerError(
                "BCRYPT_COST must be between 4 and 31".into(),
            ));
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            jwt_secret,
            token_ttl_hours,
            bcrypt_cost,
            server_port: parse_var("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::InternalServerError(format!("{} must be a number", name))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test touches the environment so parallel test threads cannot interleave.
    #[test]
    fn test_config_from_env() {
        env::remove_var("JWT_SECRET");
        assert!(Config::from_env().is_err());

        env::set_var("JWT_SECRET", "");
        assert!(Config::from_env().is_err());

        env::set_var("JWT_SECRET", "test-secret");
        env::remove_var("DATABASE_URL");
        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");
        env::remove_var("JWT_TTL_HOURS");
        env::remove_var("BCRYPT_COST");

        let config = Config::from_env().unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.jwt_secret, "test-secret");
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");

        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("JWT_TTL_HOURS", "2");

        let config = Config::from_env().unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://test"));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.token_ttl_hours, 2);

        env::set_var("JWT_TTL_HOURS", "0");
        assert!(Config::from_env().is_err());
        env::set_var("JWT_TTL_HOURS", "soon");
        assert!(Config::from_env().is_err());
        env::remove_var("JWT_TTL_HOURS");

        env::set_var("BCRYPT_COST", "2");
        assert!(Config::from_env().is_err());
        env::remove_var("BCRYPT_COST");

        env::remove_var("DATABASE_URL");
        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");
    }
}
