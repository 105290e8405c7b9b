//! Deployment configuration read from the environment.

use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Base URL of the notes_database backend, e.g. `https://notes.example.com/api`.
    pub const API_BASE_URL: &str = "NOTES_API_BASE_URL";
    /// Override for the persisted credential file location.
    pub const TOKEN_FILE: &str = "NOTES_TOKEN_FILE";
}

/// Default values
pub mod defaults {
    pub const TOKEN_FILE: &str = ".notes/token";
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub token_file: PathBuf,
}

impl Config {
    /// Load configuration, reading a `.env` file first when one exists.
    /// The API base URL is the one required value.
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let api_base_url = env::var(env_vars::API_BASE_URL)
            .map_err(|_| format!("{} must be set", env_vars::API_BASE_URL))?;

        let token_file = env::var(env_vars::TOKEN_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(defaults::TOKEN_FILE));

        Ok(Self {
            api_base_url,
            token_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_base_url_and_defaults_token_file() {
        env::remove_var(env_vars::API_BASE_URL);
        env::remove_var(env_vars::TOKEN_FILE);
        assert!(Config::from_env().is_err());

        env::set_var(env_vars::API_BASE_URL, "http://localhost:8080/api");
        let config = Config::from_env().expect("config should load");
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.token_file, PathBuf::from(defaults::TOKEN_FILE));
        env::remove_var(env_vars::API_BASE_URL);
    }
}
