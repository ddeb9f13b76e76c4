//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_LOGIN_PAGE: &str = "/login.html";
pub const DEFAULT_SOCIAL_LOGIN_BASE: &str = "/api/auth/login";
pub const DEFAULT_STORE_PATH: &str = ".session/storage.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root every endpoint is appended to. Never ends with `/`.
    pub base_url: String,
    /// Where the user is sent after a logout or an expired session.
    pub login_page: String,
    /// Prefix of the provider-specific social login routes.
    pub social_login_base: String,
    /// Backing file of the persistent session store.
    pub store_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            login_page: DEFAULT_LOGIN_PAGE.to_owned(),
            social_login_base: DEFAULT_SOCIAL_LOGIN_BASE.to_owned(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `SESSION_API_BASE_URL`: default `http://localhost:8000/api`
    /// - `SESSION_LOGIN_PAGE`: default `/login.html`
    /// - `SESSION_SOCIAL_LOGIN_BASE`: default `/api/auth/login`
    /// - `SESSION_STORE_PATH`: default `.session/storage.json`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = normalize_base_url(&env_or("SESSION_API_BASE_URL", DEFAULT_BASE_URL))?;
        let login_page = env_or("SESSION_LOGIN_PAGE", DEFAULT_LOGIN_PAGE);
        let social_login_base = env_or("SESSION_SOCIAL_LOGIN_BASE", DEFAULT_SOCIAL_LOGIN_BASE)
            .trim_end_matches('/')
            .to_owned();
        let store_path = PathBuf::from(env_or("SESSION_STORE_PATH", DEFAULT_STORE_PATH));

        Ok(Self { base_url, login_page, social_login_base, store_path })
    }

    /// Replace the base URL, applying the same validation as [`Self::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `raw` is not an http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ClientError> {
        self.base_url = normalize_base_url(raw)?;
        Ok(self)
    }

    /// Full request URL for an endpoint path such as `/history`.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::Config(format!(
            "base URL '{raw}' must start with http:// or https://"
        )));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
