//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while loading [`ClientConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server origin without a trailing slash.
    pub base_url: String,
    /// Value of the `session` cookie issued at login, if any.
    pub session: Option<String>,
    /// Shared secret for the door endpoints (`/api/open?token=`).
    pub api_token: Option<String>,
    /// Where the client is sent when the server answers 401.
    pub login_path: String,
    pub timeouts: Timeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            session: None,
            api_token: None,
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            timeouts: Timeouts::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `VPORT_BASE_URL`: default `http://127.0.0.1:5000`
    /// - `VPORT_SESSION`: session cookie value
    /// - `VPORT_API_TOKEN`: door API token
    /// - `VPORT_LOGIN_PATH`: default `/login`
    /// - `VPORT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `VPORT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is not a positive integer or the base
    /// URL is not http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = normalize_base_url(&lookup("VPORT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()))?;
        let session = lookup("VPORT_SESSION").filter(|v| !v.is_empty());
        let api_token = lookup("VPORT_API_TOKEN").filter(|v| !v.is_empty());
        let login_path = lookup("VPORT_LOGIN_PATH")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_owned());
        let timeouts = Timeouts {
            request_secs: parse_secs(
                "VPORT_REQUEST_TIMEOUT_SECS",
                lookup("VPORT_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_secs(
                "VPORT_CONNECT_TIMEOUT_SECS",
                lookup("VPORT_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(Self { base_url, session, api_token, login_path, timeouts })
    }

    /// Replace the base URL, applying the same normalization as the env loader.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not http(s).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Join `path` (which must start with `/`) onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Trim trailing slashes and reject non-http(s) origins.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] for any other scheme.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_owned()))
    }
}

fn parse_secs(key: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidNumber { key, value }),
    }
}
