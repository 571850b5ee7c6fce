use crate::errors::{NextcloudError, Result};

use super::constants::FILES_BASE_PATH;

/// Nextcloud server configuration
#[derive(Clone)]
pub struct WebDAVConfig {
    /// Base URL, e.g. `https://nc.example.org`
    pub server_url: String,
    pub username: String,
    /// App password; prefer app passwords over the account password
    pub password: String,
    /// `None` keeps the transport default
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for WebDAVConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDAVConfig")
            .field("server_url", &self.server_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl WebDAVConfig {
    /// Creates a new configuration without a request timeout
    pub fn new(server_url: String, username: String, password: String) -> Self {
        Self {
            server_url,
            username,
            password,
            timeout_seconds: None,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(NextcloudError::invalid_configuration("Server URL cannot be empty"));
        }

        if self.username.trim().is_empty() {
            return Err(NextcloudError::invalid_configuration("Username cannot be empty"));
        }

        if self.password.is_empty() {
            return Err(NextcloudError::invalid_configuration("Password cannot be empty"));
        }

        let parsed = url::Url::parse(&self.server_url).map_err(|e| {
            NextcloudError::invalid_configuration(format!(
                "Server URL '{}' is not a valid URL: {}",
                self.server_url, e
            ))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(NextcloudError::invalid_configuration(
                "Server URL must start with http:// or https://",
            ));
        }

        Ok(())
    }

    /// `{server_url}/remote.php/dav/files/{username}`
    pub fn files_root_url(&self) -> String {
        format!(
            "{}{}/{}",
            self.server_url.trim_end_matches('/'),
            FILES_BASE_PATH,
            urlencoding::encode(&self.username)
        )
    }

    /// Absolute URL of a path in the user's files, each segment percent-encoded
    pub fn url_for_path(&self, relative_path: &str) -> String {
        let encoded = relative_path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!("{}/{}", self.files_root_url(), encoded)
    }

    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_seconds.map(std::time::Duration::from_secs)
    }
}
