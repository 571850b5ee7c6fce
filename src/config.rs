use anyhow::{anyhow, Result};
use std::env;

use crate::services::webdav::WebDAVConfig;

/// Console settings read from the environment (and `.env`), all optional
#[derive(Clone, Default)]
pub struct Config {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub app_password: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_url", &self.server_url)
            .field("username", &self.username)
            .field("app_password", &self.app_password.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let timeout_seconds = match non_empty_var("NEXTCLOUD_TIMEOUT_SECONDS") {
            Some(value) => Some(value.parse().map_err(|e| {
                anyhow!("NEXTCLOUD_TIMEOUT_SECONDS must be a number of seconds, got '{}': {}", value, e)
            })?),
            None => None,
        };

        Ok(Config {
            server_url: non_empty_var("NEXTCLOUD_URL"),
            username: non_empty_var("NEXTCLOUD_USERNAME"),
            app_password: non_empty_var("NEXTCLOUD_APP_PASSWORD"),
            timeout_seconds,
        })
    }

    /// Builds the client configuration once all credentials are known
    pub fn webdav_config(&self) -> Result<WebDAVConfig> {
        let server_url = self.server_url.clone().ok_or_else(|| anyhow!("Server URL not provided"))?;
        let username = self.username.clone().ok_or_else(|| anyhow!("Username not provided"))?;
        let password = self.app_password.clone().ok_or_else(|| anyhow!("App password not provided"))?;

        let mut config = WebDAVConfig::new(server_url, username, password);
        config.timeout_seconds = self.timeout_seconds;
        config.validate()?;

        Ok(config)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
