use std::sync::LazyLock;

use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::{ErrorReason, NextcloudError, Result};
use crate::webdav_xml_parser::parse_fault;

use super::config::WebDAVConfig;

/// The transport handle of a client: one `reqwest::Client` plus the credentials it sends
pub struct WebDAVConnection {
    client: Client,
    config: WebDAVConfig,
}

impl WebDAVConnection {
    pub fn new(config: WebDAVConfig) -> Result<Self> {
        // Validate configuration first
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| NextcloudError::transport("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// Uses an already configured transport, e.g. one with custom TLS or proxy settings
    pub fn with_client(config: WebDAVConfig, client: Client) -> Result<Self> {
        config.validate()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WebDAVConfig {
        &self.config
    }

    /// Gets the absolute URL for a path in the user's files
    pub fn get_url_for_path(&self, path: &str) -> String {
        self.config.url_for_path(path)
    }

    /// Starts an authenticated request against a path in the user's files
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.get_url_for_path(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
    }

    /// Sends a request once and turns any non-2xx answer into a classified error
    pub async fn send(&self, request: RequestBuilder, context: &str) -> Result<Response> {
        let request = request
            .build()
            .map_err(|e| NextcloudError::transport(context, e))?;

        debug!("{} {}", request.method(), request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| NextcloudError::transport(context, e))?;

        ensure_success(response, context).await
    }
}

/// Passes 2xx responses through; everything else becomes `NextcloudError::Http`
pub async fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let source = response.error_for_status_ref().err();
    let reason = ErrorReason::from(status);
    let url = response.url().clone();

    // Sabre puts a readable explanation into the error body
    let body = response.text().await.unwrap_or_default();
    let message = match parse_fault(&body) {
        Some(fault) => format!("{}: {}", context, fault.message_or_default()),
        None => context.to_string(),
    };

    warn!("{} {} -> {} ({})", context, url, status, reason);

    Err(NextcloudError::Http {
        reason,
        status,
        message,
        source,
    })
}

// WebDAV verbs that `http::Method` has no constant for
pub static PROPFIND: LazyLock<Method> = LazyLock::new(|| extension_method(b"PROPFIND"));
pub static MKCOL: LazyLock<Method> = LazyLock::new(|| extension_method(b"MKCOL"));
pub static MOVE: LazyLock<Method> = LazyLock::new(|| extension_method(b"MOVE"));
pub static COPY: LazyLock<Method> = LazyLock::new(|| extension_method(b"COPY"));

fn extension_method(name: &'static [u8]) -> Method {
    Method::from_bytes(name).expect("WebDAV verbs are valid HTTP method tokens")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webdav_verbs() {
        assert_eq!(PROPFIND.as_str(), "PROPFIND");
        assert_eq!(MKCOL.as_str(), "MKCOL");
        assert_eq!(MOVE.as_str(), "MOVE");
        assert_eq!(COPY.as_str(), "COPY");
    }
}
