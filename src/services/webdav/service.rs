use std::path::Path;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Method};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use crate::errors::{NextcloudError, Result};
use crate::models::DirectoryEntry;
use crate::webdav_xml_parser::parse_listing;

use super::config::WebDAVConfig;
use super::connection::{WebDAVConnection, COPY, MKCOL, MOVE, PROPFIND};
use super::constants::PROPFIND_BODY;

/// Depth used by [`NextcloudClient::list_directory`]: the collection and its direct children
pub const DEFAULT_LIST_DEPTH: i32 = 1;

/// A client for one user's files on a Nextcloud server.
///
/// The transport handle is acquired in [`NextcloudClient::new`] and released
/// when the client is dropped or passed to [`NextcloudClient::close`]. Every
/// operation issues exactly one request; failures are returned as
/// [`NextcloudError`] and never retried. Operations borrow the client, so one
/// instance can serve concurrent callers behind an `Arc`.
pub struct NextcloudClient {
    connection: WebDAVConnection,
}

impl NextcloudClient {
    pub fn new(config: WebDAVConfig) -> Result<Self> {
        let connection = WebDAVConnection::new(config)?;
        debug!(
            "Created Nextcloud client for {} at {}",
            connection.config().username,
            connection.config().server_url
        );
        Ok(Self { connection })
    }

    /// Builds a client on top of an existing `reqwest::Client`
    pub fn with_http_client(config: WebDAVConfig, client: Client) -> Result<Self> {
        Ok(Self {
            connection: WebDAVConnection::with_client(config, client)?,
        })
    }

    pub fn username(&self) -> &str {
        &self.connection.config().username
    }

    pub fn server_url(&self) -> &str {
        &self.connection.config().server_url
    }

    /// Releases the transport handle. Consuming `self` rules out use after close.
    pub fn close(self) {
        debug!("Closing Nextcloud client for {}", self.username());
    }

    /// Lists the direct children of a folder
    pub async fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>> {
        self.list(path, DEFAULT_LIST_DEPTH).await
    }

    /// Lists a folder with a PROPFIND of the given depth. The folder itself is not part of the result.
    pub async fn list(&self, path: &str, depth: i32) -> Result<Vec<DirectoryEntry>> {
        if depth < 0 {
            return Err(NextcloudError::InvalidDepth { depth });
        }

        let context = "Fetching folder content failed";
        let request = self
            .connection
            .request(PROPFIND.clone(), path)
            .header("Depth", depth.to_string())
            .header(CONTENT_TYPE, "application/xml; charset=utf-8")
            .body(PROPFIND_BODY);

        let response = self.connection.send(request, context).await?;
        let body = response
            .text()
            .await
            .map_err(|e| NextcloudError::transport(context, e))?;

        let entries = parse_listing(&body, path)?;
        debug!("Listed {} entries in {}", entries.len(), path);

        Ok(entries)
    }

    /// Moves a file or folder; `overwrite` replaces an existing destination
    pub async fn move_item(&self, source: &str, destination: &str, overwrite: bool) -> Result<()> {
        self.transfer(MOVE.clone(), source, destination, overwrite, "Moving element failed")
            .await?;
        info!("📦 Moved {} to {}", source, destination);
        Ok(())
    }

    /// Copies a file or folder; `overwrite` replaces an existing destination
    pub async fn copy_item(&self, source: &str, destination: &str, overwrite: bool) -> Result<()> {
        self.transfer(COPY.clone(), source, destination, overwrite, "Copying element failed")
            .await?;
        info!("📋 Copied {} to {}", source, destination);
        Ok(())
    }

    /// Deletes a file or folder
    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.connection.request(Method::DELETE, path);
        self.connection
            .send(request, "Deleting element failed")
            .await?;
        info!("🗑️ Deleted {}", path);
        Ok(())
    }

    pub async fn create_folder(&self, path: &str) -> Result<()> {
        let request = self.connection.request(MKCOL.clone(), path);
        self.connection
            .send(request, "Creating folder failed")
            .await?;
        info!("📁 Created folder {}", path);
        Ok(())
    }

    /// Downloads a file, replacing `local_destination` if it exists.
    ///
    /// A failure while the body is streaming leaves the partially written
    /// local file in place.
    pub async fn download(&self, path: &str, local_destination: impl AsRef<Path>) -> Result<()> {
        let context = "Fetching element failed";
        let local_destination = local_destination.as_ref();

        let request = self.connection.request(Method::GET, path);
        let response = self.connection.send(request, context).await?;

        let mut file = tokio::fs::File::create(local_destination)
            .await
            .map_err(|e| {
                NextcloudError::io(
                    format!("{}: cannot create {}", context, local_destination.display()),
                    e,
                )
            })?;

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| NextcloudError::transport(context, e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| NextcloudError::io(context, e))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| NextcloudError::io(context, e))?;

        info!("⬇️ Downloaded {} ({} bytes) to {}", path, written, local_destination.display());
        Ok(())
    }

    /// Uploads a local file, streaming its bytes as the PUT body.
    ///
    /// The content type is guessed from the remote path's extension and left
    /// out when the extension is unknown.
    pub async fn upload(&self, local_source: impl AsRef<Path>, remote_path: &str) -> Result<()> {
        let context = "Uploading element failed";
        let local_source = local_source.as_ref();

        let file = tokio::fs::File::open(local_source).await.map_err(|e| {
            NextcloudError::io(
                format!("{}: cannot open {}", context, local_source.display()),
                e,
            )
        })?;
        let length = file
            .metadata()
            .await
            .map_err(|e| NextcloudError::io(context, e))?
            .len();

        let mut request = self
            .connection
            .request(Method::PUT, remote_path)
            .header(CONTENT_LENGTH, length.to_string())
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)));

        if let Some(mime) = mime_guess::from_path(remote_path).first() {
            request = request.header(CONTENT_TYPE, mime.essence_str());
        }

        self.connection.send(request, context).await?;
        info!("⬆️ Uploaded {} ({} bytes) to {}", local_source.display(), length, remote_path);
        Ok(())
    }

    async fn transfer(
        &self,
        method: Method,
        source: &str,
        destination: &str,
        overwrite: bool,
        context: &str,
    ) -> Result<()> {
        let request = self
            .connection
            .request(method, source)
            .header("Destination", self.connection.get_url_for_path(destination))
            .header("Overwrite", if overwrite { "T" } else { "F" });

        self.connection.send(request, context).await?;
        Ok(())
    }
}
