// WebDAV client modules for the Nextcloud files endpoint

pub mod config;
pub mod connection;
pub mod constants;
pub mod service;

// Re-export main types for convenience
pub use config::WebDAVConfig;
pub use connection::WebDAVConnection;
pub use service::{NextcloudClient, DEFAULT_LIST_DEPTH};
