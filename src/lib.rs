pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod webdav_xml_parser;

pub use errors::{ErrorReason, NextcloudError};
pub use models::{DirectoryEntry, EntityKind};
pub use services::webdav::{NextcloudClient, WebDAVConfig};
