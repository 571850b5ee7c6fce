use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    File,
    Folder,
}

/// One child of a listed collection, built fresh from a PROPFIND response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    /// The path that was listed to find this entry
    pub parent: Option<String>,
    pub kind: EntityKind,
    pub etag: Option<String>,
    /// Empty when the server reports no content type, which is always the case for folders
    pub mime_type: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    /// Only meaningful for folders
    pub contained_folder_count: u64,
    /// Only meaningful for folders
    pub contained_file_count: u64,
}

impl DirectoryEntry {
    /// `parent/name`, or `None` when the parent is unknown
    pub fn path(&self) -> Option<String> {
        self.parent
            .as_ref()
            .map(|parent| format!("{}/{}", parent, self.name))
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntityKind::Folder
    }
}
