/// Per-user files root, followed by `/{username}/{path}`
pub const FILES_BASE_PATH: &str = "/remote.php/dav/files";

pub const DAV_NS: &[u8] = b"DAV:";
pub const OWNCLOUD_NS: &[u8] = b"http://owncloud.org/ns";
pub const NEXTCLOUD_NS: &[u8] = b"http://nextcloud.org/ns";
pub const SABREDAV_NS: &[u8] = b"http://sabredav.org/ns";

pub const PROPFIND_BODY: &str = r#"<?xml version="1.0"?>
<d:propfind xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns" xmlns:nc="http://nextcloud.org/ns">
    <d:prop>
        <d:getlastmodified />
        <d:getetag />
        <d:getcontenttype />
        <d:resourcetype />
        <oc:size />
        <nc:contained-folder-count />
        <nc:contained-file-count />
    </d:prop>
</d:propfind>"#;

/// Name used when an href has no usable last segment
pub const UNNAMED_ENTRY: &str = "NONAME";
