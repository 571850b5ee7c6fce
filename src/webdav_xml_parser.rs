use chrono::{DateTime, Utc};
use quick_xml::errors::IllFormedError;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::warn;

use crate::errors::{NextcloudError, Result};
use crate::models::{DirectoryEntry, EntityKind};
use crate::services::webdav::constants::{
    DAV_NS, NEXTCLOUD_NS, OWNCLOUD_NS, SABREDAV_NS, UNNAMED_ENTRY,
};

/// Elements of a multi-status or fault document that carry data we use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Response,
    Href,
    LastModified,
    Etag,
    ContentType,
    ResourceType,
    Collection,
    Size,
    FolderCount,
    FileCount,
    Exception,
    Message,
    RemoteAddress,
    RequestId,
    Other,
}

impl Node {
    fn resolve(ns: &ResolveResult, local: &[u8]) -> Self {
        let namespace: &[u8] = match ns {
            ResolveResult::Bound(Namespace(ns)) => *ns,
            _ => b"",
        };

        match (namespace, local) {
            (DAV_NS, b"response") => Node::Response,
            (DAV_NS, b"href") => Node::Href,
            (DAV_NS, b"getlastmodified") => Node::LastModified,
            (DAV_NS, b"getetag") => Node::Etag,
            (DAV_NS, b"getcontenttype") => Node::ContentType,
            (DAV_NS, b"resourcetype") => Node::ResourceType,
            (DAV_NS, b"collection") => Node::Collection,
            (OWNCLOUD_NS, b"size") => Node::Size,
            (NEXTCLOUD_NS, b"contained-folder-count") => Node::FolderCount,
            (NEXTCLOUD_NS, b"contained-file-count") => Node::FileCount,
            (SABREDAV_NS, b"exception") => Node::Exception,
            (SABREDAV_NS, b"message") => Node::Message,
            (SABREDAV_NS, b"remote-address") => Node::RemoteAddress,
            (SABREDAV_NS, b"request-id") => Node::RequestId,
            _ => Node::Other,
        }
    }
}

#[derive(Debug, Default)]
struct PropFindResponse {
    href: String,
    size: Option<String>,
    folder_count: Option<String>,
    file_count: Option<String>,
    content_type: Option<String>,
    etag: Option<String>,
    last_modified: Option<String>,
    is_collection: bool,
}

/// Parts of a sabredav fault document; a fault exists once the exception element was seen
#[derive(Debug, Default)]
pub struct FaultDetails {
    pub exception: String,
    pub message: Option<String>,
    pub remote_address: Option<String>,
    pub request_id: Option<String>,
}

impl FaultDetails {
    pub fn message_or_default(&self) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or("An error occurred")
            .to_string()
    }

    fn into_error(self) -> NextcloudError {
        NextcloudError::Fault {
            message: self.message_or_default(),
            exception: self.exception,
            remote_address: self.remote_address,
            request_id: self.request_id,
        }
    }
}

#[derive(Debug, Default)]
struct ScannedDocument {
    responses: Vec<PropFindResponse>,
    fault: Option<FaultDetails>,
}

fn malformed(source: quick_xml::Error) -> NextcloudError {
    NextcloudError::Parse {
        message: "Malformed multi-status response".to_string(),
        source: Some(source),
    }
}

/// Document-level problems the reader accepts but that are not a single XML document
fn not_a_document(details: &str) -> NextcloudError {
    NextcloudError::Parse {
        message: format!("Malformed multi-status response: {}", details),
        source: None,
    }
}

fn append(slot: &mut Option<String>, text: &str) {
    slot.get_or_insert_with(String::new).push_str(text);
}

fn scan_document(xml_text: &str) -> Result<ScannedDocument> {
    let mut reader = NsReader::from_str(xml_text);
    reader.config_mut().trim_text(true);

    let mut document = ScannedDocument::default();
    let mut current_response: Option<PropFindResponse> = None;
    let mut current_node: Option<Node> = None;
    let mut in_resourcetype = false;
    let mut saw_exception = false;
    let mut open_elements: Vec<String> = Vec::new();
    let mut saw_root = false;

    loop {
        match reader.read_resolved_event().map_err(malformed)? {
            (ns, Event::Start(e)) => {
                if open_elements.is_empty() {
                    if saw_root {
                        return Err(not_a_document("more than one root element"));
                    }
                    saw_root = true;
                }
                open_elements.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());

                let node = Node::resolve(&ns, e.local_name().as_ref());
                match node {
                    Node::Response => {
                        current_response = Some(PropFindResponse::default());
                    }
                    Node::ResourceType => {
                        in_resourcetype = true;
                    }
                    Node::Collection if in_resourcetype => {
                        if let Some(ref mut resp) = current_response {
                            resp.is_collection = true;
                        }
                    }
                    Node::Exception => {
                        saw_exception = true;
                        current_node = Some(node);
                    }
                    _ => {
                        current_node = Some(node);
                    }
                }
            }
            (ns, Event::Empty(e)) => {
                if open_elements.is_empty() {
                    if saw_root {
                        return Err(not_a_document("more than one root element"));
                    }
                    saw_root = true;
                }

                match Node::resolve(&ns, e.local_name().as_ref()) {
                    Node::Collection if in_resourcetype => {
                        if let Some(ref mut resp) = current_response {
                            resp.is_collection = true;
                        }
                    }
                    Node::Exception => {
                        saw_exception = true;
                    }
                    _ => {}
                }
            }
            // Whitespace is trimmed away, so any text event here is content
            (_, Event::Text(_)) | (_, Event::CData(_)) if open_elements.is_empty() => {
                return Err(not_a_document("text outside the root element"));
            }
            (_, Event::Text(e)) => {
                let Some(node) = current_node else { continue };
                let text = e.unescape().map_err(|err| malformed(err.into()))?;

                match node {
                    Node::Exception | Node::Message | Node::RemoteAddress | Node::RequestId => {
                        let fault = document.fault.get_or_insert_with(FaultDetails::default);
                        match node {
                            Node::Exception => fault.exception.push_str(&text),
                            Node::Message => append(&mut fault.message, &text),
                            Node::RemoteAddress => append(&mut fault.remote_address, &text),
                            _ => append(&mut fault.request_id, &text),
                        }
                    }
                    _ => {
                        if let Some(ref mut resp) = current_response {
                            match node {
                                Node::Href => resp.href.push_str(&text),
                                Node::Size => append(&mut resp.size, &text),
                                Node::FolderCount => append(&mut resp.folder_count, &text),
                                Node::FileCount => append(&mut resp.file_count, &text),
                                Node::ContentType => append(&mut resp.content_type, &text),
                                Node::Etag => append(&mut resp.etag, &text),
                                Node::LastModified => append(&mut resp.last_modified, &text),
                                _ => {}
                            }
                        }
                    }
                }
            }
            (ns, Event::End(e)) => {
                open_elements.pop();
                match Node::resolve(&ns, e.local_name().as_ref()) {
                    Node::Response => {
                        if let Some(resp) = current_response.take() {
                            document.responses.push(resp);
                        }
                    }
                    Node::ResourceType => {
                        in_resourcetype = false;
                    }
                    _ => {}
                }
                current_node = None;
            }
            (_, Event::Eof) => {
                // A truncated body ends with its innermost element still open
                if let Some(name) = open_elements.pop() {
                    return Err(malformed(quick_xml::Error::IllFormed(
                        IllFormedError::MissingEndTag(name),
                    )));
                }
                if !saw_root {
                    return Err(not_a_document("no root element"));
                }
                break;
            }
            _ => {}
        }
    }

    // The exception element is the fault marker; the other sabredav parts are only details.
    if !saw_exception {
        document.fault = None;
    } else if document.fault.is_none() {
        document.fault = Some(FaultDetails::default());
    }

    Ok(document)
}

/// Extracts the sabredav fault of an error body, if it has one
pub fn parse_fault(xml_text: &str) -> Option<FaultDetails> {
    scan_document(xml_text).ok().and_then(|doc| doc.fault)
}

/// Parses a PROPFIND multi-status body into the children of `queried_path`.
///
/// The entry describing `queried_path` itself is dropped: any response whose
/// decoded href ends with the queried path, with or without a trailing slash.
/// For the root path every href would match, so there the first response is
/// taken as the collection itself. A fault document is always an error, even
/// if it also contains well-formed responses.
pub fn parse_listing(xml_text: &str, queried_path: &str) -> Result<Vec<DirectoryEntry>> {
    let document = scan_document(xml_text)?;

    if let Some(fault) = document.fault {
        return Err(fault.into_error());
    }

    let parent = queried_path.trim_end_matches('/').to_string();
    let self_suffix = format!("/{}", queried_path.trim_matches('/'));
    let listing_root = self_suffix == "/";

    let entries = document
        .responses
        .into_iter()
        .enumerate()
        .filter_map(|(index, resp)| {
            let href = decode_href(&resp.href);
            let is_self = if listing_root {
                index == 0
            } else {
                href.ends_with(&self_suffix) || href.ends_with(&format!("{}/", self_suffix))
            };
            if is_self {
                return None;
            }

            Some(DirectoryEntry {
                name: entry_name(&href),
                parent: Some(parent.clone()),
                kind: if resp.is_collection {
                    EntityKind::Folder
                } else {
                    EntityKind::File
                },
                etag: resp.etag,
                mime_type: resp.content_type.unwrap_or_default(),
                size: parse_count(resp.size.as_deref()),
                last_modified: last_modified_or_now(resp.last_modified.as_deref(), &href),
                contained_folder_count: parse_count(resp.folder_count.as_deref()),
                contained_file_count: parse_count(resp.file_count.as_deref()),
            })
        })
        .collect();

    Ok(entries)
}

fn decode_href(href: &str) -> String {
    urlencoding::decode(href)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| href.to_string())
}

fn entry_name(href: &str) -> String {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(UNNAMED_ENTRY)
        .to_string()
}

/// Missing or non-numeric counts are 0
fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

fn last_modified_or_now(value: Option<&str>, href: &str) -> DateTime<Utc> {
    match value.and_then(parse_http_date) {
        Some(date) => date,
        None => {
            warn!(
                "Missing or unparsable last-modified value {:?} for {}, using current time",
                value, href
            );
            Utc::now()
        }
    }
}

fn parse_http_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    // WebDAV servers send RFC 2822 / RFC 1123 dates
    DateTime::parse_from_rfc2822(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            DateTime::parse_from_rfc3339(date_str)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(date_str, "%a, %d %b %Y %H:%M:%S GMT")
                .ok()
                .map(|ndt| DateTime::from_naive_utc_and_offset(ndt, Utc))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DOCS_LISTING: &str = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:" xmlns:s="http://sabredav.org/ns" xmlns:oc="http://owncloud.org/ns" xmlns:nc="http://nextcloud.org/ns">
    <d:response>
        <d:href>/remote.php/dav/files/admin/docs/</d:href>
        <d:propstat>
            <d:prop>
                <d:getlastmodified>Mon, 15 Jan 2024 14:30:00 GMT</d:getlastmodified>
                <d:getetag>"root123"</d:getetag>
                <d:resourcetype><d:collection/></d:resourcetype>
                <oc:size>2049024</oc:size>
                <nc:contained-folder-count>1</nc:contained-folder-count>
                <nc:contained-file-count>1</nc:contained-file-count>
            </d:prop>
            <d:status>HTTP/1.1 200 OK</d:status>
        </d:propstat>
    </d:response>
    <d:response>
        <d:href>/remote.php/dav/files/admin/docs/report.pdf</d:href>
        <d:propstat>
            <d:prop>
                <d:getlastmodified>Mon, 15 Jan 2024 14:30:00 GMT</d:getlastmodified>
                <d:getetag>"pdf123"</d:getetag>
                <d:getcontenttype>application/pdf</d:getcontenttype>
                <d:resourcetype/>
                <oc:size>2048000</oc:size>
            </d:prop>
            <d:status>HTTP/1.1 200 OK</d:status>
        </d:propstat>
        <d:propstat>
            <d:prop>
                <nc:contained-folder-count/>
                <nc:contained-file-count/>
            </d:prop>
            <d:status>HTTP/1.1 404 Not Found</d:status>
        </d:propstat>
    </d:response>
    <d:response>
        <d:href>/remote.php/dav/files/admin/docs/Projects/</d:href>
        <d:propstat>
            <d:prop>
                <d:getlastmodified>Tue, 16 Jan 2024 09:00:00 GMT</d:getlastmodified>
                <d:getetag>"dir456"</d:getetag>
                <d:resourcetype><d:collection/></d:resourcetype>
                <oc:size>1024</oc:size>
                <nc:contained-folder-count>3</nc:contained-folder-count>
                <nc:contained-file-count>7</nc:contained-file-count>
            </d:prop>
            <d:status>HTTP/1.1 200 OK</d:status>
        </d:propstat>
        <d:propstat>
            <d:prop>
                <d:getcontenttype/>
            </d:prop>
            <d:status>HTTP/1.1 404 Not Found</d:status>
        </d:propstat>
    </d:response>
</d:multistatus>"#;

    #[test]
    fn test_parse_file_and_folder_in_document_order() {
        let entries = parse_listing(DOCS_LISTING, "/docs").unwrap();
        assert_eq!(entries.len(), 2);

        let file = &entries[0];
        assert_eq!(file.name, "report.pdf");
        assert_eq!(file.kind, EntityKind::File);
        assert_eq!(file.size, 2048000);
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.etag.as_deref(), Some("\"pdf123\""));
        assert_eq!(file.contained_folder_count, 0);
        assert_eq!(file.contained_file_count, 0);
        assert_eq!(file.path().as_deref(), Some("/docs/report.pdf"));
        assert_eq!(
            file.last_modified,
            Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()
        );

        let folder = &entries[1];
        assert_eq!(folder.name, "Projects");
        assert!(folder.is_folder());
        assert_eq!(folder.mime_type, "");
        assert_eq!(folder.contained_folder_count, 3);
        assert_eq!(folder.contained_file_count, 7);
        assert_eq!(folder.path().as_deref(), Some("/docs/Projects"));
    }

    #[test]
    fn test_self_entry_only_yields_empty_listing() {
        let xml = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:">
            <d:response>
                <d:href>/remote.php/dav/files/admin/docs</d:href>
                <d:propstat>
                    <d:prop><d:resourcetype><d:collection/></d:resourcetype></d:prop>
                    <d:status>HTTP/1.1 200 OK</d:status>
                </d:propstat>
            </d:response>
        </d:multistatus>"#;

        assert!(parse_listing(xml, "/docs").unwrap().is_empty());
    }

    #[test]
    fn test_self_entry_with_trailing_slash_is_skipped() {
        let entries = parse_listing(DOCS_LISTING, "docs").unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.name != "docs"));
        assert_eq!(entries[0].path().as_deref(), Some("docs/report.pdf"));
    }

    #[test]
    fn test_child_sharing_suffix_with_query_is_kept() {
        let xml = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:">
            <d:response><d:href>/remote.php/dav/files/admin/docs/</d:href></d:response>
            <d:response><d:href>/remote.php/dav/files/admin/docs/olddocs/</d:href></d:response>
        </d:multistatus>"#;

        let entries = parse_listing(xml, "/docs").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "olddocs");
    }

    #[test]
    fn test_root_listing_skips_first_response() {
        let xml = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:">
            <d:response>
                <d:href>/remote.php/dav/files/admin/</d:href>
                <d:propstat><d:prop><d:resourcetype><d:collection/></d:resourcetype></d:prop></d:propstat>
            </d:response>
            <d:response>
                <d:href>/remote.php/dav/files/admin/Photos/</d:href>
                <d:propstat><d:prop><d:resourcetype><d:collection/></d:resourcetype></d:prop></d:propstat>
            </d:response>
            <d:response>
                <d:href>/remote.php/dav/files/admin/notes.md</d:href>
            </d:response>
        </d:multistatus>"#;

        let entries = parse_listing(xml, "/").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Photos");
        assert_eq!(entries[0].path().as_deref(), Some("/Photos"));
        assert_eq!(entries[1].name, "notes.md");
    }

    #[test]
    fn test_missing_numeric_properties_default_to_zero() {
        let xml = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns" xmlns:nc="http://nextcloud.org/ns">
            <d:response>
                <d:href>/remote.php/dav/files/admin/docs/a.txt</d:href>
                <d:propstat>
                    <d:prop>
                        <oc:size>not-a-number</oc:size>
                        <nc:contained-file-count>-4</nc:contained-file-count>
                    </d:prop>
                </d:propstat>
            </d:response>
        </d:multistatus>"#;

        let entries = parse_listing(xml, "/docs").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 0);
        assert_eq!(entries[0].contained_folder_count, 0);
        assert_eq!(entries[0].contained_file_count, 0);
        assert_eq!(entries[0].etag, None);
        assert_eq!(entries[0].mime_type, "");
    }

    #[test]
    fn test_unparsable_date_falls_back_to_now() {
        let xml = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:">
            <d:response>
                <d:href>/remote.php/dav/files/admin/docs/a.txt</d:href>
                <d:propstat><d:prop><d:getlastmodified>yesterday-ish</d:getlastmodified></d:prop></d:propstat>
            </d:response>
        </d:multistatus>"#;

        let before = Utc::now();
        let entries = parse_listing(xml, "/docs").unwrap();
        assert!(entries[0].last_modified >= before);
    }

    #[test]
    fn test_url_encoded_names_are_decoded() {
        let xml = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:">
            <d:response><d:href>/remote.php/dav/files/admin/My%20Docs/</d:href></d:response>
            <d:response><d:href>/remote.php/dav/files/admin/My%20Docs/File%20with%20spaces.pdf</d:href></d:response>
        </d:multistatus>"#;

        let entries = parse_listing(xml, "My Docs").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "File with spaces.pdf");
    }

    #[test]
    fn test_properties_outside_dav_namespace_are_ignored() {
        let xml = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:" xmlns:x="urn:example">
            <d:response>
                <d:href>/remote.php/dav/files/admin/docs/a.txt</d:href>
                <d:propstat><d:prop><x:size>99</x:size><x:getetag>"nope"</x:getetag></d:prop></d:propstat>
            </d:response>
        </d:multistatus>"#;

        let entries = parse_listing(xml, "/docs").unwrap();
        assert_eq!(entries[0].size, 0);
        assert_eq!(entries[0].etag, None);
    }

    #[test]
    fn test_fault_document_raises() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
        <d:error xmlns:d="DAV:" xmlns:s="http://sabredav.org/ns">
            <s:exception>Sabre\DAV\Exception\NotFound</s:exception>
            <s:message>File with name docs could not be located</s:message>
            <s:remote-address>192.168.1.20</s:remote-address>
            <s:request-id>abc-123</s:request-id>
        </d:error>"#;

        match parse_listing(xml, "/docs") {
            Err(NextcloudError::Fault { exception, message, remote_address, request_id }) => {
                assert_eq!(exception, "Sabre\\DAV\\Exception\\NotFound");
                assert_eq!(message, "File with name docs could not be located");
                assert_eq!(remote_address.as_deref(), Some("192.168.1.20"));
                assert_eq!(request_id.as_deref(), Some("abc-123"));
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_fault_wins_over_entries() {
        let xml = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:" xmlns:s="http://sabredav.org/ns">
            <d:response><d:href>/remote.php/dav/files/admin/docs/a.txt</d:href></d:response>
            <s:exception>Sabre\DAV\Exception\ServiceUnavailable</s:exception>
        </d:multistatus>"#;

        match parse_listing(xml, "/docs") {
            Err(NextcloudError::Fault { message, remote_address, request_id, .. }) => {
                assert_eq!(message, "An error occurred");
                assert!(remote_address.is_none());
                assert!(request_id.is_none());
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_xml_is_wrapped() {
        let xml = r#"<d:multistatus xmlns:d="DAV:"><d:response></d:href></d:multistatus>"#;

        let err = parse_listing(xml, "/docs").unwrap_err();
        assert!(matches!(err, NextcloudError::Parse { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_body_without_root_element_is_rejected() {
        for body in ["", "   \n  ", "Internal Server Error"] {
            match parse_listing(body, "/docs") {
                Err(NextcloudError::Parse { source, .. }) => assert!(source.is_none(), "body {:?}", body),
                other => panic!("expected parse error for {:?}, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_truncated_multistatus_is_rejected() {
        let xml = r#"<d:multistatus xmlns:d="DAV:"><d:response><d:href>/remote.php/dav/files/a/docs/x</d:href>"#;

        let err = parse_listing(xml, "/docs").unwrap_err();
        assert!(matches!(err, NextcloudError::Parse { source: Some(_), .. }));
        assert!(std::error::Error::source(&err).unwrap().to_string().contains("d:response"));
    }

    #[test]
    fn test_unclosed_html_page_is_rejected() {
        let err = parse_listing("<html><body>Login", "/docs").unwrap_err();
        assert!(matches!(err, NextcloudError::Parse { .. }));
    }

    #[test]
    fn test_text_after_root_is_rejected() {
        let xml = r#"<d:multistatus xmlns:d="DAV:"></d:multistatus>trailing garbage"#;
        assert!(matches!(parse_listing(xml, "/docs"), Err(NextcloudError::Parse { .. })));

        let two_roots = r#"<d:multistatus xmlns:d="DAV:"/><d:multistatus xmlns:d="DAV:"/>"#;
        assert!(matches!(parse_listing(two_roots, "/docs"), Err(NextcloudError::Parse { .. })));
    }

    #[test]
    fn test_self_closing_root_is_an_empty_listing() {
        let xml = r#"<?xml version="1.0"?><d:multistatus xmlns:d="DAV:"/>"#;
        assert!(parse_listing(xml, "/docs").unwrap().is_empty());
    }

    #[test]
    fn test_empty_multistatus() {
        let xml = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:">
        </d:multistatus>"#;

        assert!(parse_listing(xml, "/docs").unwrap().is_empty());
    }

    #[test]
    fn test_entry_name_fallback() {
        assert_eq!(entry_name("/a/b/c.txt"), "c.txt");
        assert_eq!(entry_name("/a/b/"), "b");
        assert_eq!(entry_name("/"), "NONAME");
        assert_eq!(entry_name(""), "NONAME");
    }

    #[test]
    fn test_parse_fault_of_plain_error_body() {
        assert!(parse_fault("Internal Server Error").is_none());
        assert!(parse_fault("").is_none());

        let fault = parse_fault(
            r#"<d:error xmlns:d="DAV:" xmlns:s="http://sabredav.org/ns"><s:exception>Sabre\DAV\Exception\Forbidden</s:exception><s:message>No write access</s:message></d:error>"#,
        )
        .unwrap();
        assert_eq!(fault.message_or_default(), "No write access");
    }
}
