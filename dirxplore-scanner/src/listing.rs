use crate::item::{DirectoryItem, EntryType};
use scraper::{ElementRef, Html};
use tracing::debug;

const PARENT_HREF: &str = "../";
const PARENT_TEXT: &str = "parent directory";
const COLUMN_HEADERS: [&str; 3] = ["Name", "Size", "Date"];

/// Extract listing entries from the raw bytes of an index page.
///
/// Invalid UTF-8 sequences are replaced rather than rejected, so a page in a
/// legacy encoding still yields its ASCII file names.
pub fn parse_listing(body: &[u8], base_url: &str) -> Vec<DirectoryItem> {
    extract_listing(&String::from_utf8_lossy(body), base_url)
}

/// Walk the parsed document in pre-order and collect one entry per anchor
/// that looks like a file or subdirectory link.
///
/// The returned list follows document order and is empty (never absent) when
/// nothing qualifies.
pub fn extract_listing(html: &str, base_url: &str) -> Vec<DirectoryItem> {
    let document = Html::parse_document(html);
    let mut items = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(anchor) = ElementRef::wrap(node) else {
            continue;
        };
        if anchor.value().name() != "a" {
            continue;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let text = anchor_text(anchor);
        if is_noise(href, &text) {
            debug!("Skipping anchor href={:?} text={:?}", href, text);
            continue;
        }

        let entry_type = if href.ends_with('/') {
            EntryType::Directory
        } else {
            EntryType::File
        };

        let name = match entry_type {
            EntryType::Directory => text.strip_suffix('/').unwrap_or(&text).to_string(),
            EntryType::File => text,
        };

        items.push(DirectoryItem::new(name, resolve_href(base_url, href), entry_type));
    }

    debug!("Extracted {} entries from listing at {}", items.len(), base_url);
    items
}

/// Visible text of an anchor: all descendant text nodes in document order,
/// trimmed once as a whole.
pub fn anchor_text(anchor: ElementRef<'_>) -> String {
    anchor.text().collect::<String>().trim().to_string()
}

/// Navigation and header anchors that never name a listing entry.
pub fn is_noise(href: &str, text: &str) -> bool {
    href == PARENT_HREF
        || text.to_lowercase() == PARENT_TEXT
        || COLUMN_HEADERS.contains(&text)
        || href.is_empty()
}

/// Turn an href into an absolute URL against the page it was found on.
///
/// Anything starting with `http` is taken as already absolute. This is a
/// plain prefix test, so `httpdocs/` is treated as absolute too and
/// scheme-relative `//host/x` is appended to the base.
pub fn resolve_href(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    if base_url.ends_with('/') {
        format!("{}{}", base_url, href)
    } else {
        format!("{}/{}", base_url, href)
    }
}
