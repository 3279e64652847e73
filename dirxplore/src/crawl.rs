use dirxplore_scanner::error::Result;
use dirxplore_scanner::{DirectoryItem, Fetcher, ScanError};
use tracing::{info, warn};

pub(crate) const ENCODE_FAILURE: &str = r#"{"error": "JSON error"}"#;

/// Crawl one directory index page and return the JSON result.
///
/// Blocks until the page has been fetched and parsed. The result is either a
/// JSON array of entries or an object with a single `error` field. An
/// unusable `proxy_uri` silently falls back to a direct connection; pass an
/// empty string for no proxy.
///
/// No timeout is applied, so a server that stalls mid-response blocks the
/// caller until the connection is closed.
///
/// # Panics
///
/// Panics if called from within a tokio runtime, since it starts its own.
/// Async callers should use [`dirxplore_scanner::Fetcher`] directly.
pub fn crawl(target_url: &str, proxy_uri: &str) -> String {
    match list(target_url, proxy_uri).and_then(|items| encode_items(&items)) {
        Ok(json) => json,
        Err(e) => {
            warn!("Crawl of {} failed: {}", target_url, e);
            encode_error(&e)
        }
    }
}

fn list(target_url: &str, proxy_uri: &str) -> Result<Vec<DirectoryItem>> {
    // One runtime per call; nothing is shared between host calls.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let fetcher = Fetcher::new().with_proxy(proxy_uri);
    let items = runtime.block_on(fetcher.list(target_url))?;
    info!("Crawl of {} returned {} entries", target_url, items.len());
    Ok(items)
}

/// Serialize entries as a compact JSON array.
pub fn encode_items(items: &[DirectoryItem]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

/// Render an error as `{"error": "<message>"}`.
pub fn encode_error(err: &ScanError) -> String {
    match serde_json::to_string(&err.to_string()) {
        Ok(message) => format!(r#"{{"error": {}}}"#, message),
        Err(_) => ENCODE_FAILURE.to_string(),
    }
}
