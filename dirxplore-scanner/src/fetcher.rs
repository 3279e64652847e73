use crate::error::{Result, ScanError, error_chain};
use crate::item::DirectoryItem;
use crate::listing::parse_listing;
use reqwest::{Client, Proxy, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = concat!("dirxplore/", env!("CARGO_PKG_VERSION"));

/// How outbound connections for a request are opened
#[derive(Debug, Clone)]
pub enum Transport {
    /// Connect straight to the target host
    Direct,
    /// Tunnel every connection through a SOCKS5 proxy
    Socks5(Proxy),
}

impl Transport {
    pub fn is_direct(&self) -> bool {
        matches!(self, Transport::Direct)
    }
}

/// Resolve a proxy URI into a transport, best effort.
///
/// A proxy setting that cannot be used degrades to a direct connection and
/// never fails the crawl. Only `socks5://` and `socks5h://` URIs are accepted.
/// Plain `socks5` is upgraded to `socks5h` so the proxy resolves host names,
/// the same way a SOCKS5 dialer handed an unresolved `host:port` behaves.
pub fn resolve_transport(proxy_uri: &str) -> Transport {
    let proxy_uri = proxy_uri.trim();
    if proxy_uri.is_empty() {
        return Transport::Direct;
    }

    let mut proxy_url = match Url::parse(proxy_uri) {
        Ok(url) => url,
        Err(e) => {
            warn!("Ignoring unparseable proxy URI {:?}: {}", proxy_uri, e);
            return Transport::Direct;
        }
    };

    match proxy_url.scheme() {
        "socks5h" => {}
        "socks5" => {
            if proxy_url.set_scheme("socks5h").is_err() {
                warn!("Ignoring proxy URI {:?}: cannot use remote DNS", proxy_uri);
                return Transport::Direct;
            }
        }
        other => {
            warn!("Ignoring proxy URI {:?}: unsupported scheme {:?}", proxy_uri, other);
            return Transport::Direct;
        }
    }

    match Proxy::all(proxy_url.as_str()) {
        Ok(proxy) => {
            debug!("Routing requests through SOCKS5 proxy {}", proxy_url);
            Transport::Socks5(proxy)
        }
        Err(e) => {
            warn!("Ignoring proxy URI {:?}: {}", proxy_uri, e);
            Transport::Direct
        }
    }
}

/// Fetches a single index page and extracts its entries
pub struct Fetcher {
    transport: Transport,
    timeout: Option<Duration>,
    user_agent: String,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            transport: Transport::Direct,
            timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Route requests through the proxy at `proxy_uri`, falling back to a
    /// direct connection when it is unusable. An empty string means no proxy.
    pub fn with_proxy(mut self, proxy_uri: &str) -> Self {
        self.transport = resolve_transport(proxy_uri);
        self
    }

    /// Bound the whole request, body included. Without this a stalled server
    /// blocks the call indefinitely.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    fn client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(self.user_agent.as_str());
        if let Transport::Socks5(proxy) = &self.transport {
            builder = builder.proxy(proxy.clone());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Issue one GET and return the response if the server answered 200.
    ///
    /// Any other status is an error and the body is dropped unread.
    pub async fn fetch(&self, url: &str) -> Result<Response> {
        debug!("Fetching {}", url);
        let response = self.client()?.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("{} responded with status {}", url, status);
            return Err(ScanError::StatusError(status.as_u16()));
        }
        Ok(response)
    }

    /// Fetch the index page at `url` and extract its entries.
    pub async fn list(&self, url: &str) -> Result<Vec<DirectoryItem>> {
        let mut response = self.fetch(url).await?;

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ScanError::ParseError(error_chain(&e)))?
        {
            body.extend_from_slice(&chunk);
        }
        drop(response);

        let items = parse_listing(&body, url);
        info!("Listed {} entries at {}", items.len(), url);
        Ok(items)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
