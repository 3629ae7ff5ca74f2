// src/core/net.rs
// HTTP GET returning the body as text.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::options::CrawlOptions;
use crate::error::FetchError;

/// Anything that can turn a URL into an HTML body.
///
/// Implementations must be stateless per call so they may be shared, even
/// though the crawl only ever issues one request at a time.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking reqwest client with a per-request timeout.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    pub fn from_options(opts: &CrawlOptions) -> Result<Self, FetchError> {
        Self::new(&opts.user_agent, opts.timeout)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");
        let resp = self.client.get(url).send().map_err(|e| classify(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }
        resp.text().map_err(|e| classify(url, e))
    }
}

fn classify(url: &str, source: reqwest::Error) -> FetchError {
    if source.is_timeout() {
        FetchError::Timeout { url: s!(url) }
    } else {
        FetchError::Transport { url: s!(url), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_user_agent_is_a_client_error() {
        let err = HttpFetcher::new("bad\nagent", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, FetchError::Client(_)));
        assert!(err.to_string().starts_with("could not build HTTP client"));
    }
}
