use std::time::Duration;

use reqwest::Client;

use crate::error::FetchError;

/// HTTP client for forum list pages.
///
/// One GET per call, no retry: a failed target waits for the next scheduled
/// cycle. The request timeout bounds how long a stuck fetch can hold up the
/// sequential cycle.
#[derive(Debug, Clone)]
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the body decoded as UTF-8.
    ///
    /// The forum declares UTF-8 but occasionally ships stray bytes; those are
    /// replaced rather than failing the whole page.
    ///
    /// # Errors
    ///
    /// - [`FetchError::UnexpectedStatus`]: any non-2xx status.
    /// - [`FetchError::Http`]: network, TLS or timeout failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
