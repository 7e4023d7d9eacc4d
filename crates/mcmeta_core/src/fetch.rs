use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{IntoJsonError, JsonDownloadError};

/// Identifies this tool to the metadata servers.
pub const USER_AGENT: &str = concat!("mcmeta/", env!("CARGO_PKG_VERSION"));

/// How long a single request may take before the run is aborted.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const NETWORK_ERROR_MSG: &str = r"
- Check your internet connection
- Check if you are behind a firewall/proxy
- Try doing the action again

";

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Download Error (code {code}){NETWORK_ERROR_MSG}Url: {url}")]
    DownloadError {
        code: mcmeta_reqwest::StatusCode,
        url: mcmeta_reqwest::Url,
    },
    #[error("Network Request Error{NETWORK_ERROR_MSG}{0}")]
    ReqwestError(#[from] mcmeta_reqwest::Error),
}

/// Something that can GET a URL and hand back the body as text.
///
/// The sync pipeline only ever talks to the network through this,
/// so the transport can be swapped out (in tests, for example).
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// # Errors
    /// If the request could not be sent, timed out,
    /// or came back with a non-success status code.
    async fn fetch_text(&self, url: &str) -> Result<String, RequestError>;
}

/// Downloads `url` through `fetcher` and parses it
/// into anything implementing `serde::Deserialize`.
///
/// # Errors
/// Returns an error if:
/// - the request fails (see [`Fetcher::fetch_text`])
/// - the body isn't valid JSON of the expected shape
pub async fn fetch_json<T: DeserializeOwned>(
    fetcher: &dyn Fetcher,
    url: &str,
) -> Result<T, JsonDownloadError> {
    let text = fetcher.fetch_text(url).await?;
    Ok(serde_json::from_str(&text).json(text)?)
}

/// The production [`Fetcher`], backed by a `reqwest` client
/// with a total-request timeout. No retries are attempted.
pub struct ReqwestFetcher {
    client: mcmeta_reqwest::Client,
}

impl ReqwestFetcher {
    /// # Errors
    /// If the TLS backend could not be initialized.
    pub fn new(timeout: Duration) -> Result<Self, RequestError> {
        let client = mcmeta_reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, RequestError> {
        let response = self.client.get(url).send().await?;
        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(RequestError::DownloadError {
                code: response.status(),
                url: response.url().clone(),
            })
        }
    }
}
