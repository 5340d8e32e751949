//! Redirect-target resolution for the QR payload.

use crate::error::CardResult;
use lazy_static::lazy_static;
use reqwest::Client;
use serde::Deserialize;

static WISHCARD_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fallback share URL used whenever the redirect endpoint cannot be reached
/// or answers with something unusable.
pub const DEFAULT_REDIRECT_URL: &str = "https://wish.baihehuakai666.asia/";

lazy_static! {
    static ref REQWEST_CLIENT: Client = reqwest::ClientBuilder::new()
        .user_agent(WISHCARD_USER_AGENT)
        .build()
        .expect("Failed to construct reqwest client");
}

/// JSON body of the redirect endpoint.
#[derive(Debug, Deserialize)]
pub struct RedirectTarget {
    /// The canonical share URL.
    pub url: String,
}

/// Resolves the canonical share URL from the wish-wall's redirect endpoint.
///
/// One request per share action, no retries, no caching across calls.
#[derive(Debug, Clone)]
pub struct RedirectResolver {
    base_url: String,
}

impl Default for RedirectResolver {
    fn default() -> Self {
        Self::new("http://127.0.0.1:5000")
    }
}

impl RedirectResolver {
    /// Create a resolver against the given wish-wall origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Fetch the redirect URL from `{base}/api/redirect-url`.
    ///
    /// Transport errors, non-success statuses, and malformed bodies are all
    /// total failures.
    pub async fn resolve(&self) -> CardResult<String> {
        let endpoint = format!("{}/api/redirect-url", self.base_url.trim_end_matches('/'));
        let response = REQWEST_CLIENT
            .get(&endpoint)
            .send()
            .await?
            .error_for_status()?;
        let target: RedirectTarget = response.json().await?;
        Ok(target.url)
    }

    /// Resolve, recovering every failure with [`DEFAULT_REDIRECT_URL`].
    ///
    /// Network failure is never surfaced to the share flow.
    pub async fn resolve_or_default(&self) -> String {
        match self.resolve().await {
            Ok(url) => url,
            Err(err) => {
                log::error!("Failed to fetch redirect url: {err}; using default");
                DEFAULT_REDIRECT_URL.to_string()
            }
        }
    }
}
