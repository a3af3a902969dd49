//! Narrow HTTP seam shared by the metadata fetcher and the site strategies.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::redirect::Policy;
use tracing::debug;

use crate::config::Config;
use crate::error::PreviewError;

/// A successful (2xx) response after redirects have been followed.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Final URL after redirects.
    pub url: String,
    pub headers: HeaderMap,
    pub body: String,
}

/// Single GET. Non-2xx answers must come back as [`PreviewError::Status`],
/// connection-level failures as [`PreviewError::Transport`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, PreviewError>;
}

pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn from_config(config: &Config) -> Result<Self, PreviewError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, PreviewError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/html,application/json;q=0.9,*/*;q=0.8")
            .send()
            .await?
            .error_for_status()?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.text().await?;
        debug!("{} {} ({} bytes)", status, final_url, body.len());

        Ok(HttpResponse {
            status,
            url: final_url,
            headers,
            body,
        })
    }
}


// ── Tests ──
