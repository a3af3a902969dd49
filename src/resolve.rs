//! URL → preview pipeline: site strategies first, generic metadata second,
//! every failure flattened into a two-field result.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::PreviewError;
use crate::http::{HttpClient, ReqwestClient};
use crate::metadata::{MetadataFetcher, OpenGraphFetcher};
use crate::patterns::{Registry, StrategyResult};
use crate::render::render;

/// Exactly one of `error`/`html` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub error: Option<String>,
    pub html: Option<String>,
}

impl ResolutionResult {
    pub fn success(html: Option<String>) -> Self {
        Self { error: None, html }
    }

    pub fn failure(err: &PreviewError) -> Self {
        Self {
            error: Some(err.public_message()),
            html: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct Resolver {
    registry: Registry,
    fallback: Box<dyn MetadataFetcher>,
    http: Arc<dyn HttpClient>,
}

impl Resolver {
    pub fn new(
        registry: Registry,
        fallback: Box<dyn MetadataFetcher>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            registry,
            fallback,
            http,
        }
    }

    /// Built-in strategies, Open Graph fallback and a reqwest client.
    pub fn from_config(config: &Config) -> Result<Self, PreviewError> {
        let http = ReqwestClient::from_config(config)?;
        Ok(Self::new(
            Registry::builtin(config),
            Box::new(OpenGraphFetcher),
            Arc::new(http),
        ))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Never fails: any error is classified into `ResolutionResult::error`.
    pub async fn resolve(&self, url: &str) -> ResolutionResult {
        match self.preview(url).await {
            Ok(html) => ResolutionResult::success(Some(html)),
            Err(e) => {
                warn!(url, kind = ?e.kind(), error = %e, "preview failed");
                ResolutionResult::failure(&e)
            }
        }
    }

    async fn preview(&self, url: &str) -> Result<String, PreviewError> {
        let http = self.http.as_ref();

        // A matched strategy owns the URL: its failure is final.
        let matched = match self.registry.find(url) {
            Some(strategy) => {
                info!("{} matched by {}", url, strategy.name());
                match strategy.extract(url, http).await? {
                    StrategyResult::Embed(markup) if markup.is_empty() => {
                        debug!("{} gave no embed for {}", strategy.name(), url);
                        None
                    }
                    data => Some(data),
                }
            }
            None => None,
        };

        let data = match matched {
            Some(data) => data,
            None => {
                debug!("Reading page metadata for {}", url);
                StrategyResult::Record(self.fallback.extract(url, http).await?)
            }
        };

        Ok(match data {
            StrategyResult::Record(record) => render(&record),
            StrategyResult::Embed(markup) => markup,
        })
    }
}

// ── Tests ──
