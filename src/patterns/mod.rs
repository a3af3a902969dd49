pub mod amazon;
pub mod github;
pub mod twitter;
pub mod wikipedia;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::PreviewError;
use crate::http::HttpClient;
use crate::metadata::MetadataRecord;

/// What a site strategy hands back: either a record for the renderer or a
/// ready-made embed snippet that is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyResult {
    Embed(String),
    Record(MetadataRecord),
}

/// A site-specific extractor. `matches` must be pure and cheap; it is called
/// speculatively while the registry is scanned.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn matches(&self, url: &str) -> bool;

    async fn extract(
        &self,
        url: &str,
        http: &dyn HttpClient,
    ) -> Result<StrategyResult, PreviewError>;
}

/// Ordered, immutable set of strategies. Earlier entries win.
pub struct Registry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Registry {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// The built-in site strategies in priority order.
    pub fn builtin(config: &Config) -> Self {
        Self::new(vec![
            Box::new(twitter::TwitterStatus::new(&config.twitter_oembed)),
            Box::new(github::GithubRepo),
            Box::new(wikipedia::WikipediaArticle),
            Box::new(amazon::AmazonProduct),
        ])
    }

    /// First strategy whose predicate accepts `url`; later ones are never asked.
    pub fn find(&self, url: &str) -> Option<&dyn Strategy> {
        self.strategies
            .iter()
            .find(|s| s.matches(url))
            .map(|s| s.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

// ── Tests ──
