use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

use super::{Strategy, StrategyResult};
use crate::error::PreviewError;
use crate::http::HttpClient;
use crate::metadata::MetadataRecord;

static ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://([a-z][a-z0-9-]*)\.(?:m\.)?wikipedia\.org/wiki/([^?#]+)").unwrap()
});

/// Subset of the REST `page/summary` payload.
#[derive(Deserialize)]
struct Summary {
    title: String,
    extract: Option<String>,
    thumbnail: Option<Thumbnail>,
    content_urls: Option<ContentUrls>,
}

#[derive(Deserialize)]
struct Thumbnail {
    source: String,
}

#[derive(Deserialize)]
struct ContentUrls {
    desktop: PageUrl,
}

#[derive(Deserialize)]
struct PageUrl {
    page: String,
}

pub struct WikipediaArticle;

/// The title is re-encoded as a single path segment so `AC/DC` stays one title.
fn summary_url(url: &str) -> Option<String> {
    let caps = ARTICLE_RE.captures(url)?;
    let lang = caps.get(1)?.as_str().to_lowercase();
    let title = urlencoding::decode(caps.get(2)?.as_str()).ok()?;
    Some(format!(
        "https://{}.wikipedia.org/api/rest_v1/page/summary/{}",
        lang,
        urlencoding::encode(&title)
    ))
}

#[async_trait]
impl Strategy for WikipediaArticle {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    fn matches(&self, url: &str) -> bool {
        ARTICLE_RE.is_match(url)
    }

    async fn extract(
        &self,
        url: &str,
        http: &dyn HttpClient,
    ) -> Result<StrategyResult, PreviewError> {
        let endpoint =
            summary_url(url).ok_or_else(|| anyhow::anyhow!("not an article url: {}", url))?;
        let response = http.get(&endpoint).await?;
        let summary: Summary = serde_json::from_str(&response.body)?;

        Ok(StrategyResult::Record(MetadataRecord {
            title: Some(summary.title),
            description: summary.extract.filter(|e| !e.trim().is_empty()),
            url: summary
                .content_urls
                .map(|c| c.desktop.page)
                .unwrap_or_else(|| url.to_string()),
            image: summary.thumbnail.map(|t| t.source),
        }))
    }
}

// ── Tests ──
