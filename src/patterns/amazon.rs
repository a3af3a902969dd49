use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::info;

use super::{Strategy, StrategyResult};
use crate::error::PreviewError;
use crate::http::HttpClient;
use crate::metadata::MetadataRecord;

static PRODUCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://((?:www\.|smile\.)?amazon\.[a-z]{2,3}(?:\.[a-z]{2})?)/(?:[^?#]*/)?(?:dp|gp/product)/([A-Z0-9]{10})(?:[/?#]|$)",
    )
    .unwrap()
});

static PRODUCT_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#productTitle").unwrap());
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static LANDING_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#landingImage").unwrap());

pub struct AmazonProduct;

/// Canonical product link with tracking path segments and query dropped.
fn product_url(url: &str) -> Option<String> {
    let caps = PRODUCT_RE.captures(url)?;
    let host = caps.get(1)?.as_str().to_lowercase();
    let asin = caps.get(2)?.as_str().to_uppercase();
    Some(format!("https://{}/gp/product/{}", host, asin))
}

fn parse_product(body: &str, canonical: &str) -> Option<MetadataRecord> {
    let doc = Html::parse_document(body);

    let title = doc
        .select(&PRODUCT_TITLE)
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .find(|t| !t.is_empty())?;

    let description = doc
        .select(&DESCRIPTION)
        .filter_map(|el| el.value().attr("content"))
        .map(|d| d.trim().to_string())
        .find(|d| !d.is_empty());

    let image = doc.select(&LANDING_IMAGE).find_map(|el| {
        let attrs = el.value();
        attrs
            .attr("data-old-hires")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| attrs.attr("src"))
            .map(|s| s.trim().to_string())
    });

    Some(MetadataRecord {
        title: Some(title),
        description,
        url: canonical.to_string(),
        image,
    })
}

#[async_trait]
impl Strategy for AmazonProduct {
    fn name(&self) -> &'static str {
        "amazon"
    }

    fn matches(&self, url: &str) -> bool {
        PRODUCT_RE.is_match(url)
    }

    async fn extract(
        &self,
        url: &str,
        http: &dyn HttpClient,
    ) -> Result<StrategyResult, PreviewError> {
        let canonical =
            product_url(url).ok_or_else(|| anyhow::anyhow!("not a product url: {}", url))?;
        let response = http.get(&canonical).await?;
        match parse_product(&response.body, &canonical) {
            Some(record) => Ok(StrategyResult::Record(record)),
            None => {
                info!("No product title on {}", canonical);
                Err(PreviewError::NotAvailable)
            }
        }
    }
}

// ── Tests ──
