//! Generic metadata scraping: fetch a page and pull title, description,
//! image and url out of its social-preview tags, falling back per field to
//! plainer tags when the social ones are missing.

use std::sync::LazyLock;

use async_trait::async_trait;
use reqwest::Url;
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::PreviewError;
use crate::http::HttpClient;

static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| meta_selector("og:title"));
static OG_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| meta_selector("og:description"));
static OG_IMAGE: LazyLock<Selector> = LazyLock::new(|| meta_selector("og:image"));
static OG_URL: LazyLock<Selector> = LazyLock::new(|| meta_selector("og:url"));
static TWITTER_TITLE: LazyLock<Selector> = LazyLock::new(|| meta_selector("twitter:title"));
static TWITTER_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| meta_selector("twitter:description"));
static TWITTER_IMAGE: LazyLock<Selector> = LazyLock::new(|| meta_selector("twitter:image"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static CANONICAL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"link[rel="canonical"]"#).unwrap());

/// Social tags show up under both `property=` and `name=` in the wild.
fn meta_selector(key: &str) -> Selector {
    Selector::parse(&format!(r#"meta[property="{key}"], meta[name="{key}"]"#)).unwrap()
}

/// Normalized preview fields. `url` is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub image: Option<String>,
}

impl MetadataRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            title: None,
            description: None,
            url: url.into(),
            image: None,
        }
    }

    /// True when none of the displayable fields were found.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.image.is_none()
    }
}

/// Fallback used when no site strategy claims a URL.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn extract(&self, url: &str, http: &dyn HttpClient)
        -> Result<MetadataRecord, PreviewError>;
}

/// Reads Open Graph tags, then Twitter card tags, then plain HTML tags.
pub struct OpenGraphFetcher;

#[async_trait]
impl MetadataFetcher for OpenGraphFetcher {
    async fn extract(
        &self,
        url: &str,
        http: &dyn HttpClient,
    ) -> Result<MetadataRecord, PreviewError> {
        let response = http.get(url).await?;
        let record = parse_document(&response.body, url, &response.url);
        if record.is_empty() {
            info!("No usable metadata at {}", url);
            return Err(PreviewError::NotAvailable);
        }
        Ok(record)
    }
}

/// Apply the per-field cascade to a document.
///
/// `requested` is the url the caller asked for and becomes the record url when
/// the page names no canonical one; `base` is where the body actually came
/// from (after redirects) and anchors relative image/canonical links.
pub fn parse_document(body: &str, requested: &str, base: &str) -> MetadataRecord {
    let doc = Html::parse_document(body);
    let base = Url::parse(base).or_else(|_| Url::parse(requested)).ok();

    let title = meta_content(&doc, &OG_TITLE)
        .or_else(|| tier("title", "twitter", meta_content(&doc, &TWITTER_TITLE)))
        .or_else(|| tier("title", "html", element_text(&doc, &TITLE)));

    let description = meta_content(&doc, &OG_DESCRIPTION)
        .or_else(|| tier("description", "twitter", meta_content(&doc, &TWITTER_DESCRIPTION)))
        .or_else(|| tier("description", "html", meta_content(&doc, &DESCRIPTION)));

    let image = meta_content(&doc, &OG_IMAGE)
        .or_else(|| tier("image", "twitter", meta_content(&doc, &TWITTER_IMAGE)))
        .map(|src| absolutize(base.as_ref(), &src));

    let url = meta_content(&doc, &OG_URL)
        .or_else(|| tier("url", "canonical", link_href(&doc, &CANONICAL)))
        .map(|href| absolutize(base.as_ref(), &href))
        .unwrap_or_else(|| requested.to_string());

    MetadataRecord {
        title,
        description,
        url,
        image,
    }
}

fn tier(field: &str, source: &str, value: Option<String>) -> Option<String> {
    if value.is_some() {
        debug!(field, source, "metadata fallback tier used");
    }
    value
}

fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .filter_map(|el| el.value().attr("content"))
        .map(clean)
        .find(|s| !s.is_empty())
}

fn element_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .map(|el| clean(&el.text().collect::<String>()))
        .find(|s| !s.is_empty())
}

fn link_href(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .filter_map(|el| el.value().attr("href"))
        .map(clean)
        .find(|s| !s.is_empty())
}

/// Collapse runs of whitespace (titles often carry newlines and indentation).
fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn absolutize(base: Option<&Url>, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    base.and_then(|b| b.join(href).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| href.to_string())
}

// ── Tests ──
