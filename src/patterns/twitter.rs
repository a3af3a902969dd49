use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use super::{Strategy, StrategyResult};
use crate::error::PreviewError;
use crate::http::HttpClient;

static STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://(www\.)?twitter\.com/.+/status/\d+").unwrap());

#[derive(Deserialize)]
struct OEmbed {
    html: Option<String>,
}

/// Status updates are rendered by the publisher's own oEmbed snippet.
pub struct TwitterStatus {
    oembed: String,
}

impl TwitterStatus {
    pub fn new(oembed: &str) -> Self {
        Self {
            oembed: oembed.to_string(),
        }
    }

    fn oembed_url(&self, status_url: &str) -> Result<String, PreviewError> {
        let url = Url::parse_with_params(&self.oembed, &[("url", status_url)])
            .map_err(|e| anyhow::anyhow!("bad oEmbed endpoint {}: {}", self.oembed, e))?;
        Ok(url.to_string())
    }
}

#[async_trait]
impl Strategy for TwitterStatus {
    fn name(&self) -> &'static str {
        "twitter"
    }

    fn matches(&self, url: &str) -> bool {
        STATUS_RE.is_match(url)
    }

    async fn extract(
        &self,
        url: &str,
        http: &dyn HttpClient,
    ) -> Result<StrategyResult, PreviewError> {
        let endpoint = self.oembed_url(url)?;
        let response = http.get(&endpoint).await?;
        let oembed: OEmbed = serde_json::from_str(&response.body)?;
        // No snippet is an empty embed; the resolver reads page metadata instead.
        let html = oembed.html.unwrap_or_default();
        debug!("oEmbed snippet for {} ({} bytes)", url, html.len());
        Ok(StrategyResult::Embed(html))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::http::testing::ScriptedClient;

    const OEMBED: &str = "https://publish.twitter.com/oembed";

    #[test]
    fn matches_status_urls() {
        let s = TwitterStatus::new(OEMBED);
        assert!(s.matches("https://twitter.com/user/status/12345"));
        assert!(s.matches("http://www.twitter.com/Interior/status/463440424141459456"));
        assert!(s.matches("HTTPS://TWITTER.COM/user/status/1"));
        assert!(!s.matches("http://twitter.com/notapage/123456"));
        assert!(!s.matches("http://twitter.com/notapage/status/qwertyu"));
        assert!(!s.matches("https://nottwitter.com/user/status/1"));
    }

    #[test]
    fn oembed_url_encodes_status() {
        let s = TwitterStatus::new(OEMBED);
        assert_eq!(
            s.oembed_url("https://twitter.com/a/status/1").unwrap(),
            "https://publish.twitter.com/oembed?url=https%3A%2F%2Ftwitter.com%2Fa%2Fstatus%2F1"
        );
    }

    #[tokio::test]
    async fn returns_embed_snippet() {
        let http = ScriptedClient::new().body(
            OEMBED,
            r#"{
                "url": "https://twitter.com/a/status/1",
                "html": "<blockquote class=\"twitter-tweet\">hi</blockquote>"
            }"#,
        );
        let out = TwitterStatus::new(OEMBED)
            .extract("https://twitter.com/a/status/1", &http)
            .await
            .unwrap();
        assert_eq!(
            out,
            StrategyResult::Embed(r#"<blockquote class="twitter-tweet">hi</blockquote>"#.into())
        );
    }

    #[tokio::test]
    async fn missing_html_is_empty_embed() {
        let http = ScriptedClient::new().body(OEMBED, r#"{"error":"nope"}"#);
        let out = TwitterStatus::new(OEMBED)
            .extract("https://twitter.com/a/status/1", &http)
            .await
            .unwrap();
        assert_eq!(out, StrategyResult::Embed(String::new()));
    }

    #[tokio::test]
    async fn non_json_reply_is_unknown() {
        let http = ScriptedClient::new().body(OEMBED, "<html>busy</html>");
        let err = TwitterStatus::new(OEMBED)
            .extract("https://twitter.com/a/status/1", &http)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn bad_endpoint_is_unknown() {
        let http = ScriptedClient::new();
        let err = TwitterStatus::new("not a url")
            .extract("https://twitter.com/a/status/1", &http)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(http.requested().is_empty());
    }
}
