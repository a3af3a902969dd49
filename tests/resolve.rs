use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use link_preview::{
    Config, HttpClient, HttpResponse, OpenGraphFetcher, PreviewError, Registry, ResolutionResult,
    Resolver,
};
use reqwest::header::HeaderMap;

/// Exact-URL fake. Unknown URLs answer 404.
#[derive(Default)]
struct FakeWeb {
    pages: HashMap<String, Result<String, u16>>,
    seen: Mutex<Vec<String>>,
}

impl FakeWeb {
    fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }
}

#[async_trait]
impl HttpClient for FakeWeb {
    async fn get(&self, url: &str) -> Result<HttpResponse, PreviewError> {
        self.seen.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(body)) => Ok(HttpResponse {
                status: 200,
                url: url.to_string(),
                headers: HeaderMap::new(),
                body: body.clone(),
            }),
            Some(Err(status)) => Err(PreviewError::Status { status: *status }),
            None => Err(PreviewError::Status { status: 404 }),
        }
    }
}

fn resolver(web: FakeWeb) -> (Resolver, Arc<FakeWeb>) {
    let web = Arc::new(web);
    let resolver = Resolver::new(
        Registry::builtin(&Config::default()),
        Box::new(OpenGraphFetcher),
        web.clone(),
    );
    (resolver, web)
}

#[tokio::test]
async fn status_update_returns_embed_untouched() {
    let embed = r#"<blockquote class="twitter-tweet"><p>Sunset</p></blockquote>"#;
    let oembed = serde_json::json!({ "html": embed }).to_string();
    let (r, web) = resolver(FakeWeb::default().page(
        "https://publish.twitter.com/oembed?url=https%3A%2F%2Ftwitter.com%2FInterior%2Fstatus%2F463440424141459456",
        &oembed,
    ));

    let out = r
        .resolve("https://twitter.com/Interior/status/463440424141459456")
        .await;

    assert_eq!(out, ResolutionResult::success(Some(embed.to_string())));
    assert_eq!(web.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn status_without_snippet_reads_page_tags() {
    let oembed = "https://publish.twitter.com/oembed?url=https%3A%2F%2Ftwitter.com%2Fa%2Fstatus%2F1";
    let (r, web) = resolver(
        FakeWeb::default()
            .page(oembed, r#"{"html":""}"#)
            .page(
                "https://twitter.com/a/status/1",
                r#"<html><head>
                    <meta property="og:title" content="Withheld">
                    <meta property="og:url" content="https://twitter.com/a/status/1">
                </head></html>"#,
            ),
    );

    let out = r.resolve("https://twitter.com/a/status/1").await;

    assert_eq!(out.error, None);
    let html = out.html.expect("html");
    assert!(html.starts_with(r#"<a class="link-preview""#));
    assert!(html.contains(">Withheld<"));
    assert_eq!(
        *web.seen.lock().unwrap(),
        vec![oembed.to_string(), "https://twitter.com/a/status/1".to_string()]
    );
}

#[tokio::test]
async fn generic_page_renders_social_tags() {
    let (r, _) = resolver(FakeWeb::default().page(
        "https://blog.example.com/post",
        r#"<html><head>
            <meta property="og:title" content="T">
            <meta property="og:description" content="D">
            <meta property="og:image" content="https://blog.example.com/I.jpg">
            <meta property="og:url" content="https://blog.example.com/U">
        </head><body></body></html>"#,
    ));

    let out = r.resolve("https://blog.example.com/post").await;

    assert_eq!(out.error, None);
    let html = out.html.expect("html");
    assert!(html.contains(">T<"));
    assert!(html.contains(">D<"));
    assert!(html.contains("https://blog.example.com/I.jpg"));
    assert!(html.contains("https://blog.example.com/U"));
}

#[tokio::test]
async fn missing_page_reports_status() {
    let (r, _) = resolver(FakeWeb::default().status(
        "https://en.wikipedia.org/api/rest_v1/page/summary/not_a_real_url_404",
        404,
    ));

    let out = r
        .resolve("https://en.wikipedia.org/wiki/not_a_real_url_404")
        .await;

    assert_eq!(
        out,
        ResolutionResult {
            error: Some("Request failed with status code 404".to_string()),
            html: None,
        }
    );
}

#[tokio::test]
async fn page_without_metadata_has_no_preview() {
    let (r, _) = resolver(FakeWeb::default().page(
        "http://blank.example.org",
        "<html><head></head><body bgcolor=\"#FFFFFF\"></body></html>",
    ));

    let out = r.resolve("http://blank.example.org").await;

    assert_eq!(out.error.as_deref(), Some("No preview available"));
    assert_eq!(out.html, None);
}

#[tokio::test]
async fn malformed_strategy_payload_is_unknown_error() {
    let (r, web) = resolver(FakeWeb::default().page(
        "https://api.github.com/repos/sbkwgh/forum",
        "<html>rate limited</html>",
    ));

    let out = r.resolve("https://github.com/sbkwgh/forum").await;

    assert_eq!(out.error.as_deref(), Some("Unknown error"));
    assert_eq!(out.html, None);
    // No second request to the generic fetcher.
    assert_eq!(
        *web.seen.lock().unwrap(),
        vec!["https://api.github.com/repos/sbkwgh/forum".to_string()]
    );
}

#[test]
fn result_serializes_as_two_fields() {
    let ok = ResolutionResult::success(Some("<a></a>".into()));
    assert_eq!(
        serde_json::to_string(&ok).unwrap(),
        r#"{"error":null,"html":"<a></a>"}"#
    );
    let failed = ResolutionResult::failure(&PreviewError::NotAvailable);
    assert_eq!(
        serde_json::to_string(&failed).unwrap(),
        r#"{"error":"No preview available","html":null}"#
    );
}
