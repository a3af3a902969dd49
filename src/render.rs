//! Markup for a generic preview card.
//!
//! Output is deterministic for a given record and omits every element whose
//! field is missing.

use maud::html;
use reqwest::Url;

use crate::metadata::MetadataRecord;

/// Only web links go into `href`/`src`.
fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Host shown under the card text, without a leading `www.`.
fn display_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| url.to_string())
}

pub fn render(record: &MetadataRecord) -> String {
    let href = is_safe_url(&record.url).then_some(record.url.as_str());
    let image = record.image.as_deref().filter(|src| is_safe_url(src));
    let alt = record.title.as_deref().unwrap_or("");

    html! {
        a class="link-preview" href=[href] target="_blank" rel="noopener noreferrer" {
            @if let Some(src) = image {
                img class="link-preview__image" src=(src) alt=(alt);
            }
            div class="link-preview__body" {
                @if let Some(title) = &record.title {
                    div class="link-preview__title" { (title) }
                }
                @if let Some(description) = &record.description {
                    div class="link-preview__description" { (description) }
                }
                div class="link-preview__url" { (display_host(&record.url)) }
            }
        }
    }
    .into_string()
}

// ── Tests ──
