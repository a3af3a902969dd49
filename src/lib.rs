//! Turn any URL into a renderable link preview.
//!
//! Site strategies (tweets, GitHub repositories, Wikipedia articles, Amazon
//! products) are tried in order; anything else is previewed from the page's
//! Open Graph / Twitter card / plain HTML metadata.
//!
//! ```no_run
//! # async fn demo() {
//! let result = link_preview::resolve("https://www.rust-lang.org/").await;
//! match (result.error, result.html) {
//!     (Some(error), _) => eprintln!("{error}"),
//!     (None, Some(html)) => println!("{html}"),
//!     (None, None) => {}
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod metadata;
pub mod patterns;
pub mod render;
pub mod resolve;

use std::sync::OnceLock;

pub use config::Config;
pub use error::{ErrorKind, PreviewError};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use metadata::{MetadataFetcher, MetadataRecord, OpenGraphFetcher};
pub use patterns::{Registry, Strategy, StrategyResult};
pub use render::render;
pub use resolve::{ResolutionResult, Resolver};

static DEFAULT_RESOLVER: OnceLock<Resolver> = OnceLock::new();

/// Resolve with the process-wide default resolver, built from the
/// environment on first use.
pub async fn resolve(url: &str) -> ResolutionResult {
    let resolver = match DEFAULT_RESOLVER.get() {
        Some(resolver) => resolver,
        None => match Resolver::from_config(&Config::from_env()) {
            Ok(resolver) => DEFAULT_RESOLVER.get_or_init(|| resolver),
            Err(e) => return ResolutionResult::failure(&e),
        },
    };
    resolver.resolve(url).await
}
