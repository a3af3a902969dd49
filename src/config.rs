//! Runtime configuration loaded from environment variables.

use tracing::{info, warn};

const DEFAULT_MAX_REDIRECTS: usize = 10;
const DEFAULT_TWITTER_OEMBED: &str = "https://publish.twitter.com/oembed";

#[derive(Debug, Clone)]
pub struct Config {
    /// User-Agent sent with every GET.
    pub user_agent: String,

    /// Limit for the standard redirect-following policy.
    pub max_redirects: usize,

    /// oEmbed endpoint used by the twitter status strategy.
    pub twitter_oembed: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            twitter_oembed: DEFAULT_TWITTER_OEMBED.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `LINK_PREVIEW_USER_AGENT` (default: `link_preview/<version>`)
    /// - `LINK_PREVIEW_MAX_REDIRECTS` (default: 10)
    /// - `LINK_PREVIEW_TWITTER_OEMBED` (default: `https://publish.twitter.com/oembed`)
    pub fn from_env() -> Self {
        let user_agent = std::env::var("LINK_PREVIEW_USER_AGENT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(default_user_agent);

        let max_redirects = match std::env::var("LINK_PREVIEW_MAX_REDIRECTS") {
            Ok(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid LINK_PREVIEW_MAX_REDIRECTS, using default");
                DEFAULT_MAX_REDIRECTS
            }),
            Err(_) => DEFAULT_MAX_REDIRECTS,
        };

        let twitter_oembed = std::env::var("LINK_PREVIEW_TWITTER_OEMBED")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TWITTER_OEMBED.to_string());

        info!(
            user_agent = %user_agent,
            max_redirects,
            twitter_oembed = %twitter_oembed,
            "link preview configuration loaded"
        );

        Self {
            user_agent,
            max_redirects,
            twitter_oembed,
        }
    }
}

fn default_user_agent() -> String {
    format!("link_preview/{}", env!("CARGO_PKG_VERSION"))
}

// ── Tests ──
