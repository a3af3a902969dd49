use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

use super::{Strategy, StrategyResult};
use crate::error::PreviewError;
use crate::http::HttpClient;
use crate::metadata::MetadataRecord;

const API_BASE: &str = "https://api.github.com/repos";

static REPO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.)?github\.com/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)").unwrap()
});

// Top-level paths that look like owner/repo but are site pages.
const RESERVED_OWNERS: &[&str] = &[
    "about",
    "apps",
    "collections",
    "enterprise",
    "explore",
    "features",
    "login",
    "marketplace",
    "notifications",
    "orgs",
    "pricing",
    "search",
    "settings",
    "sponsors",
    "topics",
    "trending",
];

#[derive(Deserialize)]
struct Repo {
    full_name: String,
    description: Option<String>,
    html_url: String,
    owner: Option<Owner>,
}

#[derive(Deserialize)]
struct Owner {
    avatar_url: Option<String>,
}

pub struct GithubRepo;

fn owner_and_repo(url: &str) -> Option<(String, String)> {
    let caps = REPO_RE.captures(url)?;
    let owner = caps.get(1)?.as_str();
    if RESERVED_OWNERS.contains(&owner.to_lowercase().as_str()) {
        return None;
    }
    let repo = caps.get(2)?.as_str().trim_end_matches(".git");
    Some((owner.to_string(), repo.to_string()))
}

#[async_trait]
impl Strategy for GithubRepo {
    fn name(&self) -> &'static str {
        "github"
    }

    fn matches(&self, url: &str) -> bool {
        owner_and_repo(url).is_some()
    }

    async fn extract(
        &self,
        url: &str,
        http: &dyn HttpClient,
    ) -> Result<StrategyResult, PreviewError> {
        let (owner, repo) = owner_and_repo(url)
            .ok_or_else(|| anyhow::anyhow!("not a repository url: {}", url))?;
        let response = http.get(&format!("{}/{}/{}", API_BASE, owner, repo)).await?;
        let repo: Repo = serde_json::from_str(&response.body)?;

        Ok(StrategyResult::Record(MetadataRecord {
            title: Some(repo.full_name),
            description: repo.description.filter(|d| !d.trim().is_empty()),
            url: repo.html_url,
            image: repo.owner.and_then(|o| o.avatar_url),
        }))
    }
}

// ── Tests ──
