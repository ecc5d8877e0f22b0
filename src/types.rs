use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A repository on the hosting platform, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repo {
    pub owner: String,
    pub name: String,
}

impl Repo {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();
        if owner.is_empty() || name.is_empty() {
            anyhow::bail!("Repository owner and name must be non-empty");
        }
        Ok(Self { owner, name })
    }

    /// Parses an 'owner/name' specifier, splitting on the first '/'.
    pub fn parse(spec: &str) -> Result<Self> {
        let Some((owner, name)) = spec.split_once('/') else {
            anyhow::bail!("Repository must be in format 'owner/name', got: '{spec}'");
        };
        Self::new(owner, name)
    }

    /// URL of the repository's pull request listing page.
    pub fn pulls_url(&self) -> String {
        format!("https://github.com/{self}/pulls")
    }
}

impl std::fmt::Display for Repo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A pull request as received from the forge, validated at the boundary.
///
/// The host response is full of optional fields; only the author is
/// genuinely optional here. Everything else must be present or the
/// boundary conversion fails.
#[derive(Debug, Clone)]
pub struct PullRequestRecord {
    pub html_url: String,
    pub title: String,
    pub author_login: Option<String>,
    pub created_at: DateTime<Utc>,
    pub draft: bool,
}

/// The reduced record shape exposed through the `PRs` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredPullRequest {
    pub url: String,
    pub title: String,
    /// Author login, or empty string when the source record had no author.
    pub user: String,
    pub created_at: DateTime<Utc>,
}

/// Per-repository count of pull requests suppressed by the ignore list.
#[derive(Debug, Clone, PartialEq)]
pub struct IgnoredTally {
    pub repo: Repo,
    pub pr_count: usize,
}

/// Output rendering selected by the `format` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Structured,
    Markdown,
}

impl OutputFormat {
    /// Only the literal string "markdown" selects the digest; anything
    /// else, including an absent input, yields structured output.
    pub fn from_input(raw: &str) -> Self {
        if raw == "markdown" {
            OutputFormat::Markdown
        } else {
            OutputFormat::Structured
        }
    }
}

/// Validated run inputs.
#[derive(Debug, Clone)]
pub struct ActionSpec {
    pub token: String,
    pub repos: Vec<Repo>,
    pub ignored_users: std::collections::HashSet<String>,
    pub format: OutputFormat,
}

/// Result of one fetch-filter pass over all requested repositories.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    pub prs: Vec<FilteredPullRequest>,
    pub ignored: Vec<IgnoredTally>,
}

/// Abstraction over the pull request hosting service.
#[async_trait]
pub trait Forge {
    /// Lists the open pull requests of a repository (single page).
    async fn list_open_pull_requests(&self, repo: &Repo) -> Result<Vec<PullRequestRecord>>;
}
