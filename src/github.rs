use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::{Octocrab, params};
use tracing::info;

use crate::types::{Forge, PullRequestRecord, Repo};

/// Creates a GitHub client authenticated with the `token` input.
pub fn build_client(token: impl Into<String>) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.into())
        .build()
        .context("Failed to create GitHub client")
}

/// Production forge backed by the GitHub REST API.
pub struct GitHub {
    client: Octocrab,
}

impl GitHub {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Forge for GitHub {
    async fn list_open_pull_requests(&self, repo: &Repo) -> Result<Vec<PullRequestRecord>> {
        info!(repo = %repo, "listing open pull requests");

        let page = self
            .client
            .pulls(&repo.owner, &repo.name)
            .list()
            .state(params::State::Open)
            .send()
            .await
            .with_context(|| format!("Failed to list open pull requests for {repo}"))?;

        // Single page only; the automation this feeds looks at recent
        // activity, not the full backlog.
        page.items
            .into_iter()
            .map(|pr| convert_pull_request(repo, pr))
            .collect()
    }
}

/// Converts octocrab's optional-everything model into our boundary
/// record. A missing author is legitimate (deleted accounts); a missing
/// URL, title, or creation time means the response is malformed.
fn convert_pull_request(
    repo: &Repo,
    pr: octocrab::models::pulls::PullRequest,
) -> Result<PullRequestRecord> {
    let number = pr.number;

    let html_url = pr
        .html_url
        .map(|url| url.to_string())
        .with_context(|| format!("{repo}#{number}: response is missing html_url"))?;
    let title = pr
        .title
        .with_context(|| format!("{repo}#{number}: response is missing title"))?;
    let created_at = pr
        .created_at
        .with_context(|| format!("{repo}#{number}: response is missing created_at"))?;

    Ok(PullRequestRecord {
        html_url,
        title,
        author_login: pr.user.map(|user| user.login),
        created_at,
        draft: pr.draft.unwrap_or(false),
    })
}
