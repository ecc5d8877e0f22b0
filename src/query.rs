use tracing::debug;

use crate::types::{ActionSpec, FetchReport, FilteredPullRequest, Forge, IgnoredTally};

/// Fetches and filters open pull requests for every requested repository.
///
/// Repositories are processed sequentially in input order. Within each
/// repository, pull requests by ignored authors are suppressed and
/// counted, drafts are dropped, and the survivors are mapped to the
/// reduced output shape. A repository contributes a tally entry only
/// when at least one of its pull requests was suppressed.
pub async fn fetch_open_pull_requests<F>(spec: &ActionSpec, forge: &F) -> anyhow::Result<FetchReport>
where
    F: Forge + Sync,
{
    let mut prs = Vec::new();
    let mut ignored = Vec::new();

    for repo in &spec.repos {
        let records = forge.list_open_pull_requests(repo).await?;
        let mut suppressed = 0usize;

        for record in records {
            // The author check runs before the draft check, so a draft
            // by an ignored author still counts toward the tally.
            if let Some(author) = &record.author_login
                && spec.ignored_users.contains(author)
            {
                suppressed += 1;
                continue;
            }

            if record.draft {
                continue;
            }

            prs.push(FilteredPullRequest {
                url: record.html_url,
                title: record.title,
                user: record.author_login.unwrap_or_default(),
                created_at: record.created_at,
            });
        }

        debug!(repo = %repo, suppressed, "processed repository");

        if suppressed > 0 {
            ignored.push(IgnoredTally {
                repo: repo.clone(),
                pr_count: suppressed,
            });
        }
    }

    Ok(FetchReport { prs, ignored })
}
