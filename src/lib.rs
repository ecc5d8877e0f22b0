//! fetch-open-prs: collect open pull requests for an automation pipeline.
//!
//! Fetches the open pull requests of one or more GitHub repositories,
//! drops drafts and pull requests by ignored authors, and exposes the
//! rest as a single `PRs` output: either a JSON list or a markdown
//! digest with per-repository tallies of the suppressed PRs.

pub mod actions;
pub mod cli;
pub mod github;
pub mod query;
pub mod render;
pub mod types;

pub use cli::parse_args;
pub use github::{GitHub, build_client};
pub use query::fetch_open_pull_requests;
pub use render::{render_markdown, render_output};
pub use types::{
    ActionSpec, FetchReport, FilteredPullRequest, Forge, IgnoredTally, OutputFormat,
    PullRequestRecord, Repo,
};
