use anyhow::{Context, Result};

use crate::types::{FetchReport, OutputFormat};

/// Renders the report as a markdown bullet list: one line per surviving
/// pull request, then one line per ignored-author tally.
pub fn render_markdown(report: &FetchReport) -> String {
    let mut lines = Vec::with_capacity(report.prs.len() + report.ignored.len());

    for pr in &report.prs {
        lines.push(format!("* [{}]({}) by {}", pr.title, pr.url, pr.user));
    }

    for tally in &report.ignored {
        lines.push(format!(
            "* {} PRs by ignored users in [{}]({})",
            tally.pr_count,
            tally.repo,
            tally.repo.pulls_url()
        ));
    }

    lines.join("\n")
}

/// Renders the report in the requested output format.
///
/// The structured branch serializes only the pull request list; the
/// ignored-author tallies appear in the markdown digest alone.
pub fn render_output(report: &FetchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(report)),
        OutputFormat::Structured => {
            serde_json::to_string(&report.prs).context("Failed to serialize pull request list")
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::types::{FilteredPullRequest, IgnoredTally, Repo};

    fn sample_report() -> FetchReport {
        FetchReport {
            prs: vec![FilteredPullRequest {
                url: "https://github.com/acme/widgets/pull/1".to_string(),
                title: "Fix the flux capacitor".to_string(),
                user: "alice".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 4, 8, 3, 40, 28).unwrap(),
            }],
            ignored: vec![IgnoredTally {
                repo: Repo::new("acme", "widgets").unwrap(),
                pr_count: 2,
            }],
        }
    }

    #[test]
    fn markdown_lists_prs_then_tallies() {
        let rendered = render_markdown(&sample_report());
        assert_eq!(
            rendered,
            "* [Fix the flux capacitor](https://github.com/acme/widgets/pull/1) by alice\n\
             * 2 PRs by ignored users in [acme/widgets](https://github.com/acme/widgets/pulls)"
        );
    }

    #[test]
    fn structured_output_omits_tallies() {
        let rendered = render_output(&sample_report(), OutputFormat::Structured).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "url": "https://github.com/acme/widgets/pull/1",
                "title": "Fix the flux capacitor",
                "user": "alice",
                "created_at": "2024-04-08T03:40:28Z",
            }])
        );
    }

    #[test]
    fn empty_report_renders_empty_markdown() {
        let report = FetchReport {
            prs: vec![],
            ignored: vec![],
        };
        assert_eq!(render_markdown(&report), "");
    }
}
