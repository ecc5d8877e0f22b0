use std::collections::HashSet;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::types::{ActionSpec, OutputFormat, Repo};

const BUILD_INFO_HUMAN: &str = env!("BUILD_INFO_HUMAN");

#[derive(Parser, Default, Debug)]
#[command(
    about = "Fetch open pull requests from one or more GitHub repositories, drop drafts and ignored authors, and emit the rest as JSON or a markdown digest"
)]
#[command(long_version = BUILD_INFO_HUMAN)]
struct CliArgs {
    /// GitHub token used to authenticate API requests
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub token: String,

    /// Repository as 'owner/name', or a JSON array of such strings
    #[arg(long, env = "INPUT_REPOSITORY", value_name = "OWNER/NAME")]
    pub repository: String,

    /// JSON array of author logins whose PRs are suppressed
    #[arg(
        long = "ignored-users",
        env = "INPUT_IGNORED_USERS",
        default_value = "",
        value_name = "JSON-ARRAY"
    )]
    pub ignored_users: String,

    /// Output format: 'markdown' for a digest, anything else for JSON
    #[arg(long, env = "INPUT_FORMAT", default_value = "", value_name = "FORMAT")]
    pub format: String,
}

/// Expands the raw repository input into one or more specifiers.
///
/// The input is either a single 'owner/name' string or a JSON array of
/// them. Anything that fails to parse as a JSON array is treated as a
/// lone specifier, so plain strings never need quoting.
fn parse_repositories(raw: &str) -> Result<Vec<Repo>> {
    let specs: Vec<String> = match serde_json::from_str(raw) {
        Ok(list) => list,
        Err(_) => vec![raw.to_string()],
    };

    specs
        .iter()
        .map(|spec| {
            let repo = Repo::parse(spec)?;
            debug!(owner = %repo.owner, name = %repo.name, "parsed repository specifier");
            Ok(repo)
        })
        .collect()
}

/// Parses the ignore list. An empty input means no ignored users; a
/// non-empty input must be a valid JSON array of strings.
fn parse_ignored_users(raw: &str) -> Result<HashSet<String>> {
    if raw.trim().is_empty() {
        return Ok(HashSet::new());
    }

    let users: Vec<String> = serde_json::from_str(raw)
        .with_context(|| format!("ignored_users must be a JSON array of strings, got: '{raw}'"))?;

    debug!(count = users.len(), "parsed ignored users");
    Ok(users.into_iter().collect())
}

fn build_spec(cli: CliArgs) -> Result<ActionSpec> {
    Ok(ActionSpec {
        repos: parse_repositories(&cli.repository)?,
        ignored_users: parse_ignored_users(&cli.ignored_users)?,
        format: OutputFormat::from_input(&cli.format),
        token: cli.token,
    })
}

/// Parses command-line arguments (or their `INPUT_*` environment
/// fallbacks) into a validated run specification.
pub fn parse_args<I, T>(args: I) -> Result<ActionSpec>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = CliArgs::try_parse_from(args)?;
    build_spec(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_specifier_yields_one_repo() {
        let repos = parse_repositories("acme/widgets").unwrap();
        assert_eq!(repos, vec![Repo::new("acme", "widgets").unwrap()]);
    }

    #[test]
    fn json_array_yields_repos_in_order() {
        let repos = parse_repositories(r#"["a/b", "c/d"]"#).unwrap();
        assert_eq!(
            repos,
            vec![Repo::new("a", "b").unwrap(), Repo::new("c", "d").unwrap()]
        );
    }

    #[test]
    fn invalid_json_falls_back_to_single_specifier() {
        // 'acme/widgets' is not valid JSON, so the whole string is one
        // specifier; that is the first test above. A fallback input with
        // no slash at all is a parse error, not an empty result.
        let err = parse_repositories("[not-json").unwrap_err();
        assert!(err.to_string().contains("owner/name"), "{err}");
    }

    #[test]
    fn specifier_splits_on_first_slash() {
        let repos = parse_repositories("acme/widgets/extra").unwrap();
        assert_eq!(repos[0].owner, "acme");
        assert_eq!(repos[0].name, "widgets/extra");
    }

    #[test]
    fn specifier_without_slash_is_rejected() {
        assert!(parse_repositories("not-a-repo").is_err());
    }

    #[test]
    fn empty_ignore_list_is_empty_set() {
        assert!(parse_ignored_users("").unwrap().is_empty());
        assert!(parse_ignored_users("   ").unwrap().is_empty());
    }

    #[test]
    fn invalid_ignore_list_json_is_a_hard_error() {
        assert!(parse_ignored_users("bob").is_err());
        assert!(parse_ignored_users(r#"["bob""#).is_err());
    }

    #[test]
    fn ignore_list_parses_into_set() {
        let users = parse_ignored_users(r#"["bob", "eve"]"#).unwrap();
        assert!(users.contains("bob"));
        assert!(users.contains("eve"));
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn format_defaults_to_structured() {
        assert_eq!(OutputFormat::from_input(""), OutputFormat::Structured);
        assert_eq!(OutputFormat::from_input("json"), OutputFormat::Structured);
        assert_eq!(OutputFormat::from_input("markdown"), OutputFormat::Markdown);
        // The comparison is case-sensitive.
        assert_eq!(
            OutputFormat::from_input("Markdown"),
            OutputFormat::Structured
        );
    }
}
