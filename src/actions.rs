//! The invocation-harness edge: named outputs and failure reporting in
//! the GitHub Actions workflow-command dialect.

use std::{io::Write, path::Path};

use anyhow::{Context, Result};

/// Publishes a named output value.
///
/// When `GITHUB_OUTPUT` is set the value is appended to that file as a
/// heredoc record; outside a workflow run the value goes to stdout so
/// the binary stays usable from a shell.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => append_output(Path::new(&path), name, value),
        None => {
            println!("{value}");
            Ok(())
        }
    }
}

fn append_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let delimiter = format!("ghadelimiter_{name}");
    if value.contains(&delimiter) || name.contains(&delimiter) {
        anyhow::bail!("Output value must not contain the heredoc delimiter '{delimiter}'");
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;

    writeln!(file, "{name}<<{delimiter}\n{value}\n{delimiter}")
        .with_context(|| format!("Failed to write output '{name}'"))?;

    Ok(())
}

/// Reports a terminal failure through the workflow error channel.
///
/// Emits an `::error::` workflow command on stdout; the caller is
/// responsible for exiting nonzero afterwards.
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

// Workflow-command data encoding: percent, CR, and LF must be escaped.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_workflow_command_data() {
        assert_eq!(escape_data("plain message"), "plain message");
        assert_eq!(escape_data("50% done\nnext"), "50%25 done%0Anext");
    }

    #[test]
    fn appends_heredoc_record() {
        let file = tempfile::NamedTempFile::new().unwrap();
        append_output(file.path(), "PRs", "[]").unwrap();
        append_output(file.path(), "PRs", "* line one\n* line two").unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            contents,
            "PRs<<ghadelimiter_PRs\n[]\nghadelimiter_PRs\n\
             PRs<<ghadelimiter_PRs\n* line one\n* line two\nghadelimiter_PRs\n"
        );
    }

    #[test]
    fn rejects_value_containing_delimiter() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = append_output(file.path(), "PRs", "ghadelimiter_PRs").unwrap_err();
        assert!(err.to_string().contains("delimiter"), "{err}");
    }
}
