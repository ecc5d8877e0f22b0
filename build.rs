//! Build script for fetch-open-prs - embeds version information.
//!
//! Prefers `git describe --tags --always --dirty` when a tag is reachable;
//! otherwise falls back to a pseudo-version built from the Cargo.toml
//! version, a timestamp, and the short commit hash. The result lands in
//! `BUILD_INFO_HUMAN` for clap's `--version` output.

use std::process::Command;

use chrono::Utc;

fn main() {
    ["src", "build.rs", "Cargo.toml"]
        .iter()
        .for_each(|path| println!("cargo:rerun-if-changed={path}"));

    println!(
        "cargo:rustc-env=BUILD_INFO_HUMAN={}",
        human_readable_version()
    );
}

/// Executes a git command and returns the trimmed stdout on success.
fn git_command(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn git_version() -> Option<String> {
    git_command(&["describe", "--tags", "--always", "--dirty"]).map(|desc| {
        // A bare hash means no tags exist; synthesize something readable.
        if !desc.contains('v') && !desc.contains("-g") {
            pseudo_version()
        } else {
            desc
        }
    })
}

/// v{version}-{timestamp}-{commit} when git describe has no tag to anchor on.
fn pseudo_version() -> String {
    let commit =
        git_command(&["rev-parse", "--short=12", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let version = env!("CARGO_PKG_VERSION");

    format!("v{version}-{timestamp}-{commit}")
}

fn human_readable_version() -> String {
    let components = [
        Some(env!("CARGO_PKG_VERSION").to_string()),
        git_version().map(|v| format!("({v})")),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();

    components.join(" ")
}
