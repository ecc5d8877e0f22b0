use anyhow::Result;
use fetch_open_prs::{
    GitHub, actions, build_client, fetch_open_pull_requests, parse_args, render_output,
    types::ActionSpec,
};

fn handle_clap_help_version(clap_err: &clap::Error) -> ! {
    use clap::error::ErrorKind;
    match clap_err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{clap_err}");
            std::process::exit(0);
        }
        _ => {
            eprint!("{clap_err}");
            std::process::exit(2);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(spec: &ActionSpec) -> Result<()> {
    let forge = GitHub::new(build_client(spec.token.clone())?);
    let report = fetch_open_pull_requests(spec, &forge).await?;
    let rendered = render_output(&report, spec.format)?;

    actions::set_output("PRs", &rendered)
}

#[tokio::main]
async fn main() {
    init_tracing();

    let spec = match parse_args(std::env::args()) {
        Ok(spec) => spec,
        Err(err) => {
            if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
                handle_clap_help_version(clap_err);
            }
            actions::set_failed(&format!("{err:#}"));
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&spec).await {
        actions::set_failed(&format!("{err:#}"));
        std::process::exit(1);
    }
}
