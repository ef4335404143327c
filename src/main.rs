use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use version_bump::cli::orchestration::OUTPUT_BUMPED;
use version_bump::cli::{run_bump_workflow, WorkflowDeps};
use version_bump::config::{self, Config};
use version_bump::event::Event;
use version_bump::exec::ProcessRunner;
use version_bump::github::{CommitFeed, GithubClient};
use version_bump::outcome::WorkflowOutcome;
use version_bump::ui::{self, GithubOutputs, OutputSink};

#[derive(clap::Parser)]
#[command(
    name = "version-bump",
    version,
    about = "Bump the package version from commit message keywords, then commit, tag and push"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Directory holding the checkout (overrides GITHUB_WORKSPACE)")]
    workspace: Option<PathBuf>,

    #[arg(long, help = "Development mode: no git identity, commit, tag or push")]
    dev: bool,

    #[arg(short, long, help = "Log debug output, including executed commands")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Values already in the environment win over `.env`
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(outcome) => {
            ui::display_success(&outcome.message());
            Ok(())
        }
        Err(e) => {
            ui::display_fatal(&format!("Failed to bump version: {:#}", e));
            std::process::exit(1);
        }
    }
}

/// Everything the workflow needs, loaded before it starts
struct Prepared {
    config: Config,
    event: Event,
    client: Option<GithubClient>,
}

fn prepare(args: Args) -> Result<Prepared> {
    let mut config = config::load_config(args.config.as_deref())
        .context("Error loading config")?
        .with_process_env()?;
    if let Some(workspace) = args.workspace {
        config.github.workspace = workspace;
    }
    if args.dev {
        config.development = true;
    }

    let event = Event::load(config.github.event_path.as_deref())
        .context("Error reading the event payload")?;

    // Only needed for the API lookback window
    let client = match config.bump.hours_to_go_back {
        Some(_) => Some(GithubClient::new(&config.github)?),
        None => None,
    };

    Ok(Prepared {
        config,
        event,
        client,
    })
}

fn run(args: Args) -> Result<WorkflowOutcome> {
    let Prepared {
        config,
        event,
        client,
    } = match prepare(args) {
        Ok(prepared) => prepared,
        Err(e) => {
            // The workflow never started, so `bumped` was not reported yet
            let file = std::env::var_os("GITHUB_OUTPUT")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from);
            if let Err(output_err) = GithubOutputs::new(file).set_output(OUTPUT_BUMPED, "false") {
                warn!("Could not write the {} output: {}", OUTPUT_BUMPED, output_err);
            }
            return Err(e);
        }
    };

    let runner = ProcessRunner;
    let deps = WorkflowDeps {
        feed: client.as_ref().map(|client| client as &dyn CommitFeed),
        runner: &runner,
    };
    let mut outputs = GithubOutputs::new(config.github.output_file.clone());

    let outcome = run_bump_workflow(&config, &event, &deps, &mut outputs)?;
    Ok(outcome)
}
