//! Main workflow orchestration logic
//!
//! This module contains the bump procedure. `main.rs` only parses
//! arguments, loads configuration and maps the outcome to an exit code, so
//! the procedure can be driven from tests with a mock runner.

use chrono::Utc;
use tracing::info;

use crate::config::Config;
use crate::domain::version::tag_name;
use crate::domain::{
    bump_message_pattern, classify, has_previous_bump, render_message, BranchContext, BumpType,
    Commit, VersionAction,
};
use crate::error::{BumpError, Result};
use crate::event::Event;
use crate::exec::CommandRunner;
use crate::github::{since_hours, CommitFeed};
use crate::manifest::Manifest;
use crate::outcome::{SkipReason, WorkflowOutcome};
use crate::tools::{GitClient, NpmVersion};
use crate::ui::{display_commit_window, OutputSink};

/// Output name for whether a bump happened
pub const OUTPUT_BUMPED: &str = "bumped";
/// Output name for the new `<prefix><version>`
pub const OUTPUT_NEW_VERSION: &str = "newVersion";

/// Collaborators of a bump run
pub struct WorkflowDeps<'a> {
    /// Commit source used when a lookback window is configured
    pub feed: Option<&'a dyn CommitFeed>,
    pub runner: &'a dyn CommandRunner,
}

/// Commits to inspect: the API window when `hours_to_go_back` is set,
/// otherwise the event payload. An empty list counts as no commits.
pub fn resolve_commits(
    config: &Config,
    event: &Event,
    feed: Option<&dyn CommitFeed>,
) -> Result<Option<Vec<Commit>>> {
    let commits = match config.bump.hours_to_go_back {
        Some(hours) => {
            let feed = feed.ok_or_else(|| {
                BumpError::config("hours-to-go-back is set but no commit source is available")
            })?;
            feed.commits_since(since_hours(hours, Utc::now())?)?
        }
        None => event.commits.clone(),
    };

    Ok(commits.filter(|commits| !commits.is_empty()))
}

/// What to do with the commit window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Bump(VersionAction),
    Skip(SkipReason),
}

/// Decides what to do with the commit window.
pub fn decide(config: &Config, commits: Option<&[Commit]>) -> Result<Decision> {
    let bump = &config.bump;

    let Some(commits) = commits.filter(|commits| !commits.is_empty()) else {
        if bump.skip_if_no_commits {
            return Ok(Decision::Skip(SkipReason::NoCommits));
        }
        info!("Couldn't find any commits in this event, incrementing patch version...");
        return Ok(Decision::Bump(VersionAction::new(BumpType::Patch)));
    };

    display_commit_window(commits);

    let pattern = bump_message_pattern(&bump.commit_message, &bump.tag_prefix)?;
    if has_previous_bump(Some(commits), &pattern, bump.policy) {
        return Ok(Decision::Skip(SkipReason::PreviousBump));
    }

    match classify(
        commits,
        &bump.keywords(),
        bump.default,
        bump.preid.as_deref(),
    ) {
        Some(action) => Ok(Decision::Bump(action)),
        None => Ok(Decision::Skip(SkipReason::NoKeywords)),
    }
}

/// Main bump workflow
///
/// Orchestrates the whole run:
/// 1. Resolve the commit window and decide on a version action
/// 2. Read the current version from `package.json`
/// 3. Bump on the current (possibly detached) checkout and commit
/// 4. Check out the target branch and bump again
/// 5. Tag and push
///
/// `bumped=false` is written before anything else so early exits still
/// leave well-formed outputs.
pub fn run_bump_workflow(
    config: &Config,
    event: &Event,
    deps: &WorkflowDeps<'_>,
    outputs: &mut dyn OutputSink,
) -> Result<WorkflowOutcome> {
    outputs.set_output(OUTPUT_BUMPED, "false")?;

    let commits = resolve_commits(config, event, deps.feed)?;
    let action = match decide(config, commits.as_deref())? {
        Decision::Bump(action) => action,
        Decision::Skip(reason) => return Ok(WorkflowOutcome::Skipped(reason)),
    };
    info!("Version action to use is: {}", action);

    apply_bump(config, event, deps.runner, outputs, &action)
}

fn apply_bump(
    config: &Config,
    event: &Event,
    runner: &dyn CommandRunner,
    outputs: &mut dyn OutputSink,
    action: &VersionAction,
) -> Result<WorkflowOutcome> {
    info!("Performing version bump ...");
    let bump = &config.bump;
    let dir = config.package_dir();

    let manifest = Manifest::load(&dir)?;
    let current = manifest.version().to_string();
    info!(
        "Current version of {} is {}",
        manifest.name().unwrap_or("package"),
        current
    );

    let git = GitClient::new(runner, &dir);
    let npm = NpmVersion::new(runner, &dir);

    if !config.development {
        git.configure_identity(&config.git.user_name, &config.git.user_email)?;
    }

    let pull_request_head = config
        .github
        .head_ref
        .as_deref()
        .or_else(|| event.pull_request_head());
    let branch = BranchContext::resolve(
        bump.target_branch.as_deref(),
        pull_request_head,
        config.github.git_ref.as_deref(),
    )
    .ok_or(BumpError::NoBranch)?;
    info!("Target branch: {}", branch.name);

    // Bump the checkout we were started on first, so its package.json
    // carries the new version too.
    npm.set(&current)?;
    let detached_version = npm.bump(action, false)?;
    let detached_tag = tag_name(&bump.tag_prefix, &detached_version);
    if !config.development {
        info!("Committing version bump ...");
        git.commit_all(&render_message(&bump.commit_message, &detached_tag))?;
    }

    if branch.is_pull_request {
        git.fetch()?;
    }
    git.checkout(&branch.name)?;

    npm.set(&current)?;
    let version = npm.bump(action, true)?;
    let tag = tag_name(&bump.tag_prefix, &version);
    info!("New version {} (tag {})", version, tag);
    outputs.set_output(OUTPUT_NEW_VERSION, &tag)?;

    if !config.development {
        let remote = config.github.remote_url()?;
        if !bump.skip_tag {
            info!("Tagging version bump commit ...");
            git.tag(&tag)?;
            info!("Pushing version bump commit and tag ...");
            git.push_follow_tags(&remote)?;
            git.push_tags(&remote)?;
        } else {
            info!("Pushing version bump commit ...");
            git.push(&remote)?;
        }
    }

    outputs.set_output(OUTPUT_BUMPED, "true")?;

    Ok(WorkflowOutcome::Bumped {
        version,
        tag,
        branch: branch.name,
    })
}
