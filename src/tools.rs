//! Thin wrappers that turn bump steps into `git` and `npm` command lines.

use std::path::Path;

use tracing::info;

use crate::domain::version::parse_tool_output;
use crate::domain::VersionAction;
use crate::error::Result;
use crate::exec::CommandRunner;

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// `git` invocations in the package directory
pub struct GitClient<'a> {
    runner: &'a dyn CommandRunner,
    dir: &'a Path,
}

impl<'a> GitClient<'a> {
    pub fn new(runner: &'a dyn CommandRunner, dir: &'a Path) -> Self {
        GitClient { runner, dir }
    }

    fn git(&self, args: Vec<String>) -> Result<()> {
        self.runner.run(self.dir, "git", &args)
    }

    pub fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        self.git(owned(&["config", "user.name", name]))?;
        self.git(owned(&["config", "user.email", email]))
    }

    /// Commit all tracked modifications
    pub fn commit_all(&self, message: &str) -> Result<()> {
        self.git(owned(&["commit", "-a", "-m", message]))
    }

    pub fn fetch(&self) -> Result<()> {
        self.git(owned(&["fetch"]))
    }

    pub fn checkout(&self, branch: &str) -> Result<()> {
        self.git(owned(&["checkout", branch]))
    }

    pub fn tag(&self, name: &str) -> Result<()> {
        self.git(owned(&["tag", name]))
    }

    /// Push the current branch, following annotated tags
    pub fn push_follow_tags(&self, remote: &str) -> Result<()> {
        self.git(owned(&["push", remote, "--follow-tags"]))
    }

    pub fn push_tags(&self, remote: &str) -> Result<()> {
        self.git(owned(&["push", remote, "--tags"]))
    }

    pub fn push(&self, remote: &str) -> Result<()> {
        self.git(owned(&["push", remote]))
    }
}

/// `npm version` invocations in the package directory
pub struct NpmVersion<'a> {
    runner: &'a dyn CommandRunner,
    dir: &'a Path,
}

impl<'a> NpmVersion<'a> {
    pub fn new(runner: &'a dyn CommandRunner, dir: &'a Path) -> Self {
        NpmVersion { runner, dir }
    }

    /// Force the manifest to `version` without creating a tag
    pub fn set(&self, version: &str) -> Result<()> {
        let args = owned(&[
            "version",
            "--allow-same-version=true",
            "--git-tag-version=false",
            version,
        ]);
        self.runner.run(self.dir, "npm", &args)
    }

    /// Apply `action` without creating a tag and return the new version.
    ///
    /// See [`parse_tool_output`] for `workspace_quirk`.
    pub fn bump(&self, action: &VersionAction, workspace_quirk: bool) -> Result<String> {
        let mut args = owned(&["version", "--git-tag-version=false"]);
        args.extend(action.npm_args());

        let stdout = self.runner.capture(self.dir, "npm", &args)?;
        let version = parse_tool_output(&stdout, workspace_quirk);
        info!("npm version {} -> {}", action, version);
        Ok(version)
    }
}
