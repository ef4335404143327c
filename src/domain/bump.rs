use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::domain::commit::Commit;
use crate::error::BumpError;

/// Which part of the version `npm version` should increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum BumpType {
    Major,
    Minor,
    Patch,
    Prerelease,
    /// Do not bump at all
    None,
}

impl BumpType {
    /// The keyword `npm version` understands
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpType::Major => "major",
            BumpType::Minor => "minor",
            BumpType::Patch => "patch",
            BumpType::Prerelease => "prerelease",
            BumpType::None => "none",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpType {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(BumpType::Major),
            "minor" => Ok(BumpType::Minor),
            "patch" => Ok(BumpType::Patch),
            "prerelease" => Ok(BumpType::Prerelease),
            "none" => Ok(BumpType::None),
            other => Err(BumpError::config(format!(
                "Unknown bump type '{}' (expected major, minor, patch, prerelease or none)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for BumpType {
    type Error = BumpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A resolved bump: the part to increment plus an optional pre-release id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionAction {
    pub bump: BumpType,
    pub preid: Option<String>,
}

impl VersionAction {
    pub fn new(bump: BumpType) -> Self {
        VersionAction { bump, preid: None }
    }

    /// Arguments appended to `npm version --git-tag-version=false`
    pub fn npm_args(&self) -> Vec<String> {
        let mut args = vec![self.bump.as_str().to_string()];
        if let Some(preid) = &self.preid {
            args.push(format!("--preid={}", preid));
        }
        args
    }
}

impl fmt::Display for VersionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.npm_args().join(" "))
    }
}

/// Keyword lists that select a bump type.
///
/// `patch` and `prerelease` may be absent, in which case they never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    pub major: Vec<String>,
    pub minor: Vec<String>,
    pub patch: Option<Vec<String>>,
    pub prerelease: Option<Vec<String>>,
}

fn contains_any(message: &str, words: &[String]) -> Option<String> {
    words
        .iter()
        .filter(|word| !word.trim().is_empty())
        .find(|word| message.contains(word.as_str()))
        .cloned()
}

/// Picks the version action from the newest commit's message.
///
/// Only `commits[0]` is inspected; the rest of the window plays no part.
/// Priority is major > minor > patch > prerelease, falling back to `default`.
/// Returns `None` when the resolved type is [`BumpType::None`].
///
/// # Panics
/// If `commits` is empty. Callers must short-circuit on an empty window.
pub fn classify(
    commits: &[Commit],
    keywords: &Keywords,
    default: BumpType,
    preid: Option<&str>,
) -> Option<VersionAction> {
    let message = commits[0].message.as_str();

    let candidates = [
        (BumpType::Major, Some(keywords.major.as_slice())),
        (BumpType::Minor, Some(keywords.minor.as_slice())),
        (BumpType::Patch, keywords.patch.as_deref()),
        (BumpType::Prerelease, keywords.prerelease.as_deref()),
    ];

    let bump = candidates
        .iter()
        .find_map(|(bump, words)| {
            let word = contains_any(message, (*words)?)?;
            debug!(keyword = %word, bump = %bump, "matched version keyword");
            Some(*bump)
        })
        .unwrap_or(default);

    if bump == BumpType::None {
        return None;
    }

    let preid = match bump {
        BumpType::Prerelease => preid.filter(|id| !id.is_empty()).map(str::to_string),
        _ => None,
    };

    Some(VersionAction { bump, preid })
}
