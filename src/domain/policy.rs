use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::info;

use crate::domain::commit::Commit;
use crate::error::{BumpError, Result};

/// Placeholder in the commit message template that receives the new version
pub const VERSION_PLACEHOLDER: &str = "{{version}}";

/// How to look for an earlier bump commit in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum BumpPolicy {
    /// Any commit in the window counts
    #[default]
    All,
    /// Only the last commit in the list counts
    LastCommit,
    /// Never report a previous bump
    Ignore,
}

impl From<&str> for BumpPolicy {
    fn from(value: &str) -> Self {
        match value {
            "last-commit" => BumpPolicy::LastCommit,
            "ignore" => BumpPolicy::Ignore,
            _ => BumpPolicy::All,
        }
    }
}

impl From<String> for BumpPolicy {
    fn from(value: String) -> Self {
        BumpPolicy::from(value.as_str())
    }
}

/// Fills the `{{version}}` placeholder of a commit message template.
pub fn render_message(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

/// Builds the case-insensitive pattern that recognises bump commits.
///
/// Literal text from the template and the tag prefix is escaped; each
/// placeholder becomes `<prefix>\d+\.\d+\.\d+`.
pub fn bump_message_pattern(template: &str, tag_prefix: &str) -> Result<Regex> {
    let version = format!(r"{}\d+\.\d+\.\d+", regex::escape(tag_prefix));
    let pattern = template
        .split(VERSION_PLACEHOLDER)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(&version);

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| BumpError::config(format!("Invalid commit message template: {}", e)))
}

/// Reports whether the window already holds a bump commit, per `policy`.
///
/// An absent or empty list never holds one.
pub fn has_previous_bump(commits: Option<&[Commit]>, pattern: &Regex, policy: BumpPolicy) -> bool {
    let commits = commits.unwrap_or_default();

    let found = match policy {
        BumpPolicy::LastCommit => {
            info!("Checking for CI version bump in the last commit ...");
            commits
                .last()
                .is_some_and(|commit| pattern.is_match(&commit.message))
        }
        BumpPolicy::Ignore => {
            info!("Ignoring any version bumps in commits ...");
            false
        }
        BumpPolicy::All => {
            info!("Checking for CI version bump in all previous commits ...");
            commits.iter().any(|commit| pattern.is_match(&commit.message))
        }
    };

    info!("Found a previous version bump: {}", found);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "ci: version bump to {{version}}";

    fn commits(messages: &[&str]) -> Vec<Commit> {
        messages.iter().map(|m| Commit::new(*m)).collect()
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(BumpPolicy::from("last-commit"), BumpPolicy::LastCommit);
        assert_eq!(BumpPolicy::from("ignore"), BumpPolicy::Ignore);
        assert_eq!(BumpPolicy::from("anything"), BumpPolicy::All);
        assert_eq!(BumpPolicy::from(""), BumpPolicy::All);
        assert_eq!(BumpPolicy::default(), BumpPolicy::All);
    }

    #[test]
    fn test_render_message() {
        assert_eq!(render_message(TEMPLATE, "v1.2.3"), "ci: version bump to v1.2.3");
    }

    #[test]
    fn test_pattern_matches_case_insensitively() {
        let re = bump_message_pattern(TEMPLATE, "").unwrap();
        assert!(re.is_match("CI: Version Bump to 1.2.3"));
        assert!(!re.is_match("ci: version bump to next"));
    }

    #[test]
    fn test_pattern_includes_prefix() {
        let re = bump_message_pattern(TEMPLATE, "v").unwrap();
        assert!(re.is_match("ci: version bump to v10.0.1"));
        assert!(!re.is_match("ci: version bump to 10.0.1"));
    }

    #[test]
    fn test_pattern_escapes_template_text() {
        let re = bump_message_pattern("release(ci): {{version}} [skip ci]", "release/").unwrap();
        assert!(re.is_match("release(ci): release/2.0.0 [skip ci]"));
        assert!(!re.is_match("releaseci: release/2.0.0 s"));
    }

    #[test]
    fn test_pattern_matches_anywhere_in_message() {
        let re = bump_message_pattern(TEMPLATE, "").unwrap();
        assert!(re.is_match("Merge pull request #4\n\nci: version bump to 0.0.9"));
    }

    #[test]
    fn test_all_policy_finds_any() {
        let re = bump_message_pattern(TEMPLATE, "").unwrap();
        let list = commits(&["ci: version bump to 1.0.1", "feat: x"]);
        assert!(has_previous_bump(Some(list.as_slice()), &re, BumpPolicy::All));
    }

    #[test]
    fn test_last_commit_policy_checks_last_only() {
        let re = bump_message_pattern(TEMPLATE, "").unwrap();
        let bump_first = commits(&["ci: version bump to 1.0.1", "feat: x"]);
        let bump_last = commits(&["feat: x", "ci: version bump to 1.0.1"]);
        assert!(!has_previous_bump(Some(bump_first.as_slice()), &re, BumpPolicy::LastCommit));
        assert!(has_previous_bump(Some(bump_last.as_slice()), &re, BumpPolicy::LastCommit));
    }

    #[test]
    fn test_ignore_policy_never_finds() {
        let re = bump_message_pattern(TEMPLATE, "").unwrap();
        let list = commits(&["ci: version bump to 1.0.1"]);
        assert!(!has_previous_bump(Some(list.as_slice()), &re, BumpPolicy::Ignore));
    }

    #[test]
    fn test_absent_or_empty_list_is_no_match() {
        let re = bump_message_pattern(TEMPLATE, "").unwrap();
        for policy in [BumpPolicy::All, BumpPolicy::LastCommit, BumpPolicy::Ignore] {
            assert!(!has_previous_bump(None, &re, policy));
            assert!(!has_previous_bump(Some(&[][..]), &re, policy));
        }
    }
}
