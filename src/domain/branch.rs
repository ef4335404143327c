use regex::Regex;

/// The branch the bump is pushed to, and whether it came from a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_pull_request: bool,
}

impl BranchContext {
    /// Resolve the target branch.
    ///
    /// Precedence: explicit override, then the pull request head branch, then
    /// the branch named by `refs/<kind>/<name>`. A present pull request head
    /// marks the run as a pull request even when the override wins.
    pub fn resolve(
        target_override: Option<&str>,
        pull_request_head: Option<&str>,
        git_ref: Option<&str>,
    ) -> Option<Self> {
        let pull_request_head = pull_request_head.filter(|head| !head.is_empty());
        let is_pull_request = pull_request_head.is_some();

        let name = target_override
            .filter(|name| !name.is_empty())
            .or(pull_request_head)
            .map(str::to_string)
            .or_else(|| git_ref.and_then(branch_from_ref))?;

        Some(BranchContext {
            name,
            is_pull_request,
        })
    }
}

/// Extract the branch name from a full ref like `refs/heads/main`
pub fn branch_from_ref(git_ref: &str) -> Option<String> {
    Regex::new(r"refs/[a-zA-Z]+/(.*)")
        .ok()?
        .captures(git_ref)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_from_ref() {
        assert_eq!(branch_from_ref("refs/heads/main"), Some("main".to_string()));
        assert_eq!(
            branch_from_ref("refs/heads/feature/login"),
            Some("feature/login".to_string())
        );
        assert_eq!(branch_from_ref("refs/tags/v1.0.0"), Some("v1.0.0".to_string()));
        assert_eq!(branch_from_ref("main"), None);
        assert_eq!(branch_from_ref("refs/heads/"), None);
    }

    #[test]
    fn test_override_wins() {
        let branch =
            BranchContext::resolve(Some("release"), Some("feature"), Some("refs/heads/main"))
                .unwrap();
        assert_eq!(branch.name, "release");
        assert!(branch.is_pull_request);
    }

    #[test]
    fn test_pull_request_head_beats_ref() {
        let branch =
            BranchContext::resolve(None, Some("feature"), Some("refs/pull/7/merge")).unwrap();
        assert_eq!(branch.name, "feature");
        assert!(branch.is_pull_request);
    }

    #[test]
    fn test_ref_is_last_resort() {
        let branch = BranchContext::resolve(None, None, Some("refs/heads/develop")).unwrap();
        assert_eq!(branch.name, "develop");
        assert!(!branch.is_pull_request);
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let branch = BranchContext::resolve(Some(""), Some(""), Some("refs/heads/main")).unwrap();
        assert_eq!(branch.name, "main");
        assert!(!branch.is_pull_request);
    }

    #[test]
    fn test_nothing_resolves() {
        assert_eq!(BranchContext::resolve(None, None, None), None);
        assert_eq!(BranchContext::resolve(None, None, Some("HEAD")), None);
    }
}
