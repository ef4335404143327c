use std::fmt;

/// Conditions under which a run ends successfully without bumping.
/// These are not errors; the step still exits with code 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither the event nor the API returned commits
    NoCommits,
    /// A commit in the window already carries the bump message
    PreviousBump,
    /// No keyword matched and the default bump type is `none`
    NoKeywords,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCommits => {
                write!(f, "No action necessary because we found no commits!")
            }
            SkipReason::PreviousBump => {
                write!(f, "No action necessary because we found a previous bump!")
            }
            SkipReason::NoKeywords => write!(f, "No version keywords found, skipping bump."),
        }
    }
}

/// How a bump run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Skipped(SkipReason),
    Bumped {
        /// New version as reported by `npm version`, without the tag prefix
        version: String,
        /// `<tag prefix><version>`
        tag: String,
        /// Branch the bump commit went to
        branch: String,
    },
}

impl WorkflowOutcome {
    /// Message shown when the run exits successfully
    pub fn message(&self) -> String {
        match self {
            WorkflowOutcome::Skipped(reason) => reason.to_string(),
            WorkflowOutcome::Bumped { version, .. } => {
                format!("Bumped to new version {}.", version)
            }
        }
    }

    pub fn is_bumped(&self) -> bool {
        matches!(self, WorkflowOutcome::Bumped { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_messages() {
        assert!(SkipReason::NoCommits.to_string().contains("no commits"));
        assert!(SkipReason::PreviousBump
            .to_string()
            .contains("previous bump"));
        assert!(SkipReason::NoKeywords.to_string().contains("keywords"));
    }

    #[test]
    fn test_outcome_message() {
        let bumped = WorkflowOutcome::Bumped {
            version: "1.2.3".to_string(),
            tag: "v1.2.3".to_string(),
            branch: "main".to_string(),
        };
        assert_eq!(bumped.message(), "Bumped to new version 1.2.3.");
        assert!(bumped.is_bumped());

        let skipped = WorkflowOutcome::Skipped(SkipReason::PreviousBump);
        assert_eq!(skipped.message(), SkipReason::PreviousBump.to_string());
        assert!(!skipped.is_bumped());
    }
}
