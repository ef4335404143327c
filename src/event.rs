//! The webhook payload of the workflow run that triggered us.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::Commit;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub head: BranchRef,
}

/// The parts of a push or pull request event payload we look at
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub commits: Option<Vec<Commit>>,

    #[serde(default)]
    pub pull_request: Option<PullRequest>,
}

impl Event {
    /// Reads the payload at `path`, or returns an empty event when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Event> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                Ok(serde_json::from_str(&content)?)
            }
            None => Ok(Event::default()),
        }
    }

    /// Head branch of the pull request, when this is a pull request event
    pub fn pull_request_head(&self) -> Option<&str> {
        self.pull_request
            .as_ref()
            .map(|pr| pr.head.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_push_event() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "ref": "refs/heads/main",
                "commits": [
                    {{ "id": "a1", "message": "feat: one", "author": {{ "name": "A", "email": "a@x.dev" }} }},
                    {{ "id": "b2", "message": "fix: two" }}
                ]
            }}"#
        )
        .unwrap();

        let event = Event::load(Some(file.path())).unwrap();
        let commits = event.commits.unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "feat: one");
        assert!(event.pull_request.is_none());
    }

    #[test]
    fn test_load_pull_request_event() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "pull_request": {{ "head": {{ "ref": "feature/x", "sha": "abc" }} }} }}"#
        )
        .unwrap();

        let event = Event::load(Some(file.path())).unwrap();
        assert_eq!(event.commits, None);
        assert_eq!(event.pull_request_head(), Some("feature/x"));
    }

    #[test]
    fn test_no_path_is_empty_event() {
        let event = Event::load(None).unwrap();
        assert_eq!(event, Event::default());
        assert_eq!(event.pull_request_head(), None);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Event::load(Some(Path::new("/nonexistent/event.json"))).is_err());
    }
}
