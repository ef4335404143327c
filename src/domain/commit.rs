use serde::Deserialize;

/// Name and email of a commit author or committer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A commit as seen in a push event payload or the GitHub commits API.
///
/// Only the message takes part in bump decisions; author and committer are
/// carried for logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub author: Option<Person>,
    #[serde(default)]
    pub committer: Option<Person>,
    #[serde(default)]
    pub message: String,
}

impl Commit {
    /// Create a commit carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        Commit {
            author: None,
            committer: None,
            message: message.into(),
        }
    }

    /// First line of the message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
