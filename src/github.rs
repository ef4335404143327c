//! Commit retrieval from the GitHub REST API.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use tracing::info;

use crate::config::GithubConfig;
use crate::domain::Commit;
use crate::error::{BumpError, Result};

/// Source of commits for a time window.
///
/// Returns `Ok(None)` when the window holds no commits.
pub trait CommitFeed {
    fn commits_since(&self, since: DateTime<Utc>) -> Result<Option<Vec<Commit>>>;
}

/// `now` minus `hours`, or a config error when that leaves the
/// representable date range.
pub fn since_hours(hours: i64, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    TimeDelta::try_hours(hours)
        .and_then(|delta| now.checked_sub_signed(delta))
        .ok_or_else(|| BumpError::config("INPUT_HOURS-TO-GO-BACK is out of range"))
}

#[derive(Debug, Deserialize)]
struct CommitItem {
    commit: Commit,
}

/// Blocking client for `GET /repos/{owner}/{repo}/commits`
pub struct GithubClient {
    client: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let repository = config
            .repository
            .as_deref()
            .ok_or_else(|| BumpError::config("GITHUB_REPOSITORY is not set"))?;
        let (owner, repo) = split_repository(repository)?;

        Ok(GithubClient {
            client: Client::builder().build()?,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: config.token.clone(),
        })
    }

    fn commits_url(&self) -> String {
        format!("{}/repos/{}/{}/commits", self.api_url, self.owner, self.repo)
    }
}

/// Splits `owner/repo`
pub fn split_repository(repository: &str) -> Result<(&str, &str)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok((owner, repo)),
        _ => Err(BumpError::config(format!(
            "Repository must look like 'owner/repo', got '{}'",
            repository
        ))),
    }
}

impl CommitFeed for GithubClient {
    fn commits_since(&self, since: DateTime<Utc>) -> Result<Option<Vec<Commit>>> {
        let since = since.to_rfc3339_opts(SecondsFormat::Millis, true);
        info!(
            "Getting commits for repo {}/{} since {} until now ({}) from GitHub API ...",
            self.owner,
            self.repo,
            since,
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        );

        let mut request = self
            .client
            .get(self.commits_url())
            .query(&[("since", since.as_str())])
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("version-bump/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BumpError::api(format!("{} {}", status, body.trim())));
        }

        let items: Vec<CommitItem> = response.json()?;
        Ok(commits_from_items(items))
    }
}

fn commits_from_items(items: Vec<CommitItem>) -> Option<Vec<Commit>> {
    if items.is_empty() {
        return None;
    }
    Some(items.into_iter().map(|item| item.commit).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_since_hours() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let since = since_hours(36, now).unwrap();
        assert_eq!(since, Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_since_hours_out_of_range() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        for hours in [3_000_000_000, i64::MAX, i64::MIN] {
            let err = since_hours(hours, now).unwrap_err();
            assert!(matches!(err, BumpError::Config(_)));
            assert!(err.to_string().contains("out of range"));
        }
    }

    #[test]
    fn test_split_repository() {
        assert_eq!(split_repository("acme/widget").unwrap(), ("acme", "widget"));
        assert!(split_repository("widget").is_err());
        assert!(split_repository("/widget").is_err());
    }

    #[test]
    fn test_api_response_shape() {
        let json = r#"[
            {
                "sha": "6dcb09b",
                "commit": {
                    "author": { "name": "Monalisa", "email": "m@github.com", "date": "2011-04-14T16:00:49Z" },
                    "committer": { "name": "Monalisa", "email": "m@github.com", "date": "2011-04-14T16:00:49Z" },
                    "message": "Fix all the bugs"
                }
            }
        ]"#;

        let items: Vec<CommitItem> = serde_json::from_str(json).unwrap();
        let commits = commits_from_items(items).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "Fix all the bugs");
    }

    #[test]
    fn test_empty_response_is_none() {
        assert_eq!(commits_from_items(Vec::new()), None);
    }

    #[test]
    fn test_client_requires_repository() {
        let config = GithubConfig::default();
        assert!(GithubClient::new(&config).is_err());
    }

    #[test]
    fn test_commits_url() {
        let config = GithubConfig {
            repository: Some("acme/widget".to_string()),
            api_url: "https://ghe.acme.dev/api/v3/".to_string(),
            ..GithubConfig::default()
        };
        let client = GithubClient::new(&config).unwrap();
        assert_eq!(
            client.commits_url(),
            "https://ghe.acme.dev/api/v3/repos/acme/widget/commits"
        );
    }
}
