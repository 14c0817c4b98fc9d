use anyhow::{Context, Result};
use serde::Deserialize;

/// Envelope returned by `GET /search/issues`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub pull_request: PullRequestLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestLink {
    /// API URL of the pull request detail document
    pub url: String,
}

/// Pull request detail as returned by `GET /repos/{owner}/{repo}/pulls/{number}`
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestDetail {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub user: User,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub merged: bool,
    /// `null` while GitHub is still computing mergeability
    #[serde(default)]
    pub mergeable: Option<bool>,
    pub head: Head,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Head {
    pub sha: String,
    /// Missing when the source fork has been deleted
    pub repo: Option<HeadRepo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadRepo {
    pub name: String,
    /// API URL of the repository, e.g. "https://api.github.com/repos/owner/repo"
    pub url: String,
}

/// Envelope returned by `GET /repos/{owner}/{repo}/commits/{sha}/check-suites`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckSuites {
    pub check_suites: Vec<CheckSuite>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckSuite {
    /// queued, in_progress, completed, ... (v4 uses upper case)
    pub status: String,
    pub conclusion: Option<String>,
    pub latest_check_runs_count: u64,
}

/// A pull request reduced to what the report needs
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    pub repo: String,           // head repository name, without owner
    pub number: u64,
    pub title: String,
    pub author: String,
    pub url: String,            // HTML URL for the status-bar link
    pub labels: Vec<String>,
    pub merged: bool,
    pub mergeable: Option<bool>,
    pub head_repo_url: String,
    pub head_sha: String,
}

impl PullRequest {
    /// Build the record from a detail document.
    ///
    /// Fails when the head repository is gone, since there is nowhere to
    /// look up check suites.
    pub fn from_detail(detail: PullRequestDetail) -> Result<Self> {
        let head_repo = detail.head.repo.with_context(|| {
            format!("Pull request {} has no head repository", detail.html_url)
        })?;

        Ok(Self {
            repo: head_repo.name,
            number: detail.number,
            title: detail.title,
            author: detail.user.login,
            url: detail.html_url,
            labels: detail.labels.into_iter().map(|l| l.name).collect(),
            merged: detail.merged,
            mergeable: detail.mergeable,
            head_repo_url: head_repo.url,
            head_sha: detail.head.sha,
        })
    }

    /// Check suites for the head commit
    pub fn check_suites_url(&self) -> String {
        format!(
            "{}/commits/{}/check-suites",
            self.head_repo_url.trim_end_matches('/'),
            self.head_sha
        )
    }
}
