use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::github::client::{Fetch, ACCEPT_CHECKS_PREVIEW, ACCEPT_V3};
use crate::github::types::{CheckSuites, PullRequest, PullRequestDetail, SearchItem, SearchResults};

/// One "involves:" clause for the user, then one "team:" clause per team
pub fn subject_expressions(config: &Config) -> Vec<String> {
    std::iter::once(format!("involves:{}", config.user_name))
        .chain(config.teams.iter().map(|team| format!("team:{}", team)))
        .collect()
}

/// Full search query for a subject expression
pub fn build_query(updated_since: &str, subject: &str) -> String {
    format!(
        "is:open is:pr sort:updated-desc updated:>={} {}",
        updated_since, subject
    )
}

/// `<host>/search/issues?q=<query>`, with the query percent-encoded
pub fn search_url(api_host_url: &str, query: &str) -> Result<String> {
    let base = format!("{}/search/issues", api_host_url.trim_end_matches('/'));
    let mut url = Url::parse(&base)
        .with_context(|| format!("Invalid api_host_url: {}", api_host_url))?;
    url.query_pairs_mut().append_pair("q", query);
    Ok(url.to_string())
}

fn decode<T: DeserializeOwned>(body: &str, what: &str, url: &str) -> Result<T> {
    serde_json::from_str(body).with_context(|| format!("Malformed {} response from {}", what, url))
}

/// Search GitHub for open PRs matching the subject expression
pub async fn search_prs<F: Fetch>(
    client: &F,
    config: &Config,
    subject: &str,
) -> Result<Vec<SearchItem>> {
    let query = build_query(&config.updated_since, subject);
    let url = search_url(&config.api_host_url, &query)?;
    debug!("search_url => {}", url);

    let body = client.get(&url, ACCEPT_V3).await?;
    debug!("search_response => {}", body);

    let results: SearchResults = decode(&body, "search", &url)?;
    Ok(results.items)
}

/// Fetch the detail document linked from a search item
pub async fn fetch_pr_detail<F: Fetch>(client: &F, pr_url: &str) -> Result<PullRequest> {
    debug!("pr_url => {}", pr_url);

    let body = client.get(pr_url, ACCEPT_V3).await?;
    debug!("pr_response => {}", body);

    let detail: PullRequestDetail = decode(&body, "pull request", pr_url)?;
    PullRequest::from_detail(detail)
}

/// Fetch the check suites for the PR's head commit
pub async fn fetch_check_suites<F: Fetch>(client: &F, pr: &PullRequest) -> Result<CheckSuites> {
    let url = pr.check_suites_url();
    debug!("check_suites_url => {}", url);

    let body = client.get(&url, ACCEPT_CHECKS_PREVIEW).await?;
    debug!("check_suites_response => {}", body);

    decode(&body, "check suites", &url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            api_host_url: "https://api.github.com".to_string(),
            api_token: "t".to_string(),
            search_days: 7,
            teams: vec!["acme/core".to_string(), "acme/web".to_string()],
            user_name: "octocat".to_string(),
            updated_since: "2024-03-08".to_string(),
        }
    }

    #[test]
    fn test_subject_expressions_user_first_then_teams() {
        assert_eq!(
            subject_expressions(&config()),
            vec!["involves:octocat", "team:acme/core", "team:acme/web"]
        );
    }

    #[test]
    fn test_build_query() {
        assert_eq!(
            build_query("2024-03-08", "team:acme/core"),
            "is:open is:pr sort:updated-desc updated:>=2024-03-08 team:acme/core"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = search_url("https://api.github.com", "is:pr updated:>=2024-03-08 team:a/b").unwrap();
        assert!(url.starts_with("https://api.github.com/search/issues?q="));
        assert!(!url.contains(' '));
        assert!(!url.contains('>'));

        let parsed = Url::parse(&url).unwrap();
        let (key, value) = parsed.query_pairs().next().unwrap();
        assert_eq!(key, "q");
        assert_eq!(value, "is:pr updated:>=2024-03-08 team:a/b");
    }

    #[test]
    fn test_search_url_keeps_enterprise_path() {
        let url = search_url("https://ghe.example.com/api/v3/", "is:pr").unwrap();
        assert!(url.starts_with("https://ghe.example.com/api/v3/search/issues?q="));
    }

    #[test]
    fn test_search_url_rejects_garbage_host() {
        let err = search_url("not a url", "is:pr").unwrap_err();
        assert!(err.to_string().contains("Invalid api_host_url"));
    }
}
