use serde::Deserialize;

/// Configuration document as it appears on disk.
///
/// Every field is optional here so that a missing key can be reported by
/// name instead of surfacing as a generic YAML error.
///
/// Example YAML:
/// ```yaml
/// api_host_url: "https://api.github.com"
/// api_token: xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx
/// search_days: 7
/// teams:
///   - OWNER/TEAM_A
///   - OWNER/TEAM_B
/// user_name: MY_GITHUB_USER_NAME
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct RawConfig {
    /// GitHub API URL, or a GitHub Enterprise API host URL
    #[serde(default)]
    pub api_host_url: Option<String>,

    /// Personal access token (needs `repo` and `read:org`)
    #[serde(default)]
    pub api_token: Option<String>,

    /// Number of days to search for recently updated PRs
    #[serde(default)]
    pub search_days: Option<u32>,

    #[serde(default)]
    pub teams: Option<Vec<String>>,

    /// Login name the token belongs to
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Validated configuration, immutable for the lifetime of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_host_url: String,
    pub api_token: String,
    pub search_days: u32,
    pub teams: Vec<String>,
    pub user_name: String,
    /// Lower bound for `updated:>=` in `YYYY-MM-DD` form
    pub updated_since: String,
}
