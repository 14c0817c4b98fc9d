mod schema;

pub use schema::{Config, RawConfig};

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".github-open-prs.yaml";

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingFile(PathBuf),
    MissingField(&'static str),
    NoTeams,
    WindowOutOfRange(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingFile(path) => write!(f, "Missing config file: {}", path.display()),
            ConfigError::MissingField(name) => write!(f, "Missing configuration field: {}", name),
            ConfigError::NoTeams => {
                write!(f, "Missing configuration: teams to check requires at least one")
            }
            ConfigError::WindowOutOfRange(days) => {
                write!(f, "Invalid configuration field: search_days ({} is too large)", days)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Get the config file path (~/.github-open-prs.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(CONFIG_FILE_NAME))
}

/// Load and validate configuration.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. If None, uses ~/.github-open-prs.yaml
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist or cannot be read
/// - The YAML cannot be parsed
/// - A required field is missing or empty (the error names the field)
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };
    load_config_at(&config_path, Local::now().date_naive())
}

/// Load configuration from `path`, deriving the search window from `today`.
pub fn load_config_at(path: &Path, today: NaiveDate) -> Result<Config> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let raw: RawConfig = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    Ok(validate(raw, today)?)
}

/// Check required fields in the order they are documented and build a [`Config`].
pub fn validate(raw: RawConfig, today: NaiveDate) -> Result<Config, ConfigError> {
    let api_host_url = required(raw.api_host_url, "api_host_url")?;
    let search_days = raw
        .search_days
        .ok_or(ConfigError::MissingField("search_days"))?;
    let api_token = required(raw.api_token, "api_token")?;
    let user_name = required(raw.user_name, "user_name")?;

    let teams: Vec<String> = raw
        .teams
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if teams.is_empty() {
        return Err(ConfigError::NoTeams);
    }

    let updated_since = updated_since(today, search_days)?;

    Ok(Config {
        api_host_url: api_host_url.trim_end_matches('/').to_string(),
        api_token,
        search_days,
        teams,
        user_name,
        updated_since,
    })
}

/// `today` minus `days`, as `YYYY-MM-DD`
pub fn updated_since(today: NaiveDate, days: u32) -> Result<String, ConfigError> {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or(ConfigError::WindowOutOfRange(days))
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingField(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn full_raw() -> RawConfig {
        RawConfig {
            api_host_url: Some("https://api.github.com".to_string()),
            api_token: Some("secret".to_string()),
            search_days: Some(7),
            teams: Some(vec!["acme/core".to_string(), "acme/web".to_string()]),
            user_name: Some("octocat".to_string()),
        }
    }

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_updated_since_subtracts_window() {
        assert_eq!(updated_since(today(), 7).unwrap(), "2024-03-08");
    }

    #[test]
    fn test_updated_since_zero_days_is_today() {
        assert_eq!(updated_since(today(), 0).unwrap(), "2024-03-15");
    }

    #[test]
    fn test_updated_since_crosses_leap_day() {
        assert_eq!(updated_since(today(), 15).unwrap(), "2024-02-29");
    }

    #[test]
    fn test_validate_full_config() {
        let config = validate(full_raw(), today()).unwrap();
        assert_eq!(config.api_host_url, "https://api.github.com");
        assert_eq!(config.user_name, "octocat");
        assert_eq!(config.teams, vec!["acme/core", "acme/web"]);
        assert_eq!(config.search_days, 7);
        assert_eq!(config.updated_since, "2024-03-08");
    }

    #[test]
    fn test_validate_trims_trailing_slash_on_host() {
        let mut raw = full_raw();
        raw.api_host_url = Some("https://ghe.example.com/api/v3/".to_string());
        let config = validate(raw, today()).unwrap();
        assert_eq!(config.api_host_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_validate_missing_fields_are_named() {
        for field in ["api_host_url", "search_days", "api_token", "user_name"] {
            let mut raw = full_raw();
            match field {
                "api_host_url" => raw.api_host_url = None,
                "search_days" => raw.search_days = None,
                "api_token" => raw.api_token = None,
                _ => raw.user_name = None,
            }
            let err = validate(raw, today()).unwrap_err();
            assert_eq!(err, ConfigError::MissingField(field));
            assert!(err.to_string().contains(field));
        }
    }

    #[test]
    fn test_validate_empty_string_counts_as_missing() {
        let mut raw = full_raw();
        raw.api_token = Some("   ".to_string());
        assert_eq!(
            validate(raw, today()).unwrap_err(),
            ConfigError::MissingField("api_token")
        );
    }

    #[test]
    fn test_validate_requires_a_team() {
        let mut raw = full_raw();
        raw.teams = Some(vec![]);
        assert_eq!(validate(raw, today()).unwrap_err(), ConfigError::NoTeams);

        let mut raw = full_raw();
        raw.teams = None;
        let err = validate(raw, today()).unwrap_err();
        assert!(err.to_string().contains("teams"));
    }

    #[test]
    fn test_load_missing_file() {
        let path = env::temp_dir().join("github_open_prs_test_missing.yaml");
        let _ = fs::remove_file(&path);

        let err = load_config_at(&path, today()).unwrap_err();
        assert!(err.to_string().starts_with("Missing config file:"));
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingFile(_))
        ));
    }

    #[test]
    fn test_load_yaml_file() {
        let path = write_temp(
            "github_open_prs_test_valid.yaml",
            "---\napi_host_url: \"https://api.github.com\"\napi_token: abc123\nsearch_days: 7\nteams:\n  - OWNER/TEAM_A\n  - OWNER/TEAM_B\nuser_name: octocat\n",
        );

        let config = load_config_at(&path, today()).unwrap();
        assert_eq!(config.api_token, "abc123");
        assert_eq!(config.teams, vec!["OWNER/TEAM_A", "OWNER/TEAM_B"]);
        assert_eq!(config.updated_since, "2024-03-08");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_yaml_missing_field_names_it() {
        let path = write_temp(
            "github_open_prs_test_no_user.yaml",
            "api_host_url: \"https://api.github.com\"\napi_token: abc123\nsearch_days: 7\nteams:\n  - OWNER/TEAM_A\n",
        );

        let err = load_config_at(&path, today()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::MissingField("user_name"))
        );

        let _ = fs::remove_file(&path);
    }
}
