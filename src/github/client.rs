use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use tracing::debug;

use crate::config::Config;

pub const USER_AGENT: &str = "github-open-prs/v2";

/// Content type for search and pull request documents
pub const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// Content type for the check suites preview API
pub const ACCEPT_CHECKS_PREVIEW: &str = "application/vnd.github.antiope-preview+json";

/// A source of raw API response bodies.
///
/// The pipeline only ever issues GETs against absolute URLs, so this is the
/// whole surface it needs from the network.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn get(&self, url: &str, accept: &str) -> Result<String>;
}

/// GitHub REST client using HTTP Basic auth (user name + personal access token)
pub struct ApiClient {
    client: reqwest::Client,
    user_name: String,
    api_token: String,
}

/// Create an authenticated GitHub client from the loaded configuration
pub fn create_client(config: &Config) -> Result<ApiClient> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .redirect(Policy::limited(10))
        .build()
        .context("Failed to create GitHub client")?;

    Ok(ApiClient {
        client,
        user_name: config.user_name.clone(),
        api_token: config.api_token.clone(),
    })
}

impl Fetch for ApiClient {
    async fn get(&self, url: &str, accept: &str) -> Result<String> {
        debug!("GET {} ({})", url, accept);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.user_name, Some(&self.api_token))
            .header(ACCEPT, accept)
            .send()
            .await
            .context("GitHub request failed")?
            .error_for_status()
            .context("GitHub API error")?;

        response
            .text()
            .await
            .context("Failed to read GitHub response body")
    }
}

impl<T: Fetch + ?Sized> Fetch for &T {
    async fn get(&self, url: &str, accept: &str) -> Result<String> {
        (**self).get(url, accept).await
    }
}
