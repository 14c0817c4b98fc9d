use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{load_config, Config};
use crate::github::{fetch_check_suites, fetch_pr_detail, search_prs, subject_expressions, Fetch};
use crate::output::{format_report_line, Report};
use crate::status::{check_status, status_symbols};

/// Run every subject search, look up each result's detail and check suites,
/// and collect the formatted lines.
///
/// Requests are issued one at a time. The first failure aborts the whole
/// run; lines collected so far are dropped with the partial report.
pub async fn build_report<F: Fetch>(client: &F, config: &Config) -> Result<Report> {
    let mut report = Report::new();

    for subject in subject_expressions(config) {
        let items = search_prs(client, config, &subject).await?;
        debug!("{} => {} results", subject, items.len());

        for item in items {
            let pr = fetch_pr_detail(client, &item.pull_request.url).await?;
            let suites = fetch_check_suites(client, &pr).await?;
            let symbols = status_symbols(&pr, check_status(&suites));

            if !report.insert(format_report_line(&pr, &symbols)) {
                debug!("duplicate line for {}", pr.url);
            }
        }
    }

    debug!("{} unique lines", report.len());
    Ok(report)
}

/// Load the config, build a client for it and produce the report.
///
/// `connect` is only called once the config is valid, so a config error
/// never reaches the network.
pub async fn run<F, C>(config_path: Option<PathBuf>, connect: C) -> Result<Report>
where
    F: Fetch,
    C: FnOnce(&Config) -> Result<F>,
{
    let config = load_config(config_path)?;
    debug!(
        "Loaded config: host={} user={} teams={} updated_since={}",
        config.api_host_url,
        config.user_name,
        config.teams.len(),
        config.updated_since
    );

    let client = connect(&config)?;
    build_report(&client, &config).await
}
