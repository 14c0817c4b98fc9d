use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;

use crate::github::types::PullRequest;

pub const SEPARATOR: &str = "---";
pub const NO_RESULTS: &str = "No PRs :smile:";

const ICON: &str = ":octopus:";

/// Report lines, deduplicated and sorted by their own text.
///
/// Two PRs that format to the same line collapse into one entry.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    lines: BTreeSet<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if an identical line was already present
    pub fn insert(&mut self, line: String) -> bool {
        self.lines.insert(line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Format a single PR as one line
/// Format: "{repo} {symbols} #{number} {title} ({author}) | href={url}"
///
/// The layout is kept even when `symbols` is empty.
pub fn format_report_line(pr: &PullRequest, symbols: &str) -> String {
    format!(
        "{} {} #{} {} ({}) | href={}",
        pr.repo, symbols, pr.number, pr.title, pr.author, pr.url
    )
}

/// Name the status-bar host knows this plugin by: the file name it was invoked as
pub fn plugin_name(arg0: Option<&OsStr>) -> String {
    arg0.and_then(|a| Path::new(a).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

fn refresh_line(plugin_name: &str) -> String {
    format!("Refresh | href=bitbar://refreshPlugin?name={}", plugin_name)
}

/// Render the full plugin output.
///
/// On error nothing from the report survives; the error line replaces it.
/// The refresh action is always the last line.
pub fn render(outcome: &Result<Report>, plugin_name: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    match outcome {
        Ok(report) if report.is_empty() => {
            out.push(format!("{} :white_check_mark:", ICON));
            out.push(SEPARATOR.to_string());
            out.push(NO_RESULTS.to_string());
        }
        Ok(report) => {
            out.push(format!("{} {} PRs!", ICON, report.len()));
            out.push(SEPARATOR.to_string());
            out.extend(report.lines().map(String::from));
        }
        Err(e) => {
            out.push(format!("{} ", ICON));
            out.push(SEPARATOR.to_string());
            out.push(format!(">> Error: {:#} | color=red font=Arial-Bold", e));
        }
    }

    out.push(SEPARATOR.to_string());
    out.push(refresh_line(plugin_name));

    let mut text = out.join("\n");
    text.push('\n');
    text
}
