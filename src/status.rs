//! Mapping of pull request and check suite state to the status symbols shown
//! in each report line.
//!
//! Most symbols are plain emoji. `:arrow_forward:` is left as a shortcode,
//! which the status-bar host converts on display.

use crate::github::types::{CheckSuites, PullRequest};

pub const SYMBOL_WIP: &str = "\u{1F6A7}"; // construction sign
pub const SYMBOL_MERGED: &str = "\u{262F}\u{FE0F}"; // yin yang
pub const SYMBOL_BLOCKED: &str = "\u{26D4}\u{FE0F}"; // no entry

pub const SYMBOL_INCOMPLETE: &str = "\u{23F3}"; // hourglass with flowing sand
pub const SYMBOL_ACTION_REQUIRED: &str = "\u{26A0}\u{FE0F}"; // warning
pub const SYMBOL_CANCELLED: &str = "\u{2716}\u{FE0F}"; // heavy multiplication x
pub const SYMBOL_FAILURE: &str = "\u{274C}"; // cross mark
pub const SYMBOL_NEUTRAL: &str = "\u{25FE}\u{FE0F}"; // black medium small square
pub const SYMBOL_SUCCESS: &str = "\u{2705}"; // check mark
pub const SYMBOL_TIMED_OUT: &str = "\u{231B}"; // hourglass done
pub const SYMBOL_OTHER: &str = ":arrow_forward:";

/// CI state of a commit, as derived from its check suites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Requested, queued or in progress
    Incomplete,
    ActionRequired,
    Cancelled,
    Failure,
    Neutral,
    Success,
    TimedOut,
    /// Completed with a conclusion we do not recognize (or none at all)
    Other,
}

impl CheckStatus {
    /// Map a completed suite's conclusion, case-insensitively
    pub fn from_conclusion(conclusion: Option<&str>) -> Self {
        let Some(conclusion) = conclusion else {
            return CheckStatus::Other;
        };
        match conclusion.to_ascii_lowercase().as_str() {
            "action_required" => CheckStatus::ActionRequired,
            "cancelled" => CheckStatus::Cancelled,
            "failure" => CheckStatus::Failure,
            "neutral" => CheckStatus::Neutral,
            "success" => CheckStatus::Success,
            "timed_out" => CheckStatus::TimedOut,
            _ => CheckStatus::Other,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CheckStatus::Incomplete => SYMBOL_INCOMPLETE,
            CheckStatus::ActionRequired => SYMBOL_ACTION_REQUIRED,
            CheckStatus::Cancelled => SYMBOL_CANCELLED,
            CheckStatus::Failure => SYMBOL_FAILURE,
            CheckStatus::Neutral => SYMBOL_NEUTRAL,
            CheckStatus::Success => SYMBOL_SUCCESS,
            CheckStatus::TimedOut => SYMBOL_TIMED_OUT,
            CheckStatus::Other => SYMBOL_OTHER,
        }
    }
}

/// Status of the last suite that has at least one run.
///
/// Each qualifying suite overwrites the previous result, so a failure
/// followed by a queued suite reports `Incomplete`. This is not a summary
/// across suites. Returns `None` when no suite has runs.
pub fn check_status(suites: &CheckSuites) -> Option<CheckStatus> {
    suites
        .check_suites
        .iter()
        .filter(|suite| suite.latest_check_runs_count > 0)
        .map(|suite| {
            if suite.status.eq_ignore_ascii_case("completed") {
                CheckStatus::from_conclusion(suite.conclusion.as_deref())
            } else {
                CheckStatus::Incomplete
            }
        })
        .last()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeState {
    Merged,
    Blocked,
}

impl MergeState {
    pub fn symbol(self) -> &'static str {
        match self {
            MergeState::Merged => SYMBOL_MERGED,
            MergeState::Blocked => SYMBOL_BLOCKED,
        }
    }
}

/// A PR still being computed by GitHub (`mergeable: null`) counts as blocked.
pub fn merge_state(pr: &PullRequest) -> Option<MergeState> {
    if pr.merged {
        Some(MergeState::Merged)
    } else if pr.mergeable != Some(true) {
        Some(MergeState::Blocked)
    } else {
        None
    }
}

/// WIP label (exact name) or a title starting with "WIP"
pub fn is_wip(pr: &PullRequest) -> bool {
    pr.labels.iter().any(|name| name == "WIP") || pr.title.starts_with("WIP")
}

/// WIP, merge state and check status symbols, in that order
pub fn status_symbols(pr: &PullRequest, checks: Option<CheckStatus>) -> String {
    let mut symbols = String::new();
    if is_wip(pr) {
        symbols.push_str(SYMBOL_WIP);
    }
    if let Some(state) = merge_state(pr) {
        symbols.push_str(state.symbol());
    }
    if let Some(status) = checks {
        symbols.push_str(status.symbol());
    }
    symbols
}
