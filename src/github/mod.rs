pub mod client;
pub mod search;
pub mod types;

pub use client::{create_client, ApiClient, Fetch};
pub use search::{fetch_check_suites, fetch_pr_detail, search_prs, subject_expressions};
pub use types::{CheckSuite, CheckSuites, PullRequest};
