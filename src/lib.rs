pub mod config;
pub mod fetch;
pub mod github;
pub mod output;
pub mod status;
