//! Descriptive statistics for a GitHub repository.
//!
//! The crate fetches a repository's metadata, file tree, social activity,
//! and issue/pull-request turnaround times from the GitHub REST API and
//! reduces them to flat metric records. Rendering and the interactive menu
//! live at the edges; the aggregators only emit structured data.

pub mod config;
pub mod github;
pub mod metrics;
pub mod render;
pub mod report;
pub mod tree;
pub mod types;

pub use config::AppConfig;
pub use github::{FetchError, GitHubClient};
pub use types::{MetricRecord, MetricValue, RepoId};
