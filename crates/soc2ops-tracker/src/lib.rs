//! SOC 2 issue tracker integration
//!
//! This crate keeps a GitHub repository in sync with a catalog of
//! compliance tracking issues:
//! - [`IssueCatalog`]: the issue definitions (bundled or loaded from JSON)
//! - [`IssueTracker`]: the tracker operations the seeder needs
//! - [`GithubClient`]: GitHub REST v3 implementation
//! - [`IssueSeeder`]: creates missing issues, idempotent by title

pub mod catalog;
pub mod github;
pub mod memory;
pub mod seeder;

pub use catalog::{IssueCatalog, IssueDefinition};
pub use github::{GithubClient, RepositoryRef};
pub use memory::InMemoryTracker;
pub use seeder::{IssueSeeder, SeedOutcome, SeedReport};

use serde::{Deserialize, Serialize};

/// Milestone known to the tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
}

/// Existing tracker issue (any state)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
}

/// Issue creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    /// Milestone number; omitted when the milestone name did not resolve
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}

/// Issue tracker operations used by the seeder
#[async_trait::async_trait]
pub trait IssueTracker: Send + Sync {
    /// Milestones of the target repository
    async fn list_milestones(&self) -> TrackerResult<Vec<Milestone>>;

    /// All issues of the target repository, open and closed
    async fn list_issues(&self) -> TrackerResult<Vec<Issue>>;

    /// Create one issue
    async fn create_issue(&self, issue: NewIssue) -> TrackerResult<Issue>;
}

/// Tracker connection configuration
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub api_url: String,
    pub token: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl TrackerConfig {
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";
    pub const DEFAULT_TOKEN_VAR: &'static str = "GITHUB_TOKEN";

    pub fn new(token: &str) -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            token: token.to_string(),
            user_agent: format!("soc2ops/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: 30,
        }
    }

    /// Read the token from environment variable `var`.
    ///
    /// Fails with [`TrackerError::MissingToken`] when it is unset or empty.
    pub fn from_env(var: &str) -> TrackerResult<Self> {
        match std::env::var(var) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(token.trim())),
            _ => Err(TrackerError::MissingToken(var.to_string())),
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
}

/// Tracker operation result type
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Tracker error types
#[derive(thiserror::Error, Debug)]
pub enum TrackerError {
    #[error("{0} not set")]
    MissingToken(String),

    #[error("Repository '{0}' not found")]
    RepositoryNotFound(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TrackerError {
    /// Errors that must stop a run before anything is mutated
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TrackerError::MissingToken(_) | TrackerError::RepositoryNotFound(_) | TrackerError::CatalogError(_)
        )
    }
}
