//! In-process issue tracker
//!
//! Holds milestones and issues in memory. Creation failures can be
//! injected per title.

use crate::{Issue, IssueTracker, Milestone, NewIssue, TrackerError, TrackerResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct TrackerState {
    milestones: Vec<Milestone>,
    issues: Vec<(Issue, NewIssue)>,
    rejected_titles: HashSet<String>,
    list_calls: usize,
}

/// Issue tracker kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryTracker {
    state: Mutex<TrackerState>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        // A poisoned lock only means a test panicked mid-update.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with_milestone(self, title: &str) -> Self {
        {
            let mut state = self.state();
            let number = state.milestones.len() as u64 + 1;
            state.milestones.push(Milestone {
                number,
                title: title.to_string(),
            });
        }
        self
    }

    /// Pre-existing issue with only a title
    pub fn with_issue(self, title: &str) -> Self {
        self.insert(NewIssue {
            title: title.to_string(),
            body: String::new(),
            labels: Vec::new(),
            milestone: None,
        });
        self
    }

    /// Make `create_issue` fail for this title
    pub fn reject_title(self, title: &str) -> Self {
        self.state().rejected_titles.insert(title.to_string());
        self
    }

    /// Creation requests recorded so far, including pre-existing issues
    pub fn created(&self) -> Vec<NewIssue> {
        self.state().issues.iter().map(|(_, request)| request.clone()).collect()
    }

    pub fn issue_count(&self) -> usize {
        self.state().issues.len()
    }

    /// Number of `list_issues` calls served
    pub fn list_calls(&self) -> usize {
        self.state().list_calls
    }

    fn insert(&self, request: NewIssue) -> Issue {
        let mut state = self.state();
        let issue = Issue {
            number: state.issues.len() as u64 + 1,
            title: request.title.clone(),
        };
        state.issues.push((issue.clone(), request));
        issue
    }
}

#[async_trait]
impl IssueTracker for InMemoryTracker {
    async fn list_milestones(&self) -> TrackerResult<Vec<Milestone>> {
        Ok(self.state().milestones.clone())
    }

    async fn list_issues(&self) -> TrackerResult<Vec<Issue>> {
        let mut state = self.state();
        state.list_calls += 1;
        Ok(state.issues.iter().map(|(issue, _)| issue.clone()).collect())
    }

    async fn create_issue(&self, issue: NewIssue) -> TrackerResult<Issue> {
        if self.state().rejected_titles.contains(&issue.title) {
            return Err(TrackerError::ApiError {
                status: 422,
                message: "Validation Failed".to_string(),
            });
        }
        Ok(self.insert(issue))
    }
}
