//! Issue seeding
//!
//! Milestones and existing issue titles are fetched once per run. A
//! definition whose title already exists is skipped; a failed creation is
//! logged and recorded, and the batch carries on.

use crate::catalog::{IssueCatalog, IssueDefinition};
use crate::{IssueTracker, NewIssue, TrackerResult};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{error, info, warn};

/// What happened to one catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SeedOutcome {
    Created {
        title: String,
        number: u64,
        milestone: Option<u64>,
    },
    Skipped {
        title: String,
    },
    Failed {
        title: String,
        error: String,
    },
}

impl SeedOutcome {
    pub fn title(&self) -> &str {
        match self {
            SeedOutcome::Created { title, .. } | SeedOutcome::Skipped { title } | SeedOutcome::Failed { title, .. } => {
                title
            }
        }
    }
}

/// Per-run summary
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub outcomes: Vec<SeedOutcome>,
    /// Milestone names with no matching tracker milestone
    pub unresolved_milestones: Vec<String>,
}

impl SeedReport {
    pub fn created(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, SeedOutcome::Created { .. })).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, SeedOutcome::Skipped { .. })).count()
    }

    pub fn failures(&self) -> Vec<&SeedOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SeedOutcome::Failed { .. }))
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.failures().is_empty()
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Created {} issues", self.created())];
        if self.skipped() > 0 {
            lines.push(format!("Skipped {} existing issues", self.skipped()));
        }
        let failed = self.failures().len();
        if failed > 0 {
            lines.push(format!("Failed to create {} issues", failed));
        }
        lines.join("\n")
    }
}

/// Ensures every catalog definition has a tracker issue
pub struct IssueSeeder<T: IssueTracker> {
    tracker: T,
}

impl<T: IssueTracker> IssueSeeder<T> {
    pub fn new(tracker: T) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn into_inner(self) -> T {
        self.tracker
    }

    /// Create the catalog's missing issues.
    ///
    /// Errors only when the tracker cannot be read; that happens before any
    /// issue is created.
    pub async fn seed(&self, catalog: &IssueCatalog) -> TrackerResult<SeedReport> {
        let milestones: HashMap<String, u64> = self
            .tracker
            .list_milestones()
            .await?
            .into_iter()
            .map(|m| (m.title, m.number))
            .collect();

        let mut known_titles: HashSet<String> = self
            .tracker
            .list_issues()
            .await?
            .into_iter()
            .map(|issue| issue.title)
            .collect();

        info!("Creating {} issues...", catalog.len());

        let mut report = SeedReport::default();
        for definition in catalog {
            if known_titles.contains(&definition.title) {
                report.outcomes.push(SeedOutcome::Skipped {
                    title: definition.title.clone(),
                });
                continue;
            }

            let milestone = milestones.get(&definition.milestone).copied();
            if milestone.is_none() && !report.unresolved_milestones.contains(&definition.milestone) {
                warn!(milestone = %definition.milestone, "milestone not found; creating issues without it");
                report.unresolved_milestones.push(definition.milestone.clone());
            }

            match self.tracker.create_issue(new_issue(definition, milestone)).await {
                Ok(issue) => {
                    info!(number = issue.number, title = %issue.title, "issue created");
                    known_titles.insert(definition.title.clone());
                    report.outcomes.push(SeedOutcome::Created {
                        title: definition.title.clone(),
                        number: issue.number,
                        milestone,
                    });
                }
                Err(e) => {
                    error!("Error creating {}: {}", definition.title, e);
                    report.outcomes.push(SeedOutcome::Failed {
                        title: definition.title.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}

fn new_issue(definition: &IssueDefinition, milestone: Option<u64>) -> NewIssue {
    NewIssue {
        title: definition.title.clone(),
        body: definition.body.clone(),
        labels: definition.labels.clone(),
        milestone,
    }
}
