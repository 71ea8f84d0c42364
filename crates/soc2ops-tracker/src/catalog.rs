//! Issue catalog
//!
//! A catalog is an ordered, immutable list of issue definitions. The
//! bundled catalog covers the SOC 2 program phases (gap analysis, policies,
//! technical controls, HR, vendors, risk, business continuity).

use crate::{TrackerError, TrackerResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../catalog/soc2_issues.json");

/// One issue the tracker should contain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDefinition {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Milestone title, resolved against the tracker at seed time
    pub milestone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCatalog {
    definitions: Vec<IssueDefinition>,
}

impl IssueCatalog {
    pub fn new(definitions: Vec<IssueDefinition>) -> Self {
        Self { definitions }
    }

    /// The bundled SOC 2 program catalog
    pub fn builtin() -> TrackerResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> TrackerResult<Self> {
        let definitions: Vec<IssueDefinition> = serde_json::from_str(json)?;
        let catalog = Self::new(definitions);
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> TrackerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn validate(&self) -> TrackerResult<()> {
        if let Some(index) = self.definitions.iter().position(|d| d.title.trim().is_empty()) {
            return Err(TrackerError::CatalogError(format!(
                "definition #{} has an empty title",
                index + 1
            )));
        }
        Ok(())
    }

    pub fn definitions(&self) -> &[IssueDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Distinct milestone titles, sorted
    pub fn milestones(&self) -> BTreeSet<&str> {
        self.definitions.iter().map(|d| d.milestone.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a IssueCatalog {
    type Item = &'a IssueDefinition;
    type IntoIter = std::slice::Iter<'a, IssueDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = IssueCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 21);
        assert_eq!(
            catalog.definitions()[0].title,
            "[GAP] Conduct SOC 2 Readiness Assessment"
        );

        let milestones: Vec<&str> = catalog.milestones().into_iter().collect();
        assert_eq!(
            milestones,
            vec!["Gap Analysis Complete", "Policies Approved", "Technical Controls Implemented"]
        );
    }

    #[test]
    fn test_builtin_titles_unique() {
        let catalog = IssueCatalog::builtin().unwrap();
        let titles: BTreeSet<&str> = catalog.definitions().iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles.len(), catalog.len());
        assert!((&catalog).into_iter().all(|d| !d.labels.is_empty() && !d.body.is_empty()));
    }

    #[test]
    fn test_empty_title_rejected() {
        let json = r#"[{"title": "  ", "body": "x", "milestone": "M"}]"#;
        let err = IssueCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, TrackerError::CatalogError(_)));
    }

    #[test]
    fn test_labels_default_to_empty() {
        let json = r#"[{"title": "A", "body": "x", "milestone": "M"}]"#;
        let catalog = IssueCatalog::from_json(json).unwrap();
        assert!(catalog.definitions()[0].labels.is_empty());
    }
}
