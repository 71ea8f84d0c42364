//! Generator configuration

use crate::generator::window_start;
use crate::{EvidenceError, EvidenceResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters for one evidence generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Size of the synthetic employee directory
    pub employee_count: usize,

    /// Trailing window (days) for access logs
    pub access_log_days: u32,

    /// Trailing window (days) for audit trails
    pub audit_trail_days: u32,

    /// Number of incident reports
    pub incident_count: usize,

    /// Number of risk assessment entries
    pub risk_count: usize,

    /// Fixed RNG seed; unseeded when absent
    pub seed: Option<u64>,

    /// Directory snapshots are written to
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            employee_count: 87,
            access_log_days: 90,
            audit_trail_days: 90,
            incident_count: 15,
            risk_count: 8,
            seed: None,
            output_dir: PathBuf::from("./audit_evidence"),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn from_file(path: &Path) -> EvidenceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EvidenceResult<()> {
        if self.employee_count == 0 {
            return Err(EvidenceError::ConfigError(
                "employee_count must be at least 1".to_string(),
            ));
        }

        let now = Utc::now();
        for (field, days) in [
            ("access_log_days", self.access_log_days),
            ("audit_trail_days", self.audit_trail_days),
        ] {
            if window_start(now, days).is_none() {
                return Err(EvidenceError::ConfigError(format!(
                    "{} window of {} days reaches past the earliest representable date",
                    field, days
                )));
            }
        }
        Ok(())
    }

    pub fn with_employee_count(mut self, count: usize) -> Self {
        self.employee_count = count;
        self
    }

    pub fn with_access_log_days(mut self, days: u32) -> Self {
        self.access_log_days = days;
        self
    }

    pub fn with_audit_trail_days(mut self, days: u32) -> Self {
        self.audit_trail_days = days;
        self
    }

    pub fn with_incident_count(mut self, count: usize) -> Self {
        self.incident_count = count;
        self
    }

    pub fn with_risk_count(mut self, count: usize) -> Self {
        self.risk_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }
}
