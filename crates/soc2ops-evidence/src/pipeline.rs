//! End-to-end generation run
//!
//! Stages run strictly in order and the first error ends the run; files
//! already written by earlier stages stay on disk.

use crate::config::GeneratorConfig;
use crate::generator::EvidenceGenerator;
use crate::model::EvidenceKind;
use crate::store::EvidenceStore;
use crate::EvidenceResult;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Stage of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    GenerateEmployees,
    GenerateAccessLogs,
    GenerateAuditTrails,
    GenerateIncidents,
    GenerateRiskAssessments,
    Persist,
    Terminal,
}

impl PipelineStage {
    pub fn next(self) -> Self {
        match self {
            PipelineStage::Init => PipelineStage::GenerateEmployees,
            PipelineStage::GenerateEmployees => PipelineStage::GenerateAccessLogs,
            PipelineStage::GenerateAccessLogs => PipelineStage::GenerateAuditTrails,
            PipelineStage::GenerateAuditTrails => PipelineStage::GenerateIncidents,
            PipelineStage::GenerateIncidents => PipelineStage::GenerateRiskAssessments,
            PipelineStage::GenerateRiskAssessments => PipelineStage::Persist,
            PipelineStage::Persist | PipelineStage::Terminal => PipelineStage::Terminal,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One written snapshot
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceFile {
    pub kind: EvidenceKind,
    pub path: PathBuf,
    pub records: usize,
}

/// Outcome of a full run
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceRun {
    pub employees: usize,
    pub seed: Option<u64>,
    pub files: Vec<EvidenceFile>,
}

impl EvidenceRun {
    pub fn file(&self, kind: EvidenceKind) -> Option<&EvidenceFile> {
        self.files.iter().find(|f| f.kind == kind)
    }
}

/// Runs generation and persistence for a [`GeneratorConfig`]
pub struct EvidencePipeline {
    config: GeneratorConfig,
    store: EvidenceStore,
    stage: PipelineStage,
}

impl EvidencePipeline {
    pub fn new(config: GeneratorConfig) -> Self {
        let store = EvidenceStore::new(config.output_dir.clone());
        Self {
            config,
            store,
            stage: PipelineStage::Init,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    fn advance(&mut self) {
        self.stage = self.stage.next();
        info!(stage = %self.stage, "evidence pipeline");
    }

    pub fn run(&mut self) -> EvidenceResult<EvidenceRun> {
        self.config.validate()?;
        self.stage = PipelineStage::Init;

        self.advance();
        let mut generator = EvidenceGenerator::new(self.config.employee_count, self.config.seed)?;

        self.advance();
        let access_logs = generator.generate_access_logs(self.config.access_log_days);

        self.advance();
        let audit_trails = generator.generate_audit_trails(self.config.audit_trail_days);

        self.advance();
        let incidents = generator.generate_incident_reports(self.config.incident_count);

        self.advance();
        let risks = generator.generate_risk_assessment_reports(self.config.risk_count);

        self.advance();
        let files = vec![
            self.persist(EvidenceKind::AccessLogs, &access_logs)?,
            self.persist(EvidenceKind::AuditTrails, &audit_trails)?,
            self.persist(EvidenceKind::IncidentReports, &incidents)?,
            self.persist(EvidenceKind::RiskAssessmentReports, &risks)?,
        ];

        self.advance();
        Ok(EvidenceRun {
            employees: generator.employees().len(),
            seed: self.config.seed,
            files,
        })
    }

    fn persist<T: Serialize>(&self, kind: EvidenceKind, records: &[T]) -> EvidenceResult<EvidenceFile> {
        let path = self.store.save_evidence(kind, records)?;
        Ok(EvidenceFile {
            kind,
            path,
            records: records.len(),
        })
    }
}
