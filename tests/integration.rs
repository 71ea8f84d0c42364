// Integration tests for soc2ops components
// End-to-end runs of the evidence pipeline and the issue seeder

use chrono::{Duration, Utc};
use soc2ops_evidence::{
    AccessLogEntry, AuditTrailEntry, EvidenceKind, EvidencePipeline, EvidenceStore, GeneratorConfig,
    IncidentReport, RiskAssessmentReport,
};
use soc2ops_tracker::{InMemoryTracker, IssueCatalog, IssueSeeder};
use std::collections::HashSet;
use uuid::Uuid;

#[test]
fn test_evidence_run_is_referentially_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new()
        .with_employee_count(9)
        .with_access_log_days(30)
        .with_audit_trail_days(30)
        .with_incident_count(15)
        .with_risk_count(8)
        .with_seed(20240101)
        .with_output_dir(dir.path().join("audit_evidence"));

    let started = Utc::now();
    let run = EvidencePipeline::new(config).run().unwrap();
    assert_eq!(run.files.len(), 4);

    let path = |kind| run.file(kind).unwrap().path.clone();
    let access_logs: Vec<AccessLogEntry> = EvidenceStore::load_evidence(&path(EvidenceKind::AccessLogs)).unwrap();
    let audit_trails: Vec<AuditTrailEntry> = EvidenceStore::load_evidence(&path(EvidenceKind::AuditTrails)).unwrap();
    let incidents: Vec<IncidentReport> = EvidenceStore::load_evidence(&path(EvidenceKind::IncidentReports)).unwrap();
    let risks: Vec<RiskAssessmentReport> =
        EvidenceStore::load_evidence(&path(EvidenceKind::RiskAssessmentReports)).unwrap();

    // Every employee emits access logs and audit entries, so together they
    // recover the whole directory.
    let employees: HashSet<Uuid> = access_logs.iter().map(|e| e.employee_id).collect();
    assert_eq!(employees.len(), 9);
    assert!(audit_trails.iter().all(|e| employees.contains(&e.employee_id)));

    assert!(access_logs.len() >= 50 * 9 && access_logs.len() <= 200 * 9);
    assert!(access_logs.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    let window_start = started - Duration::days(30);
    assert!(access_logs.iter().all(|e| e.timestamp >= window_start && e.timestamp <= Utc::now()));

    assert_eq!(incidents.len(), 15);
    for incident in &incidents {
        assert!(employees.contains(&incident.reported_by));
        assert!(incident.resolution_steps.iter().all(|s| employees.contains(&s.completed_by)));
        assert!(incident.resolved_date >= incident.reported_date);
    }

    assert_eq!(risks.len(), 8);
    assert!(risks.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
    for risk in &risks {
        assert!(risk.mitigation_plans.iter().all(|p| employees.contains(&p.owner)));
    }
}

#[tokio::test]
async fn test_builtin_catalog_seeding_is_idempotent() {
    let catalog = IssueCatalog::builtin().unwrap();
    let mut tracker = InMemoryTracker::new();
    for milestone in catalog.milestones() {
        tracker = tracker.with_milestone(milestone);
    }
    let seeder = IssueSeeder::new(tracker);

    let first = seeder.seed(&catalog).await.unwrap();
    assert_eq!(first.created(), catalog.len());
    assert!(seeder.tracker().created().iter().all(|issue| issue.milestone.is_some()));

    let second = seeder.seed(&catalog).await.unwrap();
    assert_eq!(second.created(), 0);
    assert_eq!(second.skipped(), catalog.len());
}
