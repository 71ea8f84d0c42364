//! Evidence record types
//!
//! Every record set produced by the generator references employees by
//! `employee_id`. Nothing here is mutated after generation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use uuid::Uuid;

/// Department an employee belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Product,
    Sales,
    Marketing,
    Finance,
    #[serde(rename = "HR")]
    Hr,
    Operations,
    Security,
    Legal,
}

impl Department {
    pub const ALL: [Department; 9] = [
        Department::Engineering,
        Department::Product,
        Department::Sales,
        Department::Marketing,
        Department::Finance,
        Department::Hr,
        Department::Operations,
        Department::Security,
        Department::Legal,
    ];

    /// Job titles that are valid inside this department
    pub fn job_titles(&self) -> &'static [&'static str] {
        match self {
            Department::Engineering => &["Software Engineer", "DevOps Engineer", "QA Engineer"],
            Department::Product => &["Product Manager", "Product Owner", "UX Designer"],
            Department::Sales => &["Account Executive", "Business Development Rep", "Sales Engineer"],
            Department::Marketing => &["Marketing Manager", "Content Creator", "Growth Hacker"],
            Department::Finance => &["Financial Analyst", "Accountant", "Controller"],
            Department::Hr => &["HR Generalist", "Recruiter", "Benefits Administrator"],
            Department::Operations => &["Operations Manager", "Project Manager", "Business Analyst"],
            Department::Security => &["Security Engineer", "Compliance Officer", "Incident Responder"],
            Department::Legal => &["Legal Counsel", "Contract Manager", "Privacy Officer"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Product => "Product",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Finance => "Finance",
            Department::Hr => "HR",
            Department::Operations => "Operations",
            Department::Security => "Security",
            Department::Legal => "Legal",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Standard,
    Admin,
    Privileged,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 3] = [AccessLevel::Standard, AccessLevel::Admin, AccessLevel::Privileged];
}

/// Synthetic employee directory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Department,
    /// Always one of `department.job_titles()`
    pub job_title: String,
    pub hire_date: NaiveDate,
    /// Opaque token; not required to point at another generated employee
    pub manager_id: Uuid,
    pub access_level: AccessLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessAction {
    Login,
    Logout,
    FileAccess,
    SystemChange,
}

impl AccessAction {
    pub const ALL: [AccessAction; 4] = [
        AccessAction::Login,
        AccessAction::Logout,
        AccessAction::FileAccess,
        AccessAction::SystemChange,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessResource {
    Database,
    FileSystem,
    ApiGateway,
    AdminPanel,
}

impl AccessResource {
    pub const ALL: [AccessResource; 4] = [
        AccessResource::Database,
        AccessResource::FileSystem,
        AccessResource::ApiGateway,
        AccessResource::AdminPanel,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    Success,
    Failure,
}

impl AccessStatus {
    pub const ALL: [AccessStatus; 2] = [AccessStatus::Success, AccessStatus::Failure];
}

/// Access log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    pub timestamp: DateTime<Utc>,
    pub employee_id: Uuid,
    pub action: AccessAction,
    pub resource: AccessResource,
    pub ip_address: Ipv4Addr,
    pub status: AccessStatus,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    View,
}

impl AuditAction {
    pub const ALL: [AuditAction; 4] = [AuditAction::Create, AuditAction::Update, AuditAction::Delete, AuditAction::View];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditObjectType {
    CustomerRecord,
    FinancialTransaction,
    ConfigurationChange,
    AccessRequest,
}

impl AuditObjectType {
    pub const ALL: [AuditObjectType; 4] = [
        AuditObjectType::CustomerRecord,
        AuditObjectType::FinancialTransaction,
        AuditObjectType::ConfigurationChange,
        AuditObjectType::AccessRequest,
    ];
}

/// Before/after payload of an audited change, written as a nested object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub old_value: String,
    pub new_value: String,
}

/// Audit trail entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrailEntry {
    pub timestamp: DateTime<Utc>,
    pub employee_id: Uuid,
    pub action: AuditAction,
    pub object_type: AuditObjectType,
    pub object_id: Uuid,
    pub changes: ChangeSet,
    pub ip_address: Ipv4Addr,
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Security,
    Compliance,
    Operational,
}

impl IncidentType {
    pub const ALL: [IncidentType; 3] = [IncidentType::Security, IncidentType::Compliance, IncidentType::Operational];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Severity::Low, Severity::Medium, Severity::High, Severity::Critical];
}

/// One step taken to resolve an incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionStep {
    pub step: String,
    pub action: String,
    pub completed_by: Uuid,
    pub completed_at: NaiveDate,
}

/// Incident report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub incident_id: Uuid,
    pub reported_by: Uuid,
    pub incident_type: IncidentType,
    pub severity: Severity,
    pub description: String,
    pub reported_date: NaiveDate,
    /// Never earlier than `reported_date`
    pub resolved_date: NaiveDate,
    pub resolution_steps: Vec<ResolutionStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Strategic,
    Operational,
    Financial,
    Compliance,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Strategic,
        RiskCategory::Operational,
        RiskCategory::Financial,
        RiskCategory::Compliance,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Likelihood {
    Low,
    Medium,
    High,
}

impl Likelihood {
    pub const ALL: [Likelihood; 3] = [Likelihood::Low, Likelihood::Medium, Likelihood::High];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Minimal,
    Moderate,
    Significant,
    Critical,
}

impl Impact {
    pub const ALL: [Impact; 4] = [Impact::Minimal, Impact::Moderate, Impact::Significant, Impact::Critical];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationPlan {
    pub plan: String,
    pub description: String,
    pub owner: Uuid,
    pub target_date: NaiveDate,
}

/// Risk assessment entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentReport {
    pub risk_id: Uuid,
    pub category: RiskCategory,
    pub description: String,
    pub likelihood: Likelihood,
    pub impact: Impact,
    /// 1.0 to 10.0, one decimal place
    pub risk_score: f64,
    pub mitigation_plans: Vec<MitigationPlan>,
    pub review_date: NaiveDate,
    pub next_review_date: NaiveDate,
}

/// Kind of evidence snapshot, used as the file name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    AccessLogs,
    AuditTrails,
    IncidentReports,
    RiskAssessmentReports,
}

impl EvidenceKind {
    pub const ALL: [EvidenceKind; 4] = [
        EvidenceKind::AccessLogs,
        EvidenceKind::AuditTrails,
        EvidenceKind::IncidentReports,
        EvidenceKind::RiskAssessmentReports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::AccessLogs => "access_logs",
            EvidenceKind::AuditTrails => "audit_trails",
            EvidenceKind::IncidentReports => "incident_reports",
            EvidenceKind::RiskAssessmentReports => "risk_assessment_reports",
        }
    }
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
