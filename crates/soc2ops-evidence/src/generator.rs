//! Synthetic evidence generator
//!
//! The employee directory is generated once when the generator is built;
//! every dependent record set draws its employee references from it.

use crate::fake;
use crate::model::*;
use crate::{EvidenceError, EvidenceResult};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use uuid::Uuid;

const ACCESS_LOGS_PER_EMPLOYEE: (usize, usize) = (50, 200);
const AUDIT_ENTRIES_PER_EMPLOYEE: (usize, usize) = (20, 100);
const RESOLUTION_STEPS: (usize, usize) = (2, 4);
const MITIGATION_PLANS: (usize, usize) = (2, 4);
const HIRE_WINDOW_DAYS: i64 = 5 * 365;
const YEAR_DAYS: i64 = 365;

/// Generates internally consistent synthetic evidence
pub struct EvidenceGenerator {
    rng: StdRng,
    reference_time: DateTime<Utc>,
    employees: Vec<Employee>,
}

impl EvidenceGenerator {
    /// Build a generator with a fresh directory of `employee_count` employees.
    ///
    /// With `seed` set, every record produced afterwards is reproducible
    /// (pin the clock with [`EvidenceGenerator::with_reference_time`] too).
    pub fn new(employee_count: usize, seed: Option<u64>) -> EvidenceResult<Self> {
        Self::with_reference_time(employee_count, seed, Utc::now())
    }

    /// Same as [`EvidenceGenerator::new`] with an explicit "now"
    pub fn with_reference_time(
        employee_count: usize,
        seed: Option<u64>,
        reference_time: DateTime<Utc>,
    ) -> EvidenceResult<Self> {
        if employee_count == 0 {
            return Err(EvidenceError::ConfigError(
                "employee count must be at least 1".to_string(),
            ));
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut generator = Self {
            rng,
            reference_time,
            employees: Vec::new(),
        };
        generator.employees = generator.generate_employees(employee_count);
        debug!(count = employee_count, seeded = seed.is_some(), "employee directory generated");
        Ok(generator)
    }

    /// The employee directory every record set references
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    fn today(&self) -> NaiveDate {
        self.reference_time.date_naive()
    }

    /// Produce exactly `count` employees.
    ///
    /// This does not replace the generator's own directory.
    pub fn generate_employees(&mut self, count: usize) -> Vec<Employee> {
        let today = self.today();
        let hire_start = today - Duration::days(HIRE_WINDOW_DAYS);
        let rng = &mut self.rng;

        (0..count)
            .map(|_| {
                let department = fake::pick(rng, &Department::ALL);
                Employee {
                    employee_id: fake::uuid(rng),
                    name: fake::person_name(rng),
                    email: format!("{}@example.com", fake::user_name(rng)),
                    department,
                    job_title: fake::pick(rng, department.job_titles()).to_string(),
                    hire_date: fake::date_between(rng, hire_start, today),
                    manager_id: fake::uuid(rng),
                    access_level: fake::pick(rng, &AccessLevel::ALL),
                }
            })
            .collect()
    }

    /// Access logs for the trailing `days` window, sorted by timestamp
    pub fn generate_access_logs(&mut self, days: u32) -> Vec<AccessLogEntry> {
        let end = self.reference_time;
        let start = window_start(end, days).unwrap_or(DateTime::<Utc>::MIN_UTC);
        let rng = &mut self.rng;

        let mut logs = Vec::new();
        for employee in &self.employees {
            let count = rng.gen_range(ACCESS_LOGS_PER_EMPLOYEE.0..=ACCESS_LOGS_PER_EMPLOYEE.1);
            for _ in 0..count {
                logs.push(AccessLogEntry {
                    timestamp: fake::datetime_between(rng, start, end),
                    employee_id: employee.employee_id,
                    action: fake::pick(rng, &AccessAction::ALL),
                    resource: fake::pick(rng, &AccessResource::ALL),
                    ip_address: fake::ipv4(rng),
                    status: fake::pick(rng, &AccessStatus::ALL),
                    details: fake::text(rng, 100),
                });
            }
        }

        logs.sort_by_key(|entry| entry.timestamp);
        debug!(entries = logs.len(), days, "access logs generated");
        logs
    }

    /// Audit trail entries for the trailing `days` window, sorted by timestamp
    pub fn generate_audit_trails(&mut self, days: u32) -> Vec<AuditTrailEntry> {
        let end = self.reference_time;
        let start = window_start(end, days).unwrap_or(DateTime::<Utc>::MIN_UTC);
        let rng = &mut self.rng;

        let mut trails = Vec::new();
        for employee in &self.employees {
            let count = rng.gen_range(AUDIT_ENTRIES_PER_EMPLOYEE.0..=AUDIT_ENTRIES_PER_EMPLOYEE.1);
            for _ in 0..count {
                trails.push(AuditTrailEntry {
                    timestamp: fake::datetime_between(rng, start, end),
                    employee_id: employee.employee_id,
                    action: fake::pick(rng, &AuditAction::ALL),
                    object_type: fake::pick(rng, &AuditObjectType::ALL),
                    object_id: fake::uuid(rng),
                    changes: ChangeSet {
                        old_value: fake::text(rng, 50),
                        new_value: fake::text(rng, 50),
                    },
                    ip_address: fake::ipv4(rng),
                    session_id: fake::uuid(rng),
                });
            }
        }

        trails.sort_by_key(|entry| entry.timestamp);
        debug!(entries = trails.len(), days, "audit trails generated");
        trails
    }

    /// `count` incidents from the past year, sorted by reported date
    pub fn generate_incident_reports(&mut self, count: usize) -> Vec<IncidentReport> {
        let today = self.today();
        let year_ago = today - Duration::days(YEAR_DAYS);

        let mut incidents: Vec<IncidentReport> = (0..count)
            .map(|_| {
                let reported_date = fake::date_between(&mut self.rng, year_ago, today);
                let resolved_date = fake::date_between(&mut self.rng, reported_date, today);

                let steps = self.rng.gen_range(RESOLUTION_STEPS.0..=RESOLUTION_STEPS.1);
                let mut completion_dates: Vec<NaiveDate> = (0..steps)
                    .map(|_| fake::date_between(&mut self.rng, reported_date, resolved_date))
                    .collect();
                completion_dates.sort();

                let resolution_steps = completion_dates
                    .into_iter()
                    .enumerate()
                    .map(|(i, completed_at)| ResolutionStep {
                        step: format!("Step {}", i),
                        action: fake::text(&mut self.rng, 100),
                        completed_by: self.random_employee_id(),
                        completed_at,
                    })
                    .collect();

                IncidentReport {
                    incident_id: fake::uuid(&mut self.rng),
                    reported_by: self.random_employee_id(),
                    incident_type: fake::pick(&mut self.rng, &IncidentType::ALL),
                    severity: fake::pick(&mut self.rng, &Severity::ALL),
                    description: fake::text(&mut self.rng, 200),
                    reported_date,
                    resolved_date,
                    resolution_steps,
                }
            })
            .collect();

        incidents.sort_by_key(|incident| incident.reported_date);
        debug!(incidents = incidents.len(), "incident reports generated");
        incidents
    }

    /// `count` risk entries, sorted by score, highest first
    pub fn generate_risk_assessment_reports(&mut self, count: usize) -> Vec<RiskAssessmentReport> {
        let today = self.today();
        let year_ago = today - Duration::days(YEAR_DAYS);
        let year_ahead = today + Duration::days(YEAR_DAYS);

        let mut risks: Vec<RiskAssessmentReport> = (0..count)
            .map(|_| {
                let risk_score = (self.rng.gen_range(1.0..=10.0_f64) * 10.0).round() / 10.0;
                let plans = self.rng.gen_range(MITIGATION_PLANS.0..=MITIGATION_PLANS.1);
                let mitigation_plans = (0..plans)
                    .map(|i| MitigationPlan {
                        plan: format!("Plan {}", i),
                        description: fake::text(&mut self.rng, 100),
                        owner: self.random_employee_id(),
                        target_date: fake::date_between(&mut self.rng, today, year_ahead),
                    })
                    .collect();

                RiskAssessmentReport {
                    risk_id: fake::uuid(&mut self.rng),
                    category: fake::pick(&mut self.rng, &RiskCategory::ALL),
                    description: fake::text(&mut self.rng, 150),
                    likelihood: fake::pick(&mut self.rng, &Likelihood::ALL),
                    impact: fake::pick(&mut self.rng, &Impact::ALL),
                    risk_score,
                    mitigation_plans,
                    review_date: fake::date_between(&mut self.rng, year_ago, today),
                    next_review_date: fake::date_between(&mut self.rng, today, year_ahead),
                }
            })
            .collect();

        // sort_by is stable, so equal scores keep generation order
        risks.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
        debug!(risks = risks.len(), "risk assessment reports generated");
        risks
    }

    fn random_employee_id(&mut self) -> Uuid {
        let index = self.rng.gen_range(0..self.employees.len());
        self.employees[index].employee_id
    }
}

/// Start of the trailing `days` window ending at `end`; `None` when it
/// falls before the earliest representable instant
pub fn window_start(end: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    end.checked_sub_signed(Duration::days(i64::from(days)))
}
