use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::placement::domain::{
    Drive, DriveId, EligibilityField, EligibilityRule, Internship, RuleOperator, RuleValue,
    StudentId, StudentProfile,
};
use crate::workflows::placement::repository::{PlacementRepository, RepositoryError};
use crate::workflows::placement::{eligibility_router, EligibilityService};

pub(super) fn student() -> StudentProfile {
    StudentProfile {
        id: StudentId("stu-001".to_string()),
        name: "Asha Rao".to_string(),
        branch: "CSE".to_string(),
        batch: "2025".to_string(),
        gender: None,
        current_cgpa: 7.5,
        active_backlogs: 0,
        tenth_percentage: 88.4,
        twelfth_percentage: 79.0,
        programming_languages: vec!["Rust".to_string(), "Python".to_string()],
        frameworks: vec!["React".to_string()],
        tools: vec!["Docker".to_string(), "Git".to_string()],
        internships: Vec::new(),
    }
}

pub(super) fn student_with(id: &str, cgpa: f64, branch: &str, backlogs: u32) -> StudentProfile {
    StudentProfile {
        id: StudentId(id.to_string()),
        current_cgpa: cgpa,
        branch: branch.to_string(),
        active_backlogs: backlogs,
        ..student()
    }
}

pub(super) fn rule(
    field: EligibilityField,
    operator: RuleOperator,
    value: impl Into<RuleValue>,
) -> EligibilityRule {
    EligibilityRule::new(field, operator, value)
}

/// cgpa >= 7.5, branch IN [CSE, IT], activeBacklogs <= 0.
pub(super) fn baseline_rules() -> Vec<EligibilityRule> {
    vec![
        rule(EligibilityField::Cgpa, RuleOperator::GreaterOrEqual, 7.5),
        rule(EligibilityField::Branch, RuleOperator::In, vec!["CSE", "IT"]),
        rule(
            EligibilityField::ActiveBacklogs,
            RuleOperator::LessOrEqual,
            0.0,
        ),
    ]
}

pub(super) fn drive(id: &str, rules: Vec<EligibilityRule>, allow_partial: bool) -> Drive {
    Drive {
        id: DriveId(id.to_string()),
        company: "Acme Systems".to_string(),
        role: "Graduate Engineer".to_string(),
        rules,
        allow_partially_eligible: allow_partial,
        deadline: None,
    }
}

pub(super) fn internship() -> Internship {
    Internship {
        company: "Globex".to_string(),
        role: "Platform Intern".to_string(),
    }
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    students: Arc<Mutex<Vec<StudentProfile>>>,
    drives: Arc<Mutex<Vec<Drive>>>,
}

impl MemoryRepository {
    pub(super) fn seeded(students: Vec<StudentProfile>, drives: Vec<Drive>) -> Self {
        Self {
            students: Arc::new(Mutex::new(students)),
            drives: Arc::new(Mutex::new(drives)),
        }
    }
}

impl PlacementRepository for MemoryRepository {
    fn fetch_student(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        let guard = self.students.lock().expect("student mutex poisoned");
        Ok(guard.iter().find(|student| &student.id == id).cloned())
    }

    fn fetch_drive(&self, id: &DriveId) -> Result<Option<Drive>, RepositoryError> {
        let guard = self.drives.lock().expect("drive mutex poisoned");
        Ok(guard.iter().find(|drive| &drive.id == id).cloned())
    }

    fn list_students(&self) -> Result<Vec<StudentProfile>, RepositoryError> {
        Ok(self.students.lock().expect("student mutex poisoned").clone())
    }

    fn list_drives(&self) -> Result<Vec<Drive>, RepositoryError> {
        Ok(self.drives.lock().expect("drive mutex poisoned").clone())
    }

    fn upsert_student(&self, student: StudentProfile) -> Result<(), RepositoryError> {
        let mut guard = self.students.lock().expect("student mutex poisoned");
        guard.retain(|existing| existing.id != student.id);
        guard.push(student);
        Ok(())
    }

    fn upsert_drive(&self, drive: Drive) -> Result<(), RepositoryError> {
        let mut guard = self.drives.lock().expect("drive mutex poisoned");
        guard.retain(|existing| existing.id != drive.id);
        guard.push(drive);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl PlacementRepository for UnavailableRepository {
    fn fetch_student(&self, _id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_drive(&self, _id: &DriveId) -> Result<Option<Drive>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_students(&self) -> Result<Vec<StudentProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_drives(&self) -> Result<Vec<Drive>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert_student(&self, _student: StudentProfile) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert_drive(&self, _drive: Drive) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (EligibilityService<MemoryRepository>, Arc<MemoryRepository>) {
    let mut strict = drive("drv-strict", baseline_rules(), false);
    strict.rules.push(rule(
        EligibilityField::Cgpa,
        RuleOperator::GreaterOrEqual,
        8.0,
    ));
    let mut closed = drive("drv-closed", baseline_rules(), true);
    closed.deadline = Some(date(2025, 1, 31));

    let repository = Arc::new(MemoryRepository::seeded(
        vec![
            student(),
            student_with("stu-002", 8.6, "IT", 0),
            student_with("stu-003", 6.1, "ME", 2),
        ],
        vec![drive("drv-open", baseline_rules(), true), strict, closed],
    ));
    let service = EligibilityService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: EligibilityService<MemoryRepository>) -> axum::Router {
    eligibility_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

