mod batch;
mod fields;
mod policy;
mod rules;
mod suggestions;

pub use batch::{
    check_eligibility_batch, check_eligibility_batch_with, eligible_drives, eligible_drives_with,
    eligible_students_count, eligible_students_count_with, BatchOptions, CohortSummary,
    DriveBuckets, DriveMatch,
};
pub use fields::{field_label, resolve, FieldValue};
pub use policy::{EligibilityStatus, PARTIAL_ELIGIBILITY_LIMIT};
pub use rules::evaluate_rule;
pub use suggestions::generate_suggestions;

use super::domain::{Drive, DriveId, EligibilityRule, RuleValue, StudentId, StudentProfile};
use policy::classify;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How consequential a failed rule is. Derived from the operator alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Moderate,
    Minor,
}

/// Outcome of evaluating one rule, kept for audit trails and UI rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub rule: EligibilityRule,
    pub passed: bool,
    pub message: String,
    pub student_value: FieldValue,
    pub required_value: RuleValue,
    pub severity: Severity,
}

/// Verdict for a student against one drive, with the per-rule trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub student_id: StudentId,
    pub drive_id: DriveId,
    pub eligible: bool,
    pub partially_eligible: bool,
    pub results: Vec<RuleResult>,
    pub passed_count: usize,
    pub failed_count: usize,
    pub missing_criteria: Vec<String>,
    pub suggestions: Vec<String>,
}

impl EligibilityResult {
    pub fn status(&self) -> EligibilityStatus {
        if self.eligible {
            EligibilityStatus::Eligible
        } else if self.partially_eligible {
            EligibilityStatus::PartiallyEligible
        } else {
            EligibilityStatus::NotEligible
        }
    }

    pub fn summary(&self) -> String {
        match self.status() {
            EligibilityStatus::Eligible => {
                format!("eligible: all {} criteria met", self.passed_count)
            }
            EligibilityStatus::PartiallyEligible => format!(
                "partially eligible: {} of {} criteria missed",
                self.failed_count,
                self.results.len()
            ),
            EligibilityStatus::NotEligible => format!(
                "not eligible: {} of {} criteria missed",
                self.failed_count,
                self.results.len()
            ),
        }
    }

    pub fn failed_results(&self) -> impl Iterator<Item = &RuleResult> {
        self.results.iter().filter(|result| !result.passed)
    }
}

/// Evaluate every rule of `drive` against `student`, in rule order.
pub fn check_eligibility(student: &StudentProfile, drive: &Drive) -> EligibilityResult {
    let results: Vec<RuleResult> = drive
        .rules
        .iter()
        .map(|rule| evaluate_rule(student, rule))
        .collect();

    let failed: Vec<RuleResult> = results
        .iter()
        .filter(|result| !result.passed)
        .cloned()
        .collect();
    let failed_count = failed.len();
    let passed_count = results.len() - failed_count;
    let status = classify(failed_count);

    let missing_criteria = failed.iter().map(|result| result.message.clone()).collect();
    let suggestions = generate_suggestions(&failed, student);

    debug!(
        student = %student.id,
        drive = %drive.id,
        passed = passed_count,
        failed = failed_count,
        status = status.label(),
        "eligibility evaluated"
    );

    EligibilityResult {
        student_id: student.id.clone(),
        drive_id: drive.id.clone(),
        eligible: status == EligibilityStatus::Eligible,
        partially_eligible: status == EligibilityStatus::PartiallyEligible,
        results,
        passed_count,
        failed_count,
        missing_criteria,
        suggestions,
    }
}
