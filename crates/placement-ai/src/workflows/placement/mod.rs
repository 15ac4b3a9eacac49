//! Drive eligibility: the rule engine plus the repository, service, and HTTP
//! surfaces that host it.

pub mod catalog;
pub mod domain;
pub mod eligibility;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, DriveCatalog};
pub use domain::{
    Drive, DriveId, EligibilityField, EligibilityRule, Internship, RuleOperator, RuleValue,
    StudentId, StudentProfile,
};
pub use eligibility::{
    check_eligibility, check_eligibility_batch, check_eligibility_batch_with, eligible_drives,
    eligible_drives_with, eligible_students_count, eligible_students_count_with, evaluate_rule,
    generate_suggestions, BatchOptions, CohortSummary, DriveBuckets, DriveMatch,
    EligibilityResult, EligibilityStatus, FieldValue, RuleResult, Severity,
};
pub use repository::{PlacementRepository, RepositoryError};
pub use router::eligibility_router;
pub use service::{EligibilityService, EligibilityServiceError};
