use std::sync::Arc;

use super::common::*;
use crate::workflows::placement::domain::{DriveId, StudentId};
use crate::workflows::placement::repository::{PlacementRepository, RepositoryError};
use crate::workflows::placement::{BatchOptions, EligibilityService, EligibilityServiceError};

#[test]
fn check_evaluates_stored_records() {
    let (service, _) = build_service();

    let result = service
        .check(&StudentId("stu-001".to_string()), &DriveId("drv-strict".to_string()))
        .expect("check succeeds");

    assert!(result.partially_eligible);
    assert_eq!(result.failed_count, 1);
}

#[test]
fn check_reports_unknown_ids() {
    let (service, _) = build_service();

    let err = service
        .check(&StudentId("stu-404".to_string()), &DriveId("drv-open".to_string()))
        .expect_err("unknown student");
    assert!(matches!(err, EligibilityServiceError::UnknownStudent(_)));
    assert!(err.is_not_found());

    let err = service
        .check(&StudentId("stu-001".to_string()), &DriveId("drv-404".to_string()))
        .expect_err("unknown drive");
    assert!(matches!(err, EligibilityServiceError::UnknownDrive(_)));
}

#[test]
fn drives_for_student_skips_closed_drives() {
    let (service, _) = build_service();

    let buckets = service
        .drives_for_student(&StudentId("stu-001".to_string()), date(2025, 3, 1))
        .expect("listing succeeds");

    let all: Vec<_> = buckets
        .fully_eligible
        .iter()
        .chain(&buckets.partially_eligible)
        .chain(&buckets.not_eligible)
        .map(|entry| entry.drive_id.0.as_str())
        .collect();
    assert!(!all.contains(&"drv-closed"));
    assert_eq!(buckets.fully_eligible.len(), 1);
    assert_eq!(buckets.not_eligible.len(), 1, "strict drive rejects near misses");

    let buckets = service
        .drives_for_student(&StudentId("stu-001".to_string()), date(2025, 1, 31))
        .expect("listing succeeds");
    assert_eq!(buckets.fully_eligible.len(), 2, "deadline day is still open");
}

#[test]
fn cohort_reflects_upserted_students() {
    let (service, repository) = build_service();

    let summary = service
        .cohort(&DriveId("drv-open".to_string()))
        .expect("cohort succeeds");
    assert_eq!(summary.eligible, 2);
    assert_eq!(summary.not_eligible, 1);

    repository
        .upsert_student(student_with("stu-003", 8.0, "CSE", 0))
        .expect("upsert succeeds");

    let summary = service
        .cohort(&DriveId("drv-open".to_string()))
        .expect("cohort succeeds");
    assert_eq!(summary.eligible, 3);
    assert_eq!(summary.total(), 3);
}

#[test]
fn sequential_service_matches_default_cohort() {
    let (service, repository) = build_service();
    let sequential =
        EligibilityService::new(repository).with_options(BatchOptions::sequential());
    let drive_id = DriveId("drv-open".to_string());

    assert_eq!(
        sequential.cohort(&drive_id).expect("cohort succeeds"),
        service.cohort(&drive_id).expect("cohort succeeds")
    );
}

#[test]
fn repository_outages_propagate() {
    let service = EligibilityService::new(Arc::new(UnavailableRepository));

    let err = service
        .cohort(&DriveId("drv-open".to_string()))
        .expect_err("repository offline");

    assert!(matches!(
        err,
        EligibilityServiceError::Repository(RepositoryError::Unavailable(_))
    ));
    assert!(!err.is_not_found());
}

#[test]
fn inline_evaluation_ignores_storage() {
    let service = EligibilityService::new(Arc::new(UnavailableRepository));

    let result = service.evaluate_inline(&student(), &drive("drv-x", baseline_rules(), false));

    assert!(result.eligible);
}
