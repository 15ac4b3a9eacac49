use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::super::domain::{Drive, DriveId, StudentId, StudentProfile};
use super::{check_eligibility, EligibilityResult, EligibilityStatus};

/// Cohort-level counts for one drive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    pub eligible: usize,
    pub partially_eligible: usize,
    pub not_eligible: usize,
    pub eligible_students: Vec<StudentId>,
}

impl CohortSummary {
    pub fn total(&self) -> usize {
        self.eligible + self.partially_eligible + self.not_eligible
    }
}

/// A drive paired with the student's evaluation against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveMatch {
    pub drive_id: DriveId,
    pub title: String,
    pub result: EligibilityResult,
}

/// Drives grouped by how the student can act on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveBuckets {
    pub fully_eligible: Vec<DriveMatch>,
    pub partially_eligible: Vec<DriveMatch>,
    pub not_eligible: Vec<DriveMatch>,
}

/// Runtime switch for batch evaluation. `parallel` only has an effect in builds
/// with the `parallel` feature; otherwise evaluation stays sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub parallel: bool,
}

impl BatchOptions {
    pub const fn sequential() -> Self {
        Self { parallel: false }
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
        }
    }
}

/// Evaluate one student against many drives, keyed by drive id.
pub fn check_eligibility_batch(
    student: &StudentProfile,
    drives: &[Drive],
) -> BTreeMap<DriveId, EligibilityResult> {
    check_eligibility_batch_with(student, drives, BatchOptions::default())
}

pub fn check_eligibility_batch_with(
    student: &StudentProfile,
    drives: &[Drive],
    options: BatchOptions,
) -> BTreeMap<DriveId, EligibilityResult> {
    evaluate_drives(student, drives, options)
        .into_iter()
        .map(|result| (result.drive_id.clone(), result))
        .collect()
}

/// Classify every student against `drive` in a single pass.
pub fn eligible_students_count(students: &[StudentProfile], drive: &Drive) -> CohortSummary {
    eligible_students_count_with(students, drive, BatchOptions::default())
}

pub fn eligible_students_count_with(
    students: &[StudentProfile],
    drive: &Drive,
    options: BatchOptions,
) -> CohortSummary {
    let statuses = evaluate_students(students, drive, options);

    let mut summary = CohortSummary::default();
    for (student, status) in students.iter().zip(statuses) {
        match status {
            EligibilityStatus::Eligible => {
                summary.eligible += 1;
                summary.eligible_students.push(student.id.clone());
            }
            EligibilityStatus::PartiallyEligible => summary.partially_eligible += 1,
            EligibilityStatus::NotEligible => summary.not_eligible += 1,
        }
    }
    summary
}

/// Split drives into buckets. Near misses only surface as partial when the drive accepts them.
pub fn eligible_drives(student: &StudentProfile, drives: &[Drive]) -> DriveBuckets {
    eligible_drives_with(student, drives, BatchOptions::default())
}

pub fn eligible_drives_with(
    student: &StudentProfile,
    drives: &[Drive],
    options: BatchOptions,
) -> DriveBuckets {
    let results = evaluate_drives(student, drives, options);

    let mut buckets = DriveBuckets::default();
    for (drive, result) in drives.iter().zip(results) {
        let status = result.status();
        let entry = DriveMatch {
            drive_id: drive.id.clone(),
            title: drive.title(),
            result,
        };
        match status {
            EligibilityStatus::Eligible => buckets.fully_eligible.push(entry),
            EligibilityStatus::PartiallyEligible if drive.allow_partially_eligible => {
                buckets.partially_eligible.push(entry)
            }
            EligibilityStatus::PartiallyEligible | EligibilityStatus::NotEligible => {
                buckets.not_eligible.push(entry)
            }
        }
    }
    buckets
}

#[cfg(feature = "parallel")]
fn evaluate_drives(
    student: &StudentProfile,
    drives: &[Drive],
    options: BatchOptions,
) -> Vec<EligibilityResult> {
    if options.parallel {
        drives
            .par_iter()
            .map(|drive| check_eligibility(student, drive))
            .collect()
    } else {
        drives
            .iter()
            .map(|drive| check_eligibility(student, drive))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_drives(
    student: &StudentProfile,
    drives: &[Drive],
    _options: BatchOptions,
) -> Vec<EligibilityResult> {
    drives
        .iter()
        .map(|drive| check_eligibility(student, drive))
        .collect()
}

#[cfg(feature = "parallel")]
fn evaluate_students(
    students: &[StudentProfile],
    drive: &Drive,
    options: BatchOptions,
) -> Vec<EligibilityStatus> {
    if options.parallel {
        students
            .par_iter()
            .map(|student| check_eligibility(student, drive).status())
            .collect()
    } else {
        students
            .iter()
            .map(|student| check_eligibility(student, drive).status())
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_students(
    students: &[StudentProfile],
    drive: &Drive,
    _options: BatchOptions,
) -> Vec<EligibilityStatus> {
    students
        .iter()
        .map(|student| check_eligibility(student, drive).status())
        .collect()
}
