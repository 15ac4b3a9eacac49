use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{Drive, DriveId, StudentId, StudentProfile};
use super::eligibility::{
    check_eligibility, eligible_drives_with, eligible_students_count_with, BatchOptions,
    CohortSummary, DriveBuckets, EligibilityResult,
};
use super::repository::{PlacementRepository, RepositoryError};

/// Service composing the placement repository with the eligibility engine.
pub struct EligibilityService<R> {
    repository: Arc<R>,
    options: BatchOptions,
}

impl<R> EligibilityService<R>
where
    R: PlacementRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            options: BatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Evaluate a stored student against a stored drive.
    pub fn check(
        &self,
        student_id: &StudentId,
        drive_id: &DriveId,
    ) -> Result<EligibilityResult, EligibilityServiceError> {
        let student = self.student(student_id)?;
        let drive = self.drive(drive_id)?;
        Ok(check_eligibility(&student, &drive))
    }

    /// Bucket every drive still open on `today` for the given student.
    pub fn drives_for_student(
        &self,
        student_id: &StudentId,
        today: NaiveDate,
    ) -> Result<DriveBuckets, EligibilityServiceError> {
        let student = self.student(student_id)?;
        let open: Vec<Drive> = self
            .repository
            .list_drives()?
            .into_iter()
            .filter(|drive| drive.is_open(today))
            .collect();

        let buckets = eligible_drives_with(&student, &open, self.options);
        info!(
            student = %student_id,
            open_drives = open.len(),
            fully_eligible = buckets.fully_eligible.len(),
            partially_eligible = buckets.partially_eligible.len(),
            "drive eligibility computed"
        );
        Ok(buckets)
    }

    /// Cohort counts for a stored drive across every stored student.
    pub fn cohort(&self, drive_id: &DriveId) -> Result<CohortSummary, EligibilityServiceError> {
        let drive = self.drive(drive_id)?;
        let students = self.repository.list_students()?;
        let summary = eligible_students_count_with(&students, &drive, self.options);
        info!(
            drive = %drive_id,
            students = summary.total(),
            eligible = summary.eligible,
            parallel = self.options.parallel,
            "cohort eligibility computed"
        );
        Ok(summary)
    }

    /// Evaluate records supplied by the caller without touching storage.
    pub fn evaluate_inline(&self, student: &StudentProfile, drive: &Drive) -> EligibilityResult {
        check_eligibility(student, drive)
    }

    fn student(&self, id: &StudentId) -> Result<StudentProfile, EligibilityServiceError> {
        self.repository
            .fetch_student(id)?
            .ok_or_else(|| EligibilityServiceError::UnknownStudent(id.clone()))
    }

    fn drive(&self, id: &DriveId) -> Result<Drive, EligibilityServiceError> {
        self.repository
            .fetch_drive(id)?
            .ok_or_else(|| EligibilityServiceError::UnknownDrive(id.clone()))
    }
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("unknown student '{0}'")]
    UnknownStudent(StudentId),
    #[error("unknown drive '{0}'")]
    UnknownDrive(DriveId),
}

impl EligibilityServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EligibilityServiceError::UnknownStudent(_)
                | EligibilityServiceError::UnknownDrive(_)
                | EligibilityServiceError::Repository(RepositoryError::NotFound)
        )
    }
}
