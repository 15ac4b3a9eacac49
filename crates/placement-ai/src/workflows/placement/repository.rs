use super::domain::{Drive, DriveId, StudentId, StudentProfile};

/// Storage abstraction over the document store holding students and drives.
pub trait PlacementRepository: Send + Sync {
    fn fetch_student(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError>;
    fn fetch_drive(&self, id: &DriveId) -> Result<Option<Drive>, RepositoryError>;
    fn list_students(&self) -> Result<Vec<StudentProfile>, RepositoryError>;
    fn list_drives(&self) -> Result<Vec<Drive>, RepositoryError>;
    fn upsert_student(&self, student: StudentProfile) -> Result<(), RepositoryError>;
    fn upsert_drive(&self, drive: Drive) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
