use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use placement_ai::config::SeedConfig;
use placement_ai::error::AppError;
use placement_ai::workflows::placement::{
    Drive, DriveCatalog, DriveId, PlacementRepository, RepositoryError, StudentId, StudentProfile,
};
use placement_ai::workflows::roster::RosterImporter;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPlacementRepository {
    students: Arc<Mutex<BTreeMap<StudentId, StudentProfile>>>,
    drives: Arc<Mutex<BTreeMap<DriveId, Drive>>>,
}

impl InMemoryPlacementRepository {
    pub(crate) fn with_records(students: Vec<StudentProfile>, drives: Vec<Drive>) -> Self {
        let students = students
            .into_iter()
            .map(|student| (student.id.clone(), student))
            .collect();
        let drives = drives
            .into_iter()
            .map(|drive| (drive.id.clone(), drive))
            .collect();
        Self {
            students: Arc::new(Mutex::new(students)),
            drives: Arc::new(Mutex::new(drives)),
        }
    }
}

impl PlacementRepository for InMemoryPlacementRepository {
    fn fetch_student(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        let guard = self.students.lock().expect("student mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_drive(&self, id: &DriveId) -> Result<Option<Drive>, RepositoryError> {
        let guard = self.drives.lock().expect("drive mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_students(&self) -> Result<Vec<StudentProfile>, RepositoryError> {
        let guard = self.students.lock().expect("student mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn list_drives(&self) -> Result<Vec<Drive>, RepositoryError> {
        let guard = self.drives.lock().expect("drive mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn upsert_student(&self, student: StudentProfile) -> Result<(), RepositoryError> {
        let mut guard = self.students.lock().expect("student mutex poisoned");
        guard.insert(student.id.clone(), student);
        Ok(())
    }

    fn upsert_drive(&self, drive: Drive) -> Result<(), RepositoryError> {
        let mut guard = self.drives.lock().expect("drive mutex poisoned");
        guard.insert(drive.id.clone(), drive);
        Ok(())
    }
}

/// Build the directory from the configured seed files; missing paths yield an empty side.
pub(crate) fn load_directory(seed: &SeedConfig) -> Result<InMemoryPlacementRepository, AppError> {
    let students = match &seed.roster_path {
        Some(path) => RosterImporter::from_path(path)?,
        None => Vec::new(),
    };
    let drives = match &seed.drives_path {
        Some(path) => DriveCatalog::from_path(path)?,
        None => Vec::new(),
    };

    info!(
        students = students.len(),
        drives = drives.len(),
        "placement directory seeded"
    );
    Ok(InMemoryPlacementRepository::with_records(students, drives))
}

pub(crate) fn load_files(
    roster: &Path,
    drives: &Path,
) -> Result<InMemoryPlacementRepository, AppError> {
    load_directory(&SeedConfig {
        roster_path: Some(roster.to_path_buf()),
        drives_path: Some(drives.to_path_buf()),
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
