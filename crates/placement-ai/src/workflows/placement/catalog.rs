use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::domain::{Drive, DriveId};

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
    DuplicateDrive(DriveId),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read drive catalog: {}", err),
            CatalogError::Json(err) => write!(f, "invalid drive catalog JSON: {}", err),
            CatalogError::DuplicateDrive(id) => {
                write!(f, "drive '{}' appears more than once in the catalog", id)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Json(err) => Some(err),
            CatalogError::DuplicateDrive(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads drive definitions authored by admin tooling.
///
/// Unknown rule fields are rejected here; unknown operators are kept and
/// reported per rule at evaluation time.
pub struct DriveCatalog;

impl DriveCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Drive>, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Drive>, CatalogError> {
        let drives: Vec<Drive> = serde_json::from_reader(reader)?;
        ensure_unique(drives)
    }

    pub fn from_json(raw: &str) -> Result<Vec<Drive>, CatalogError> {
        let drives: Vec<Drive> = serde_json::from_str(raw)?;
        ensure_unique(drives)
    }
}

fn ensure_unique(drives: Vec<Drive>) -> Result<Vec<Drive>, CatalogError> {
    let mut seen = HashSet::new();
    for drive in &drives {
        if !seen.insert(drive.id.clone()) {
            return Err(CatalogError::DuplicateDrive(drive.id.clone()));
        }
    }
    Ok(drives)
}
