//! Student roster import from CSV exports of the placement database.

mod normalizer;
mod parser;

use crate::workflows::placement::domain::StudentProfile;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
    OutOfRange {
        row: usize,
        column: &'static str,
        value: String,
        max: f64,
    },
    MissingId {
        row: usize,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::InvalidNumber { row, column, value } => write!(
                f,
                "row {}: column '{}' expects a number, found '{}'",
                row, column, value
            ),
            RosterImportError::OutOfRange {
                row,
                column,
                value,
                max,
            } => write!(
                f,
                "row {}: column '{}' must be between 0 and {}, found '{}'",
                row, column, max, value
            ),
            RosterImportError::MissingId { row } => write!(f, "row {}: student id is blank", row),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::InvalidNumber { .. }
            | RosterImportError::OutOfRange { .. }
            | RosterImportError::MissingId { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<StudentProfile>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<StudentProfile>, RosterImportError> {
        parser::parse_students(reader)
    }
}
