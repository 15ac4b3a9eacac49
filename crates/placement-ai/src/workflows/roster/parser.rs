use super::normalizer::{normalize_cell, split_list};
use super::RosterImportError;
use crate::workflows::placement::domain::{Internship, StudentId, StudentProfile};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

const CGPA_MAX: f64 = 10.0;
const PERCENT_MAX: f64 = 100.0;

pub(crate) fn parse_students<R: Read>(reader: R) -> Result<Vec<StudentProfile>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut students = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record?;
        students.push(row.into_profile(index + 1)?);
    }

    Ok(students)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    branch: String,
    #[serde(default)]
    batch: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(
        rename = "currentCGPA",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    current_cgpa: Option<String>,
    #[serde(
        rename = "activeBacklogs",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    active_backlogs: Option<String>,
    #[serde(
        rename = "tenthPercentage",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    tenth_percentage: Option<String>,
    #[serde(
        rename = "twelfthPercentage",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    twelfth_percentage: Option<String>,
    #[serde(rename = "programmingLanguages", default)]
    programming_languages: String,
    #[serde(default)]
    frameworks: String,
    #[serde(default)]
    tools: String,
    #[serde(default)]
    internships: String,
}

impl RosterRow {
    fn into_profile(self, row: usize) -> Result<StudentProfile, RosterImportError> {
        let id = self
            .id
            .map(|raw| normalize_cell(&raw))
            .filter(|id| !id.is_empty())
            .ok_or(RosterImportError::MissingId { row })?;

        Ok(StudentProfile {
            id: StudentId(id),
            name: normalize_cell(&self.name),
            branch: normalize_cell(&self.branch),
            batch: normalize_cell(&self.batch),
            gender: self.gender.map(|raw| normalize_cell(&raw)),
            current_cgpa: score(self.current_cgpa, row, "currentCGPA", CGPA_MAX)?,
            active_backlogs: number_or_zero(self.active_backlogs, row, "activeBacklogs")?,
            tenth_percentage: score(self.tenth_percentage, row, "tenthPercentage", PERCENT_MAX)?,
            twelfth_percentage: score(
                self.twelfth_percentage,
                row,
                "twelfthPercentage",
                PERCENT_MAX,
            )?,
            programming_languages: split_list(&self.programming_languages),
            frameworks: split_list(&self.frameworks),
            tools: split_list(&self.tools),
            internships: split_list(&self.internships)
                .into_iter()
                .map(|company| Internship {
                    company,
                    role: String::new(),
                })
                .collect(),
        })
    }
}

/// Blank numeric cells default to zero before the record reaches the engine.
fn number_or_zero<T>(
    raw: Option<String>,
    row: usize,
    column: &'static str,
) -> Result<T, RosterImportError>
where
    T: FromStr + Default,
{
    match raw {
        None => Ok(T::default()),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(RosterImportError::InvalidNumber { row, column, value }),
        },
    }
}

/// Academic scores must be finite and within `0..=max`.
fn score(
    raw: Option<String>,
    row: usize,
    column: &'static str,
    max: f64,
) -> Result<f64, RosterImportError> {
    let value: f64 = number_or_zero(raw, row, column)?;
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(RosterImportError::OutOfRange {
            row,
            column,
            value: value.to_string(),
            max,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
