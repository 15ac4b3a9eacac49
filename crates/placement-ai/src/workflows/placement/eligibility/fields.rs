use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::domain::{EligibilityField, RuleValue, StudentProfile};

/// Student-side value a rule is compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Set(Vec<String>),
    Missing,
}

impl FieldValue {
    pub(crate) fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Text(raw) => raw.trim().parse::<f64>().ok(),
            FieldValue::Flag(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            FieldValue::Set(_) | FieldValue::Missing => None,
        }
    }

    pub(crate) fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Strict equality: variants must line up, no coercion between text and numbers.
    pub(crate) fn matches(&self, expected: &RuleValue) -> bool {
        match (self, expected) {
            (FieldValue::Number(actual), RuleValue::Number(wanted)) => actual == wanted,
            (FieldValue::Text(actual), RuleValue::Text(wanted)) => actual == wanted,
            (FieldValue::Flag(actual), RuleValue::Bool(wanted)) => actual == wanted,
            _ => false,
        }
    }

    pub(crate) fn display_for(&self, field: EligibilityField) -> String {
        match (self, field) {
            (
                FieldValue::Number(value),
                EligibilityField::Cgpa
                | EligibilityField::TenthPercentage
                | EligibilityField::TwelfthPercentage,
            ) => format!("{value:.1}"),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Flag(true) => f.write_str("Yes"),
            FieldValue::Flag(false) => f.write_str("No"),
            FieldValue::Set(items) if items.is_empty() => f.write_str("None"),
            FieldValue::Set(items) => f.write_str(&items.join(", ")),
            FieldValue::Missing => f.write_str("Not provided"),
        }
    }
}

/// Map a rule field onto the student's current value.
pub fn resolve(student: &StudentProfile, field: EligibilityField) -> FieldValue {
    match field {
        EligibilityField::Cgpa => FieldValue::Number(student.current_cgpa),
        EligibilityField::ActiveBacklogs => FieldValue::Number(f64::from(student.active_backlogs)),
        EligibilityField::Branch => FieldValue::Text(student.branch.clone()),
        EligibilityField::Batch => FieldValue::Text(student.batch.clone()),
        EligibilityField::Gender => student
            .gender
            .as_ref()
            .map(|gender| FieldValue::Text(gender.clone()))
            .unwrap_or(FieldValue::Missing),
        EligibilityField::TenthPercentage => FieldValue::Number(student.tenth_percentage),
        EligibilityField::TwelfthPercentage => FieldValue::Number(student.twelfth_percentage),
        EligibilityField::Skills => FieldValue::Set(combined_skills(student)),
        EligibilityField::HasInternship => FieldValue::Flag(!student.internships.is_empty()),
    }
}

/// Human-readable label shared by rule messages and suggestions.
pub fn field_label(field: EligibilityField) -> &'static str {
    match field {
        EligibilityField::Cgpa => "CGPA",
        EligibilityField::ActiveBacklogs => "Active Backlogs",
        EligibilityField::Branch => "Branch",
        EligibilityField::Batch => "Batch",
        EligibilityField::Gender => "Gender",
        EligibilityField::TenthPercentage => "10th Percentage",
        EligibilityField::TwelfthPercentage => "12th Percentage",
        EligibilityField::Skills => "Skills",
        EligibilityField::HasInternship => "Internship Experience",
    }
}

/// Case-insensitive skill comparison, Unicode aware.
pub(crate) fn same_skill(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

fn combined_skills(student: &StudentProfile) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    let sources = student
        .programming_languages
        .iter()
        .chain(&student.frameworks)
        .chain(&student.tools);

    for skill in sources {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            continue;
        }
        if skills
            .iter()
            .any(|existing| same_skill(existing, trimmed))
        {
            continue;
        }
        skills.push(trimmed.to_string());
    }

    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::placement::domain::{Internship, StudentId};

    fn student() -> StudentProfile {
        StudentProfile {
            id: StudentId("stu-1".to_string()),
            name: "Asha".to_string(),
            branch: "CSE".to_string(),
            batch: "2025".to_string(),
            gender: None,
            current_cgpa: 7.5,
            active_backlogs: 0,
            tenth_percentage: 88.0,
            twelfth_percentage: 91.2,
            programming_languages: vec!["Rust".to_string(), "Python".to_string()],
            frameworks: vec!["Axum".to_string()],
            tools: vec!["Docker".to_string(), "python".to_string()],
            internships: Vec::new(),
        }
    }

    #[test]
    fn skills_merge_all_collections_without_duplicates() {
        let value = resolve(&student(), EligibilityField::Skills);
        assert_eq!(
            value,
            FieldValue::Set(vec![
                "Rust".to_string(),
                "Python".to_string(),
                "Axum".to_string(),
                "Docker".to_string(),
            ])
        );
    }

    #[test]
    fn skill_comparison_folds_non_ascii_case() {
        assert!(same_skill("Ångström", " ångström "));
        assert!(same_skill("Élixir", "ÉLIXIR"));
        assert!(!same_skill("Rust", "Rusty"));
    }

    #[test]
    fn internship_flag_tracks_presence_not_count() {
        let mut profile = student();
        assert_eq!(
            resolve(&profile, EligibilityField::HasInternship),
            FieldValue::Flag(false)
        );

        profile.internships = vec![
            Internship {
                company: "Acme".to_string(),
                role: "Intern".to_string(),
            },
            Internship {
                company: "Globex".to_string(),
                role: String::new(),
            },
        ];
        assert_eq!(
            resolve(&profile, EligibilityField::HasInternship),
            FieldValue::Flag(true)
        );
    }

    #[test]
    fn gender_is_missing_unless_supplied() {
        let mut profile = student();
        assert_eq!(resolve(&profile, EligibilityField::Gender), FieldValue::Missing);

        profile.gender = Some("Female".to_string());
        assert_eq!(
            resolve(&profile, EligibilityField::Gender),
            FieldValue::Text("Female".to_string())
        );
    }

    #[test]
    fn every_field_has_a_label() {
        for field in EligibilityField::all() {
            assert!(!field_label(field).is_empty(), "{field:?} lacks a label");
        }
    }

    #[test]
    fn academic_scores_render_with_one_decimal() {
        let value = resolve(&student(), EligibilityField::Cgpa);
        assert_eq!(value.display_for(EligibilityField::Cgpa), "7.5");

        let backlogs = resolve(&student(), EligibilityField::ActiveBacklogs);
        assert_eq!(backlogs.display_for(EligibilityField::ActiveBacklogs), "0");
    }
}
