use super::super::domain::{EligibilityField, RuleValue, StudentProfile};
use super::fields::field_label;
use super::RuleResult;

const CGPA_NEAR_MISS: f64 = 0.5;

/// Remediation hints for failed rules.
///
/// Produces at most one entry per failure. Near-miss guards (CGPA with no
/// positive gap, zero backlogs) emit nothing for that failure, so callers must
/// not assume the list lines up with `failed`.
pub fn generate_suggestions(failed: &[RuleResult], _student: &StudentProfile) -> Vec<String> {
    failed.iter().filter_map(suggestion_for).collect()
}

fn suggestion_for(result: &RuleResult) -> Option<String> {
    match result.rule.field {
        EligibilityField::Cgpa => {
            let actual = result.student_value.as_number()?;
            let required = result.required_value.as_number()?;
            // Rounded so the branch agrees with the printed gap.
            let gap = ((required - actual) * 100.0).round() / 100.0;
            if gap <= 0.0 {
                None
            } else if gap <= CGPA_NEAR_MISS {
                Some(format!(
                    "You're close! Your CGPA is just {gap:.2} points below the requirement. \
                     Focus on your upcoming semester exams to close the gap."
                ))
            } else {
                Some(format!(
                    "Your CGPA is {gap:.2} points below the required {required}. \
                     Look for drives with lower CGPA cutoffs while you work on improving it."
                ))
            }
        }
        EligibilityField::ActiveBacklogs => {
            let count = result.student_value.as_number()?;
            (count > 0.0).then(|| {
                format!(
                    "Clear your {count} active backlog(s) before the next examination cycle \
                     to become eligible for this drive."
                )
            })
        }
        EligibilityField::Skills => Some(format!(
            "Learn {} through online courses, official documentation, or hands-on projects \
             to meet this requirement.",
            result.required_value
        )),
        EligibilityField::Branch => {
            let branches = match &result.required_value {
                RuleValue::List(items) => items
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
                other => other.to_string(),
            };
            Some(format!(
                "This drive is open to {branches} only. Look for drives that include your branch."
            ))
        }
        EligibilityField::HasInternship => Some(
            "Gain internship experience through summer internships, open-source contributions, \
             or research projects."
                .to_string(),
        ),
        EligibilityField::TenthPercentage | EligibilityField::TwelfthPercentage => {
            Some(format!(
                "{} cannot be changed now. Focus on drives whose academic cutoffs you already meet.",
                field_label(result.rule.field)
            ))
        }
        other => Some(format!(
            "Work on improving your {} to meet this requirement.",
            field_label(other)
        )),
    }
}
