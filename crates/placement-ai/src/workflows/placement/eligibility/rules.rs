use tracing::warn;

use super::super::domain::{EligibilityRule, RuleOperator, RuleValue, StudentProfile};
use super::fields::{field_label, resolve, same_skill, FieldValue};
use super::{RuleResult, Severity};

/// Fixed severity lookup keyed by operator.
pub(crate) fn severity_for(operator: &RuleOperator) -> Severity {
    match operator {
        RuleOperator::GreaterThan
        | RuleOperator::GreaterOrEqual
        | RuleOperator::Equal
        | RuleOperator::In => Severity::Critical,
        RuleOperator::LessThan | RuleOperator::LessOrEqual | RuleOperator::Contains => {
            Severity::Moderate
        }
        RuleOperator::NotEqual | RuleOperator::NotIn | RuleOperator::NotContains => {
            Severity::Minor
        }
        RuleOperator::Unrecognized(_) => Severity::Critical,
    }
}

/// Evaluate a single rule against the student's resolved value.
pub fn evaluate_rule(student: &StudentProfile, rule: &EligibilityRule) -> RuleResult {
    let student_value = resolve(student, rule.field);
    let label = field_label(rule.field);
    let shown = student_value.display_for(rule.field);
    let required = &rule.value;

    let (passed, message) = match &rule.operator {
        RuleOperator::GreaterThan
        | RuleOperator::GreaterOrEqual
        | RuleOperator::LessThan
        | RuleOperator::LessOrEqual
        | RuleOperator::Equal
        | RuleOperator::NotEqual => {
            let passed = compare(&rule.operator, &student_value, required);
            let symbol = comparison_symbol(&rule.operator);
            let message = if passed {
                format!("✅ {label}: {shown} (Required: {symbol} {required})")
            } else {
                format!("❌ {label}: Requires {symbol} {required} (You: {shown})")
            };
            (passed, message)
        }
        RuleOperator::In => {
            let passed = required
                .as_list()
                .map(|allowed| allowed.iter().any(|item| student_value.matches(item)))
                .unwrap_or(false);
            let message = if passed {
                format!("✅ {label}: {shown} (Allowed: {required})")
            } else {
                format!("❌ {label}: Must be one of {required} (You: {shown})")
            };
            (passed, message)
        }
        RuleOperator::NotIn => {
            let passed = !student_value.is_missing()
                && required
                    .as_list()
                    .map(|excluded| !excluded.iter().any(|item| student_value.matches(item)))
                    .unwrap_or(false);
            let message = if passed {
                format!("✅ {label}: {shown} (Excluded: {required})")
            } else {
                format!("❌ {label}: {shown} is not accepted (Excluded: {required})")
            };
            (passed, message)
        }
        RuleOperator::Contains => {
            let passed = set_contains(&student_value, required).unwrap_or(false);
            let message = if passed {
                format!("✅ {label}: Has {required}")
            } else {
                format!("❌ {label}: Missing {required}")
            };
            (passed, message)
        }
        RuleOperator::NotContains => {
            let passed = set_contains(&student_value, required)
                .map(|found| !found)
                .unwrap_or(false);
            let message = if passed {
                format!("✅ {label}: Does not list {required}")
            } else {
                format!("❌ {label}: Must not list {required}")
            };
            (passed, message)
        }
        RuleOperator::Unrecognized(token) => {
            warn!(field = rule.field.key(), operator = %token, "unknown eligibility operator");
            (false, format!("❌ {label}: Unknown operator '{token}'"))
        }
    };

    RuleResult {
        rule: rule.clone(),
        passed,
        message,
        student_value,
        required_value: required.clone(),
        severity: severity_for(&rule.operator),
    }
}

fn compare(operator: &RuleOperator, actual: &FieldValue, required: &RuleValue) -> bool {
    match operator {
        RuleOperator::Equal => actual.matches(required),
        RuleOperator::NotEqual => !actual.is_missing() && !actual.matches(required),
        _ => {
            let (Some(actual), Some(required)) = (actual.as_number(), required.as_number()) else {
                return false;
            };
            match operator {
                RuleOperator::GreaterThan => actual > required,
                RuleOperator::GreaterOrEqual => actual >= required,
                RuleOperator::LessThan => actual < required,
                RuleOperator::LessOrEqual => actual <= required,
                _ => false,
            }
        }
    }
}

/// `None` when either side has the wrong shape for a membership test.
fn set_contains(actual: &FieldValue, required: &RuleValue) -> Option<bool> {
    let FieldValue::Set(members) = actual else {
        return None;
    };
    let RuleValue::Text(needle) = required else {
        return None;
    };
    Some(members.iter().any(|member| same_skill(member, needle)))
}

fn comparison_symbol(operator: &RuleOperator) -> &'static str {
    match operator {
        RuleOperator::GreaterThan => ">",
        RuleOperator::GreaterOrEqual => "≥",
        RuleOperator::LessThan => "<",
        RuleOperator::LessOrEqual => "≤",
        RuleOperator::Equal => "=",
        RuleOperator::NotEqual => "≠",
        _ => "?",
    }
}
