use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for student records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

/// Identifier wrapper for recruitment drives.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriveId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DriveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only snapshot of a student as supplied by the calling data layer.
///
/// Numeric fields default to zero when the source document omits them; the
/// eligibility engine never imputes values on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: StudentId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub batch: String,
    /// Only populated when the calling layer collects it; gender rules fail closed otherwise.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "currentCGPA", default)]
    pub current_cgpa: f64,
    #[serde(default)]
    pub active_backlogs: u32,
    #[serde(default)]
    pub tenth_percentage: f64,
    #[serde(default)]
    pub twelfth_percentage: f64,
    #[serde(default)]
    pub programming_languages: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub internships: Vec<Internship>,
}

/// Prior internship entry. Only its presence matters for eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Internship {
    pub company: String,
    #[serde(default)]
    pub role: String,
}

/// Recruitment drive carrying its own ordered rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    pub id: DriveId,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, alias = "eligibilityRules")]
    pub rules: Vec<EligibilityRule>,
    #[serde(default)]
    pub allow_partially_eligible: bool,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

impl Drive {
    /// A drive without a deadline stays open indefinitely.
    pub fn is_open(&self, today: NaiveDate) -> bool {
        self.deadline.map(|deadline| today <= deadline).unwrap_or(true)
    }

    pub fn title(&self) -> String {
        match (self.company.is_empty(), self.role.is_empty()) {
            (false, false) => format!("{} - {}", self.company, self.role),
            (false, true) => self.company.clone(),
            (true, false) => self.role.clone(),
            (true, true) => self.id.0.clone(),
        }
    }
}

/// Declarative comparison gating access to a drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRule {
    pub field: EligibilityField,
    pub operator: RuleOperator,
    pub value: RuleValue,
}

impl EligibilityRule {
    pub fn new(field: EligibilityField, operator: RuleOperator, value: impl Into<RuleValue>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }
}

/// Student attributes a rule may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EligibilityField {
    Cgpa,
    ActiveBacklogs,
    Branch,
    Batch,
    Gender,
    TenthPercentage,
    TwelfthPercentage,
    Skills,
    HasInternship,
}

impl EligibilityField {
    pub const fn all() -> [Self; 9] {
        [
            Self::Cgpa,
            Self::ActiveBacklogs,
            Self::Branch,
            Self::Batch,
            Self::Gender,
            Self::TenthPercentage,
            Self::TwelfthPercentage,
            Self::Skills,
            Self::HasInternship,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Cgpa => "cgpa",
            Self::ActiveBacklogs => "activeBacklogs",
            Self::Branch => "branch",
            Self::Batch => "batch",
            Self::Gender => "gender",
            Self::TenthPercentage => "tenthPercentage",
            Self::TwelfthPercentage => "twelfthPercentage",
            Self::Skills => "skills",
            Self::HasInternship => "hasInternship",
        }
    }
}

/// Comparison operator. Tokens outside the supported set are kept verbatim so
/// evaluation can report them instead of rejecting the whole drive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleOperator {
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Equal,
    NotEqual,
    In,
    NotIn,
    Contains,
    NotContains,
    Unrecognized(String),
}

impl RuleOperator {
    pub fn token(&self) -> &str {
        match self {
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Contains => "CONTAINS",
            Self::NotContains => "NOT CONTAINS",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl FromStr for RuleOperator {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let operator = match raw.trim() {
            ">" => Self::GreaterThan,
            ">=" => Self::GreaterOrEqual,
            "<" => Self::LessThan,
            "<=" => Self::LessOrEqual,
            "=" | "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "IN" => Self::In,
            "NOT IN" => Self::NotIn,
            "CONTAINS" => Self::Contains,
            "NOT CONTAINS" => Self::NotContains,
            other => Self::Unrecognized(other.to_string()),
        };
        Ok(operator)
    }
}

impl From<String> for RuleOperator {
    fn from(value: String) -> Self {
        match value.parse::<RuleOperator>() {
            Ok(operator) => operator,
            Err(never) => match never {},
        }
    }
}

impl From<RuleOperator> for String {
    fn from(value: RuleOperator) -> Self {
        value.token().to_string()
    }
}

impl fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Comparison value attached to a rule; its shape depends on the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<RuleValue>),
}

impl RuleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RuleValue::Number(value) => Some(*value),
            RuleValue::Text(raw) => raw.trim().parse::<f64>().ok(),
            RuleValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            RuleValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RuleValue]> {
        match self {
            RuleValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Bool(true) => f.write_str("Yes"),
            RuleValue::Bool(false) => f.write_str("No"),
            RuleValue::Number(value) => write!(f, "{value}"),
            RuleValue::Text(text) => f.write_str(text),
            RuleValue::List(items) => {
                let joined = items
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                f.write_str(&joined)
            }
        }
    }
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        RuleValue::Number(value)
    }
}

impl From<u32> for RuleValue {
    fn from(value: u32) -> Self {
        RuleValue::Number(f64::from(value))
    }
}

impl From<bool> for RuleValue {
    fn from(value: bool) -> Self {
        RuleValue::Bool(value)
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::Text(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        RuleValue::Text(value)
    }
}

impl<T: Into<RuleValue>> From<Vec<T>> for RuleValue {
    fn from(values: Vec<T>) -> Self {
        RuleValue::List(values.into_iter().map(Into::into).collect())
    }
}
