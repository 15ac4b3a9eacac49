use serde::{Deserialize, Serialize};

/// Failures tolerated before a student stops counting as a near miss.
pub const PARTIAL_ELIGIBILITY_LIMIT: usize = 2;

/// Classification of a student against a single drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    PartiallyEligible,
    NotEligible,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "eligible",
            EligibilityStatus::PartiallyEligible => "partially_eligible",
            EligibilityStatus::NotEligible => "not_eligible",
        }
    }
}

pub(crate) fn classify(failed_count: usize) -> EligibilityStatus {
    match failed_count {
        0 => EligibilityStatus::Eligible,
        count if count <= PARTIAL_ELIGIBILITY_LIMIT => EligibilityStatus::PartiallyEligible,
        _ => EligibilityStatus::NotEligible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_failure_count() {
        assert_eq!(classify(0), EligibilityStatus::Eligible);
        assert_eq!(classify(1), EligibilityStatus::PartiallyEligible);
        assert_eq!(classify(2), EligibilityStatus::PartiallyEligible);
        assert_eq!(classify(3), EligibilityStatus::NotEligible);
        assert_eq!(classify(9), EligibilityStatus::NotEligible);
    }
}
