//! Risk assessment result types.

use serde::{Deserialize, Serialize};

/// Risk indication derived from the classifier's class code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskIndication {
    /// Class code 0: no signs of malaria.
    NoMalaria,
    /// Class code 1: malaria suspected.
    Malaria,
    /// Any other class code. The risk message is withheld.
    Unknown,
}

impl RiskIndication {
    /// Map a raw classifier output code to an indication.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::NoMalaria,
            1 => Self::Malaria,
            _ => Self::Unknown,
        }
    }

    /// Short headline for display.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            Self::NoMalaria => "Likely no Malaria",
            Self::Malaria => "Likely there is malaria",
            Self::Unknown => "Result unavailable",
        }
    }

    /// Advice paragraph shown with the headline. `None` for unrecognized
    /// codes: no risk message is emitted for those.
    #[must_use]
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            Self::NoMalaria => Some(
                "The analysis indicates that the patient does not exhibit signs of malaria. \
                 It is recommended to continue regular monitoring.",
            ),
            Self::Malaria => Some(
                "The analysis suggests the presence of malaria in the patient. \
                 Immediate medical attention and further evaluation are advised to ensure \
                 proper management and treatment.",
            ),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for RiskIndication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMalaria => write!(f, "NO MALARIA"),
            Self::Malaria => write!(f, "MALARIA"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Completed screening record. Rendered once, then discarded; nothing is
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Patient reference carried over from the intake form, if given.
    pub patient_id: Option<String>,

    pub indication: RiskIndication,

    /// Raw class code the model returned.
    pub class_code: i64,

    /// When the screening completed.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl RiskAssessment {
    /// Create an assessment from a raw class code.
    #[must_use]
    pub fn from_code(code: i64, patient_id: Option<String>) -> Self {
        Self {
            patient_id,
            indication: RiskIndication::from_code(code),
            class_code: code,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping() {
        assert_eq!(RiskIndication::from_code(0), RiskIndication::NoMalaria);
        assert_eq!(RiskIndication::from_code(1), RiskIndication::Malaria);
        assert_eq!(RiskIndication::from_code(2), RiskIndication::Unknown);
        assert_eq!(RiskIndication::from_code(-1), RiskIndication::Unknown);
    }

    #[test]
    fn test_unknown_code_withholds_message() {
        assert!(RiskIndication::from_code(2).advice().is_none());
        assert!(RiskIndication::from_code(0).advice().is_some());
        assert!(RiskIndication::from_code(1).advice().is_some());
    }

    #[test]
    fn test_assessment_keeps_raw_code() {
        let assessment = RiskAssessment::from_code(7, Some("MRN-12".into()));
        assert_eq!(assessment.class_code, 7);
        assert_eq!(assessment.indication, RiskIndication::Unknown);
        assert_eq!(assessment.patient_id.as_deref(), Some("MRN-12"));
    }
}
