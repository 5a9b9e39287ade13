//! Symptom intake types for malaria risk screening.
//!
//! The feature order below matches the order the risk model was trained
//! on. Changing it silently changes every prediction.

use serde::{Deserialize, Serialize};

/// Number of features the risk model consumes per sample.
pub const FEATURE_COUNT: usize = 14;

/// Feature names in model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "fever_intensity",
    "fever_days",
    "headache_days",
    "bodyache_days",
    "vomiting_days",
    "abdominal_discomfort_days",
    "cough_days",
    "urinal_variation",
    "pallor",
    "chills_days",
    "rigors_days",
    "temperature",
    "age",
    "gender",
];

/// Patient gender as selected on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Numeric code the model was trained with.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Female => 2,
            Self::Male => 1,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }

    /// Parse a form label. The empty label is the unset sentinel.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        match label {
            "Female" => Some(Self::Female),
            "Male" => Some(Self::Male),
            _ => None,
        }
    }
}

/// Reported fever intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeverIntensity {
    HighGrade,
    Intermittent,
    Low,
}

impl FeverIntensity {
    /// Numeric code the model was trained with.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::HighGrade => 3,
            Self::Intermittent => 2,
            Self::Low => 1,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::HighGrade => "High Grade",
            Self::Intermittent => "Intermittent",
            Self::Low => "Low",
        }
    }

    /// Parse a form label. The empty label is the unset sentinel.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        match label {
            "High Grade" => Some(Self::HighGrade),
            "Intermittent" => Some(Self::Intermittent),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Yes/No answer for the urination-change and pallor questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Yes => 1,
            Self::No => 0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Parse a form label. The empty label is the unset sentinel.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        match label {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }
}

/// One submission's worth of raw intake data.
///
/// Categorical fields use `None` as the unset sentinel. Numeric fields
/// start at 0 on the form, and a 0 left untouched is treated as a valid
/// answer (0 days of chills is a legitimate report), so completeness
/// validation only covers the categorical fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymptomReport {
    /// Optional local identifier, never used for inference.
    pub patient_id: Option<String>,

    /// Age in years.
    pub age: u32,

    pub gender: Option<Gender>,
    pub fever_intensity: Option<FeverIntensity>,

    /// Days with each symptom.
    pub fever_days: u32,
    pub headache_days: u32,
    pub bodyache_days: u32,
    pub vomiting_days: u32,
    pub chills_days: u32,
    pub rigors_days: u32,
    pub abdominal_discomfort_days: u32,
    pub cough_days: u32,

    /// Any changes in urination.
    pub urinal_variation: Option<YesNo>,
    /// Paleness of skin or mucous membranes.
    pub pallor: Option<YesNo>,

    /// Current body temperature in degrees Fahrenheit.
    pub temperature: f64,
}

/// Intake validation failures, recoverable by re-prompting the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("required selections missing: {}", .missing.join(", "))]
    IncompleteInput { missing: Vec<&'static str> },
}

impl SymptomReport {
    /// Encode the report into the model's feature vector.
    ///
    /// # Errors
    /// Returns `IntakeError::IncompleteInput` naming every categorical
    /// field still at its unset sentinel. No partial vector is produced.
    pub fn encode(&self) -> Result<FeatureVector, IntakeError> {
        let (Some(gender), Some(fever_intensity), Some(urinal_variation), Some(pallor)) = (
            self.gender,
            self.fever_intensity,
            self.urinal_variation,
            self.pallor,
        ) else {
            let mut missing = Vec::new();
            if self.gender.is_none() {
                missing.push("gender");
            }
            if self.fever_intensity.is_none() {
                missing.push("fever intensity");
            }
            if self.urinal_variation.is_none() {
                missing.push("urination change");
            }
            if self.pallor.is_none() {
                missing.push("pallor");
            }
            return Err(IntakeError::IncompleteInput { missing });
        };

        Ok(FeatureVector::new([
            f64::from(fever_intensity.code()),
            f64::from(self.fever_days),
            f64::from(self.headache_days),
            f64::from(self.bodyache_days),
            f64::from(self.vomiting_days),
            f64::from(self.abdominal_discomfort_days),
            f64::from(self.cough_days),
            f64::from(urinal_variation.code()),
            f64::from(pallor.code()),
            f64::from(self.chills_days),
            f64::from(self.rigors_days),
            self.temperature,
            f64::from(self.age),
            f64::from(gender.code()),
        ]))
    }
}

/// Fixed-order numeric input row for the risk model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// The row in model order.
    #[must_use]
    pub fn as_row(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_report() -> SymptomReport {
        SymptomReport {
            patient_id: None,
            age: 30,
            gender: Some(Gender::Male),
            fever_intensity: Some(FeverIntensity::HighGrade),
            fever_days: 3,
            headache_days: 2,
            bodyache_days: 1,
            vomiting_days: 0,
            chills_days: 2,
            rigors_days: 1,
            abdominal_discomfort_days: 0,
            cough_days: 1,
            urinal_variation: Some(YesNo::No),
            pallor: Some(YesNo::Yes),
            temperature: 101.5,
        }
    }

    #[test]
    fn test_encode_documented_order() {
        let vector = complete_report().encode().expect("complete report");
        assert_eq!(
            vector.as_row(),
            &[3.0, 3.0, 2.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 2.0, 1.0, 101.5, 30.0, 1.0]
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let report = complete_report();
        assert_eq!(report.encode().unwrap(), report.encode().unwrap());
    }

    #[test]
    fn test_unset_gender_fails_regardless_of_other_fields() {
        let mut report = complete_report();
        report.gender = None;
        let err = report.encode().expect_err("gender unset");
        assert_eq!(
            err,
            IntakeError::IncompleteInput {
                missing: vec!["gender"]
            }
        );
    }

    #[test]
    fn test_all_missing_fields_are_named() {
        let report = SymptomReport::default();
        let IntakeError::IncompleteInput { missing } =
            report.encode().expect_err("nothing selected");
        assert_eq!(
            missing,
            vec!["gender", "fever intensity", "urination change", "pallor"]
        );
    }

    #[test]
    fn test_numeric_zero_defaults_are_valid() {
        let report = SymptomReport {
            gender: Some(Gender::Female),
            fever_intensity: Some(FeverIntensity::Low),
            urinal_variation: Some(YesNo::No),
            pallor: Some(YesNo::No),
            ..SymptomReport::default()
        };
        let vector = report.encode().expect("zeros are legitimate answers");
        assert_eq!(vector.as_row()[1], 0.0); // fever_days
        assert_eq!(vector.as_row()[12], 0.0); // age
    }

    #[test]
    fn test_category_codes_are_fixed() {
        assert_eq!(Gender::Female.code(), 2);
        assert_eq!(Gender::Male.code(), 1);
        assert_eq!(FeverIntensity::HighGrade.code(), 3);
        assert_eq!(FeverIntensity::Intermittent.code(), 2);
        assert_eq!(FeverIntensity::Low.code(), 1);
        assert_eq!(YesNo::Yes.code(), 1);
        assert_eq!(YesNo::No.code(), 0);
    }

    #[test]
    fn test_parse_label_roundtrip() {
        for intensity in [
            FeverIntensity::HighGrade,
            FeverIntensity::Intermittent,
            FeverIntensity::Low,
        ] {
            assert_eq!(FeverIntensity::parse_label(intensity.label()), Some(intensity));
        }
        assert_eq!(Gender::parse_label(""), None);
        assert_eq!(YesNo::parse_label(""), None);
    }
}
