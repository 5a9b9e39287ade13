//! Screening service: Orchestrates the encode-and-classify pipeline.
//!
//! Each submission is one synchronous unit of work: validate and encode
//! the intake snapshot, run the model on a one-row batch, interpret the
//! class code. Nothing is persisted between submissions.

use std::sync::Arc;

use crate::domain::{RiskAssessment, RiskIndication, SymptomReport, FEATURE_COUNT};
use crate::ports::{Classifier, ClassifierError};
use crate::MalascreenError;

/// Service for running symptom screenings against the loaded risk model.
pub struct ScreeningService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
}

impl<C> ScreeningService<C>
where
    C: Classifier,
{
    /// Create a new screening service around a loaded classifier.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Whether the loaded model matches the intake feature layout.
    #[must_use]
    pub fn model_compatible(&self) -> bool {
        self.classifier.feature_count() == FEATURE_COUNT
    }

    /// Run one screening.
    ///
    /// Pipeline: encode the report (fails fast on unset categorical
    /// fields, before the model is touched), classify the vector as a
    /// one-row batch, map the class code to an indication.
    ///
    /// # Errors
    /// Returns `MalascreenError::Intake` for incomplete input and
    /// `MalascreenError::Classifier` if the model rejects the batch.
    pub fn assess(&self, report: &SymptomReport) -> Result<RiskAssessment, MalascreenError> {
        let vector = report.encode()?;
        tracing::debug!("Encoded intake into {FEATURE_COUNT} features");

        let codes = self.classifier.classify(std::slice::from_ref(&vector))?;
        let code = codes.first().copied().ok_or_else(|| {
            ClassifierError::InvalidBatch("classifier returned an empty batch".into())
        })?;

        let assessment = RiskAssessment::from_code(code, report.patient_id.clone());
        match assessment.indication {
            RiskIndication::Unknown => {
                tracing::warn!(
                    "Classifier returned unrecognized class code {code}; withholding risk message"
                );
            }
            indication => {
                tracing::info!("Screening complete: code={code}, indication={indication}");
            }
        }

        Ok(assessment)
    }
}
