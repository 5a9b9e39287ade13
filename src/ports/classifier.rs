//! Classifier port: Trait for the pre-trained risk model.
//!
//! The model is an opaque artifact. Its entire contract is: a batch of
//! fixed-length numeric rows in, one integer class code per row out.
//! Interpretation of the codes belongs to the domain layer.

use crate::domain::FeatureVector;

/// Classification failures at inference time.
///
/// Artifact loading has its own error type in the adapter; by the time a
/// `Classifier` exists, the model is loaded and validated.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    #[error("input batch does not match the model: {0}")]
    InvalidBatch(String),
}

/// Trait for single-shot batch classification.
pub trait Classifier: Send + Sync {
    /// Number of features per row the loaded model expects.
    fn feature_count(&self) -> usize;

    /// Classify a batch of feature rows.
    ///
    /// Returns exactly one class code per input row, in order.
    ///
    /// # Errors
    /// Returns `ClassifierError::InvalidBatch` if the rows do not match
    /// the model's expected feature count.
    fn classify(&self, batch: &[FeatureVector]) -> Result<Vec<i64>, ClassifierError>;
}
