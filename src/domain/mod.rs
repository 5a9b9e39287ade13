//! Domain layer: Core screening types and encoding logic.
//!
//! Pure types with no I/O. The feature encoding here is the contract the
//! trained model depends on.

mod assessment;
mod intake;

pub use assessment::{RiskAssessment, RiskIndication};
pub use intake::{
    FeatureVector, FeverIntensity, Gender, IntakeError, SymptomReport, YesNo, FEATURE_COUNT,
    FEATURE_NAMES,
};
