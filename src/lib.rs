//! # Malascreen
//!
//! Symptom-based malaria risk screening.
//!
//! This crate provides:
//! - A deterministic encoding of symptom intake data into the 14-feature
//!   vector the pre-trained risk model consumes
//! - Single-sample inference against a tree-ensemble model artifact
//! - A terminal intake form for local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core screening types (SymptomReport, FeatureVector, RiskAssessment)
//! - `ports`: Trait definition for the classifier boundary
//! - `adapters`: Concrete tree-ensemble model loader
//! - `application`: The screening use case orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{RiskAssessment, RiskIndication, SymptomReport};

/// Result type for Malascreen operations
pub type Result<T> = std::result::Result<T, MalascreenError>;

/// Main error type for Malascreen
#[derive(Debug, thiserror::Error)]
pub enum MalascreenError {
    #[error("incomplete intake: {0}")]
    Intake(#[from] domain::IntakeError),

    #[error("risk assessment unavailable, try again later: {0}")]
    Model(#[from] adapters::ModelError),

    #[error("classification failed: {0}")]
    Classifier(#[from] ports::ClassifierError),
}
