//! Application layer: Use cases and services.
//!
//! Orchestrates domain encoding with the classifier port to implement
//! the screening pipeline.

mod screening;

pub use screening::ScreeningService;
