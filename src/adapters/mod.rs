//! Adapters layer: Concrete implementations of ports.
//!
//! - `forest`: JSON tree-ensemble artifact serving the `Classifier` port.

pub mod forest;

pub use forest::{ForestClassifier, ModelError};
