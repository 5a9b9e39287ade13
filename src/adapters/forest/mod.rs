//! Tree-ensemble classifier adapter.
//!
//! Loads the exported risk model (an ensemble of binary decision trees,
//! serialized as JSON by the training pipeline) and serves batch
//! predictions by majority vote over the trees.
//!
//! The artifact contract is narrow and versioned: `schema_version` gates
//! the format, and the loader refuses anything structurally inconsistent
//! rather than trusting the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::FeatureVector;
use crate::ports::{Classifier, ClassifierError};

/// Artifact schema version this build understands.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// Default artifact file name inside a model directory.
const MODEL_FILE: &str = "model.json";

/// A node in one decision tree of the ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split: rows with `feature <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    /// Leaf with the tree's vote.
    Leaf { class: i64 },
}

impl TreeNode {
    /// Walk the tree for one row and return its vote.
    fn vote(&self, row: &[f64]) -> i64 {
        match self {
            Self::Leaf { class } => *class,
            Self::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.vote(row)
                } else {
                    right.vote(row)
                }
            }
        }
    }

    /// Verify every split references a feature the model declares.
    fn check_feature_bounds(&self, feature_count: usize) -> Result<(), ModelError> {
        match self {
            Self::Leaf { .. } => Ok(()),
            Self::Split {
                feature,
                left,
                right,
                ..
            } => {
                if *feature >= feature_count {
                    return Err(ModelError::Format(format!(
                        "split references feature index {feature}, model declares {feature_count} features"
                    )));
                }
                left.check_feature_bounds(feature_count)?;
                right.check_feature_bounds(feature_count)
            }
        }
    }

    /// Depth of the tree rooted at this node. Leaves have depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedForest {
    pub schema_version: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
    pub trees: Vec<TreeNode>,
}

/// Artifact loading failures. All of these mean the screening pipeline
/// cannot run; there is no degraded mode.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model artifact not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid model artifact: {0}")]
    Format(String),

    #[error("unsupported model schema version {found} (this build supports {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Classifier backed by the exported tree ensemble.
///
/// Loaded once at startup and held for the life of the process; the
/// artifact is immutable, so the cached model is shared-read only.
#[derive(Debug)]
pub struct ForestClassifier {
    forest: ExportedForest,
}

impl ForestClassifier {
    /// Load the artifact from `path`.
    ///
    /// `path` may be a directory containing `model.json` or the JSON file
    /// itself.
    ///
    /// # Errors
    /// Returns `ModelError` if the artifact is missing, unreadable, has an
    /// unsupported schema version, or is structurally inconsistent.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let model_path = if path.is_dir() {
            path.join(MODEL_FILE)
        } else {
            path.to_path_buf()
        };
        if !model_path.exists() {
            return Err(ModelError::NotFound(model_path));
        }

        let content = std::fs::read_to_string(&model_path)?;
        let forest: ExportedForest =
            serde_json::from_str(&content).map_err(|e| ModelError::Format(e.to_string()))?;

        if forest.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: forest.schema_version,
                supported: SUPPORTED_SCHEMA_VERSION,
            });
        }
        if forest.feature_count == 0 {
            return Err(ModelError::Format("model declares zero features".into()));
        }
        if !forest.feature_names.is_empty() && forest.feature_names.len() != forest.feature_count {
            return Err(ModelError::Format(format!(
                "feature_names length {} does not match feature_count {}",
                forest.feature_names.len(),
                forest.feature_count
            )));
        }
        if forest.trees.is_empty() {
            return Err(ModelError::Format("model contains no trees".into()));
        }
        for tree in &forest.trees {
            tree.check_feature_bounds(forest.feature_count)?;
        }

        tracing::info!(
            "Loaded risk model from {:?} ({} trees, {} features, max depth {})",
            model_path,
            forest.trees.len(),
            forest.feature_count,
            forest.trees.iter().map(TreeNode::depth).max().unwrap_or(0)
        );

        Ok(Self { forest })
    }

    /// Majority vote across the ensemble for one row. Ties break toward
    /// the smallest class code.
    fn predict_row(&self, row: &[f64]) -> i64 {
        let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
        for tree in &self.forest.trees {
            *votes.entry(tree.vote(row)).or_insert(0) += 1;
        }
        votes
            .into_iter()
            .max_by(|(class_a, count_a), (class_b, count_b)| {
                count_a.cmp(count_b).then(class_b.cmp(class_a))
            })
            .map(|(class, _)| class)
            .unwrap_or_default()
    }
}

impl Classifier for ForestClassifier {
    fn feature_count(&self) -> usize {
        self.forest.feature_count
    }

    fn classify(&self, batch: &[FeatureVector]) -> Result<Vec<i64>, ClassifierError> {
        let expected = self.forest.feature_count;
        let mut codes = Vec::with_capacity(batch.len());
        for vector in batch {
            let row = vector.as_row();
            if row.len() != expected {
                return Err(ClassifierError::InvalidBatch(format!(
                    "row has {} features, model expects {expected}",
                    row.len()
                )));
            }
            codes.push(self.predict_row(row));
        }
        tracing::debug!("Classified batch of {} row(s)", batch.len());
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FEATURE_COUNT, FEATURE_NAMES};
    use tempfile::tempdir;

    fn leaf(class: i64) -> TreeNode {
        TreeNode::Leaf { class }
    }

    fn split(feature: usize, threshold: f64, left: TreeNode, right: TreeNode) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn write_forest(path: &Path, forest: &ExportedForest) {
        let json = serde_json::to_string_pretty(forest).expect("serialize forest");
        std::fs::write(path, json).expect("write forest");
    }

    fn small_forest() -> ExportedForest {
        // Three stumps on the temperature feature (index 11): two vote 1
        // above 100.4F, one always votes 0.
        ExportedForest {
            schema_version: SUPPORTED_SCHEMA_VERSION,
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_NAMES.iter().map(ToString::to_string).collect(),
            trees: vec![
                split(11, 100.4, leaf(0), leaf(1)),
                split(11, 100.4, leaf(0), leaf(1)),
                leaf(0),
            ],
        }
    }

    fn febrile_row() -> FeatureVector {
        FeatureVector::new([
            3.0, 3.0, 2.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 2.0, 1.0, 101.5, 30.0, 1.0,
        ])
    }

    fn afebrile_row() -> FeatureVector {
        FeatureVector::new([
            1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 98.6, 30.0, 2.0,
        ])
    }

    #[test]
    fn test_load_from_directory_and_classify() {
        let temp = tempdir().expect("tempdir");
        write_forest(&temp.path().join("model.json"), &small_forest());

        let classifier = ForestClassifier::load(temp.path()).expect("load model");
        assert_eq!(classifier.feature_count(), FEATURE_COUNT);

        let codes = classifier
            .classify(&[febrile_row(), afebrile_row()])
            .expect("classify batch");
        assert_eq!(codes, vec![1, 0]);
    }

    #[test]
    fn test_load_from_file_path() {
        let temp = tempdir().expect("tempdir");
        let file = temp.path().join("exported.json");
        write_forest(&file, &small_forest());

        let classifier = ForestClassifier::load(&file).expect("load model");
        assert_eq!(classifier.classify(&[febrile_row()]).unwrap(), vec![1]);
    }

    #[test]
    fn test_missing_artifact() {
        let temp = tempdir().expect("tempdir");
        let err = ForestClassifier::load(temp.path()).expect_err("nothing to load");
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn test_corrupt_artifact() {
        let temp = tempdir().expect("tempdir");
        std::fs::write(temp.path().join("model.json"), "not json").expect("write");
        let err = ForestClassifier::load(temp.path()).expect_err("corrupt file");
        assert!(matches!(err, ModelError::Format(_)));
    }

    #[test]
    fn test_unsupported_schema_version() {
        let temp = tempdir().expect("tempdir");
        let mut forest = small_forest();
        forest.schema_version = 2;
        write_forest(&temp.path().join("model.json"), &forest);

        let err = ForestClassifier::load(temp.path()).expect_err("future schema");
        assert!(matches!(
            err,
            ModelError::UnsupportedVersion {
                found: 2,
                supported: SUPPORTED_SCHEMA_VERSION
            }
        ));
    }

    #[test]
    fn test_split_index_out_of_range() {
        let temp = tempdir().expect("tempdir");
        let mut forest = small_forest();
        forest.trees.push(split(FEATURE_COUNT, 1.0, leaf(0), leaf(1)));
        write_forest(&temp.path().join("model.json"), &forest);

        let err = ForestClassifier::load(temp.path()).expect_err("bad index");
        assert!(matches!(err, ModelError::Format(_)));
    }

    #[test]
    fn test_empty_ensemble_rejected() {
        let temp = tempdir().expect("tempdir");
        let mut forest = small_forest();
        forest.trees.clear();
        write_forest(&temp.path().join("model.json"), &forest);

        assert!(matches!(
            ForestClassifier::load(temp.path()),
            Err(ModelError::Format(_))
        ));
    }

    #[test]
    fn test_majority_vote_tie_breaks_to_smallest_code() {
        let classifier = ForestClassifier {
            forest: ExportedForest {
                schema_version: SUPPORTED_SCHEMA_VERSION,
                feature_count: FEATURE_COUNT,
                feature_names: Vec::new(),
                trees: vec![leaf(1), leaf(0)],
            },
        };
        assert_eq!(classifier.classify(&[afebrile_row()]).unwrap(), vec![0]);
    }

    #[test]
    fn test_votes_follow_split_direction() {
        // Boundary row: feature <= threshold goes left.
        let classifier = ForestClassifier {
            forest: ExportedForest {
                schema_version: SUPPORTED_SCHEMA_VERSION,
                feature_count: FEATURE_COUNT,
                feature_names: Vec::new(),
                trees: vec![split(11, 98.6, leaf(0), leaf(1))],
            },
        };
        assert_eq!(classifier.classify(&[afebrile_row()]).unwrap(), vec![0]);
        assert_eq!(classifier.classify(&[febrile_row()]).unwrap(), vec![1]);
    }
}
