//! Fitted binary classifiers
//!
//! The rain model is a decision tree persisted in the flat array layout of a
//! fitted tree: node `i` is a leaf when `children_left[i] == -1`; otherwise
//! samples with `x[feature[i]] <= threshold[i]` go to `children_left[i]`.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::models::RainPrediction;
use crate::types::FeatureRow;

const LEAF: i64 = -1;

/// Label plus the class distribution of the leaf that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifierOutput {
    pub label: i64,
    /// Normalized class weights, aligned with the classifier's `classes`
    pub probabilities: Vec<f64>,
}

/// Contract of a fitted classifier
pub trait Classifier {
    /// Columns the classifier was fitted on, in order
    fn declared_fields(&self) -> &[String];

    /// Class labels, in the order of `ClassifierOutput::probabilities`
    fn classes(&self) -> &[i64];

    fn predict_row(&self, row: &FeatureRow) -> Result<ClassifierOutput, PipelineError>;

    /// Predict and map the label onto the rain outcome
    fn predict_rain(&self, row: &FeatureRow) -> Result<RainPrediction, PipelineError> {
        let output = self.predict_row(row)?;
        RainPrediction::try_from(output.label)
    }
}

/// Arrays of a fitted tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights, one row per node
    pub value: Vec<Vec<f64>>,
    /// Direction taken by NaN at each split; absent means NaN goes right
    #[serde(default)]
    pub missing_go_to_left: Option<Vec<bool>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    pub feature_names_in: Vec<String>,
    pub classes: Vec<i64>,
    pub tree: TreeArrays,
}

impl DecisionTreeClassifier {
    pub(crate) fn check(&self) -> Result<(), String> {
        let tree = &self.tree;
        let n = tree.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        let lengths = [
            tree.children_right.len(),
            tree.feature.len(),
            tree.threshold.len(),
            tree.value.len(),
        ];
        if lengths.iter().any(|len| *len != n) {
            return Err("tree arrays have inconsistent lengths".to_string());
        }
        if let Some(missing) = &tree.missing_go_to_left {
            if missing.len() != n {
                return Err("missing_go_to_left has the wrong length".to_string());
            }
        }
        for node in 0..n {
            if tree.value[node].len() != self.classes.len() {
                return Err(format!("node {} has the wrong number of class weights", node));
            }
            let (left, right) = (tree.children_left[node], tree.children_right[node]);
            if left == LEAF {
                continue;
            }
            // children are always stored after their parent
            let in_range = |child: i64| child > node as i64 && (child as usize) < n;
            if !in_range(left) || !in_range(right) {
                return Err(format!("node {} has out-of-range children", node));
            }
            let feature = tree.feature[node];
            if feature < 0 || feature as usize >= self.feature_names_in.len() {
                return Err(format!("node {} splits on unknown feature {}", node, feature));
            }
        }
        Ok(())
    }

    /// Feature vector in fit order, rejecting columns the tree never saw
    fn features(&self, row: &FeatureRow) -> Result<Vec<f64>, PipelineError> {
        if let Some(extra) = row
            .names()
            .find(|name| !self.feature_names_in.iter().any(|known| known == name))
        {
            return Err(PipelineError::UnexpectedFeature(extra.to_string()));
        }
        self.feature_names_in
            .iter()
            .map(|name| row.number(name))
            .collect()
    }

    fn leaf(&self, x: &[f64]) -> usize {
        let tree = &self.tree;
        let mut node = 0usize;
        while tree.children_left[node] != LEAF {
            let value = x[tree.feature[node] as usize];
            let go_left = if value.is_nan() {
                tree.missing_go_to_left
                    .as_ref()
                    .map(|missing| missing[node])
                    .unwrap_or(false)
            } else {
                // thresholds were fitted against single-precision inputs
                (value as f32 as f64) <= tree.threshold[node]
            };
            let next = if go_left {
                tree.children_left[node]
            } else {
                tree.children_right[node]
            };
            node = next as usize;
        }
        node
    }
}

impl Classifier for DecisionTreeClassifier {
    fn declared_fields(&self) -> &[String] {
        &self.feature_names_in
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_row(&self, row: &FeatureRow) -> Result<ClassifierOutput, PipelineError> {
        let x = self.features(row)?;
        let weights = &self.tree.value[self.leaf(&x)];

        let mut best = 0;
        for (i, weight) in weights.iter().enumerate() {
            if *weight > weights[best] {
                best = i;
            }
        }

        let total: f64 = weights.iter().sum();
        let probabilities = if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![0.0; weights.len()]
        };

        Ok(ClassifierOutput {
            label: self.classes[best],
            probabilities,
        })
    }
}

/// A persisted classifier, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    DecisionTreeClassifier(DecisionTreeClassifier),
}

impl ClassifierArtifact {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ClassifierArtifact::DecisionTreeClassifier(_) => "decision_tree_classifier",
        }
    }

    pub fn check(&self) -> Result<(), String> {
        match self {
            ClassifierArtifact::DecisionTreeClassifier(tree) => tree.check(),
        }
    }
}

impl Classifier for ClassifierArtifact {
    fn declared_fields(&self) -> &[String] {
        match self {
            ClassifierArtifact::DecisionTreeClassifier(tree) => tree.declared_fields(),
        }
    }

    fn classes(&self) -> &[i64] {
        match self {
            ClassifierArtifact::DecisionTreeClassifier(tree) => tree.classes(),
        }
    }

    fn predict_row(&self, row: &FeatureRow) -> Result<ClassifierOutput, PipelineError> {
        match self {
            ClassifierArtifact::DecisionTreeClassifier(tree) => tree.predict_row(row),
        }
    }
}
