use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};
use smartcore::naive_bayes::gaussian::{GaussianNB, GaussianNBParameters};
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters, SplitCriterion,
};
use std::fmt;

use crate::error::{CropError, Result};

type Tree = DecisionTreeClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;
type Forest = RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;
type NaiveBayes = GaussianNB<f64, u32, DenseMatrix<f64>, Vec<u32>>;
type Logistic = LogisticRegression<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// The candidate model families compared during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassifierKind {
    DecisionTree,
    RandomForest,
    GaussianNaiveBayes,
    LogisticRegression,
}

impl ClassifierKind {
    /// Evaluation order. On equal accuracy the earlier kind is kept.
    pub const PRIORITY: [ClassifierKind; 4] = [
        ClassifierKind::DecisionTree,
        ClassifierKind::RandomForest,
        ClassifierKind::GaussianNaiveBayes,
        ClassifierKind::LogisticRegression,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ClassifierKind::DecisionTree => "Decision Tree",
            ClassifierKind::RandomForest => "Random Forest",
            ClassifierKind::GaussianNaiveBayes => "Gaussian Naive Bayes",
            ClassifierKind::LogisticRegression => "Logistic Regression",
        }
    }

    /// Fit this kind with its fixed candidate configuration.
    pub fn fit(&self, x: &DenseMatrix<f64>, y: &Vec<u32>, seed: u64) -> Result<TrainedClassifier> {
        let (n_rows, _) = x.shape();
        if n_rows == 0 {
            return Err(CropError::EmptyDataset("no training rows".to_string()));
        }
        if n_rows != y.len() {
            return Err(CropError::ShapeMismatch {
                expected: n_rows,
                actual: y.len(),
            });
        }

        let model = match self {
            ClassifierKind::DecisionTree => TrainedClassifier::DecisionTree(Tree::fit(
                x,
                y,
                DecisionTreeClassifierParameters {
                    criterion: SplitCriterion::Entropy,
                    max_depth: Some(5),
                    min_samples_leaf: 1,
                    min_samples_split: 2,
                    seed: Some(seed),
                },
            )?),
            ClassifierKind::RandomForest => TrainedClassifier::RandomForest(Forest::fit(
                x,
                y,
                RandomForestClassifierParameters::default()
                    .with_n_trees(20)
                    .with_seed(seed),
            )?),
            ClassifierKind::GaussianNaiveBayes => TrainedClassifier::GaussianNaiveBayes(
                NaiveBayes::fit(x, y, GaussianNBParameters::default())?,
            ),
            // alpha 1.0 is the L2 strength of an inverse regularization C = 1.0
            ClassifierKind::LogisticRegression => TrainedClassifier::LogisticRegression(
                Logistic::fit(x, y, LogisticRegressionParameters::default().with_alpha(1.0))?,
            ),
        };
        Ok(model)
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any fitted candidate, in a form that can be persisted.
#[derive(Serialize, Deserialize)]
pub enum TrainedClassifier {
    DecisionTree(Tree),
    RandomForest(Forest),
    GaussianNaiveBayes(NaiveBayes),
    LogisticRegression(Logistic),
}

impl TrainedClassifier {
    pub fn kind(&self) -> ClassifierKind {
        match self {
            TrainedClassifier::DecisionTree(_) => ClassifierKind::DecisionTree,
            TrainedClassifier::RandomForest(_) => ClassifierKind::RandomForest,
            TrainedClassifier::GaussianNaiveBayes(_) => ClassifierKind::GaussianNaiveBayes,
            TrainedClassifier::LogisticRegression(_) => ClassifierKind::LogisticRegression,
        }
    }

    /// Class index for every row of `x`.
    pub fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<u32>> {
        let predicted = match self {
            TrainedClassifier::DecisionTree(m) => m.predict(x)?,
            TrainedClassifier::RandomForest(m) => m.predict(x)?,
            TrainedClassifier::GaussianNaiveBayes(m) => m.predict(x)?,
            TrainedClassifier::LogisticRegression(m) => m.predict(x)?,
        };
        Ok(predicted)
    }
}

impl fmt::Debug for TrainedClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TrainedClassifier").field(&self.kind()).finish()
    }
}
