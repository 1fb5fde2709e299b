use serde::{Deserialize, Serialize};
use smartcore::metrics::accuracy;
use tracing::info;

use crate::data::preprocessing::{train_test_split, Dataset, FeatureScaler, LabelEncoder};
use crate::error::{CropError, Result};
use crate::model::classifier::{ClassifierKind, TrainedClassifier};
use crate::training::history::EvaluationHistory;

/// Fitted winner of a training run together with what is needed to decode its output.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainedModel {
    pub classifier: TrainedClassifier,
    pub encoder: LabelEncoder,
    /// Width of the rows the classifier was fitted on.
    pub n_features: usize,
    pub accuracy: f64,
}

impl TrainedModel {
    pub fn kind(&self) -> ClassifierKind {
        self.classifier.kind()
    }
}

#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub test_size: f64,
    pub seed: u64,
    /// Candidates in evaluation order; earlier ones win ties.
    pub candidates: Vec<ClassifierKind>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            test_size: 0.2,
            seed: 42,
            candidates: ClassifierKind::PRIORITY.to_vec(),
        }
    }
}

/// Everything a training run produces.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub model: TrainedModel,
    pub scaler: FeatureScaler,
    pub history: EvaluationHistory,
}

/// Split, scale, fit every candidate and keep the most accurate one.
pub fn train_model(dataset: &Dataset, config: &TrainConfig) -> Result<TrainingOutcome> {
    if dataset.is_empty() {
        return Err(CropError::EmptyDataset("nothing to train on".to_string()));
    }
    if config.candidates.is_empty() {
        return Err(CropError::NoCandidates);
    }

    let encoder = LabelEncoder::fit(&dataset.labels);
    let y = encoder.encode(&dataset.labels)?;
    let split = train_test_split(&dataset.matrix(), &y, config.test_size, config.seed)?;

    // scaler statistics come from the training rows only
    let scaler = FeatureScaler::fit(&split.x_train)?;
    let x_train = scaler.transform(&split.x_train)?;
    let x_test = scaler.transform(&split.x_test)?;

    info!(
        train = split.y_train.len(),
        test = split.y_test.len(),
        classes = encoder.n_classes(),
        "starting candidate training"
    );

    let mut history = EvaluationHistory::default();
    let mut fitted = Vec::with_capacity(config.candidates.len());
    for &kind in &config.candidates {
        let model = kind.fit(&x_train, &split.y_train, config.seed)?;
        let score = accuracy(&split.y_test, &model.predict(&x_test)?);
        info!(model = %kind, accuracy = score, "candidate evaluated");
        history.record(kind, score);
        fitted.push(model);
    }

    let best = history.best().ok_or(CropError::NoCandidates)?;
    let score = history.accuracies[best];
    let classifier = fitted.swap_remove(best);
    info!(model = %classifier.kind(), accuracy = score, "selected best model");

    Ok(TrainingOutcome {
        model: TrainedModel {
            classifier,
            encoder,
            n_features: scaler.n_features(),
            accuracy: score,
        },
        scaler,
        history,
    })
}
