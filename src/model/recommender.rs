use std::path::Path;
use tracing::info;

use crate::data::features::{FeatureVector, FEATURE_COUNT};
use crate::data::preprocessing::{to_matrix, FeatureScaler};
use crate::error::{CropError, Result};
use crate::training::trainer::TrainedModel;
use crate::utils::io::load_artifact;

/// A trained model paired with the scaler it was fitted behind.
///
/// Immutable once built, so one instance can serve any number of readers.
#[derive(Debug)]
pub struct CropRecommender {
    model: TrainedModel,
    scaler: FeatureScaler,
}

impl CropRecommender {
    pub fn new(model: TrainedModel, scaler: FeatureScaler) -> Result<Self> {
        for actual in [scaler.n_features(), model.n_features] {
            if actual != FEATURE_COUNT {
                return Err(CropError::ShapeMismatch {
                    expected: FEATURE_COUNT,
                    actual,
                });
            }
        }
        Ok(CropRecommender { model, scaler })
    }

    /// Read both artifacts written by the training run.
    pub fn load(model_path: &Path, scaler_path: &Path) -> Result<Self> {
        let model: TrainedModel = load_artifact(model_path)?;
        let scaler: FeatureScaler = load_artifact(scaler_path)?;
        info!(
            model = %model.kind(),
            accuracy = model.accuracy,
            classes = model.encoder.n_classes(),
            "artifacts loaded"
        );
        Self::new(model, scaler)
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    /// Scale `input` with the training statistics and return the predicted crop name.
    pub fn recommend(&self, input: &FeatureVector) -> Result<String> {
        let scaled = self.scaler.transform(&to_matrix(&input.to_row()))?;
        let class = self
            .model
            .classifier
            .predict(&scaled)?
            .first()
            .copied()
            .ok_or(CropError::EmptyPrediction)?;
        Ok(self.model.encoder.decode(class)?.to_string())
    }
}
