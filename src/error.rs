//! Error type shared by the training pipeline and the artifact loader.

use thiserror::Error;

/// Errors raised while loading data, fitting models or handling artifacts.
#[derive(Error, Debug)]
pub enum CropError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("artifact serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("dataset download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("dataset download from {url} returned status {status}")]
    DownloadStatus { url: String, status: u16 },

    /// The dataset, or a split of it, has no rows.
    #[error("dataset is empty: {0}")]
    EmptyDataset(String),

    #[error("shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("label '{0}' was not seen during training")]
    UnknownClassName(String),

    #[error("class index {0} has no label")]
    UnknownLabel(u32),

    /// A model or scaler rejected its input.
    #[error("model error: {0}")]
    Model(String),

    #[error("feature '{0}' is constant in the training rows")]
    ConstantFeature(&'static str),

    #[error("classifier returned no prediction")]
    EmptyPrediction,

    #[error("no candidate classifiers were evaluated")]
    NoCandidates,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("plotting failed: {0}")]
    Plot(String),
}

impl From<smartcore::error::Failed> for CropError {
    fn from(err: smartcore::error::Failed) -> Self {
        CropError::Model(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CropError>;

#[cfg(test)]
mod tests {
    use super::*;
    use smartcore::error::Failed;

    #[test]
    fn model_failures_keep_their_message() {
        let err: CropError = Failed::fit("singular matrix").into();
        assert!(matches!(&err, CropError::Model(msg) if msg.contains("singular matrix")));
    }

    #[test]
    fn empty_prediction_has_its_own_variant() {
        let err = CropError::EmptyPrediction;
        assert_eq!(err.to_string(), "classifier returned no prediction");
        assert!(!matches!(err, CropError::EmptyDataset(_)));
    }
}
