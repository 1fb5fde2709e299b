//! Crop recommendation from soil and weather measurements.
//!
//! The crate has two halves that only meet through artifact files:
//! [`training`] fits candidate classifiers on a labelled CSV and keeps the
//! most accurate one, and [`service`] loads the result once and answers
//! `POST /predict` requests over HTTP.

pub mod data;
pub mod error;
pub mod model;
pub mod service;
pub mod training;
pub mod utils;

pub use data::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use error::{CropError, Result};
pub use model::classifier::{ClassifierKind, TrainedClassifier};
pub use model::recommender::CropRecommender;
pub use training::trainer::{train_model, TrainConfig, TrainedModel, TrainingOutcome};
