pub mod api;
pub mod config;
pub mod validator;

use tracing::{error, info};

use crate::model::recommender::CropRecommender;
use crate::service::config::ServeConfig;

/// Shared, read-only state behind every request.
///
/// `recommender` is `None` when the artifacts could not be loaded at startup;
/// the service then stays up and answers predictions with an error.
#[derive(Debug)]
pub struct AppState {
    pub service_name: String,
    pub recommender: Option<CropRecommender>,
}

impl AppState {
    pub fn new(service_name: impl Into<String>, recommender: Option<CropRecommender>) -> Self {
        AppState {
            service_name: service_name.into(),
            recommender,
        }
    }

    /// Load the artifacts named in `config`, degrading instead of failing.
    pub fn from_config(config: &ServeConfig) -> Self {
        info!(
            model = %config.model_path.display(),
            scaler = %config.scaler_path.display(),
            "loading artifacts"
        );
        let recommender = match CropRecommender::load(&config.model_path, &config.scaler_path) {
            Ok(recommender) => Some(recommender),
            Err(e) => {
                error!(error = %e, "failed to load artifacts, predictions disabled");
                None
            }
        };
        Self::new(config.service_name.clone(), recommender)
    }

    pub fn is_ready(&self) -> bool {
        self.recommender.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifacts_degrade_instead_of_failing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServeConfig {
            model_path: dir.path().join("best_model.bin"),
            scaler_path: dir.path().join("scaler.bin"),
            ..ServeConfig::default()
        };
        let state = AppState::from_config(&config);
        assert!(!state.is_ready());
        assert_eq!(state.service_name, "Crop Recommendation Backend");
    }
}
