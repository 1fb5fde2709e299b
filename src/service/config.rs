//! YAML configuration for the prediction service.
//!
//! Every key is optional; missing keys fall back to [`ServeConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CropError, Result};

/// Settings for the `crop-serve` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: String,
    /// Trained classifier written by `crop-train`.
    pub model_path: PathBuf,
    /// Fitted scaler written by `crop-train`.
    pub scaler_path: PathBuf,
    /// Name reported by `GET /health`.
    pub service_name: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        ServeConfig {
            listen_addr: "0.0.0.0:5000".to_string(),
            model_path: PathBuf::from("ml_model/best_model.bin"),
            scaler_path: PathBuf::from("ml_model/scaler.bin"),
            service_name: "Crop Recommendation Backend".to_string(),
        }
    }
}

/// Load a [`ServeConfig`] from a YAML file at `path`.
pub fn load_config(path: &Path) -> Result<ServeConfig> {
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| CropError::Config(format!("{}: {}", path.display(), e)))
}
