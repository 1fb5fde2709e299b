//! Agronomic reference ranges for a handful of crops.
//!
//! The values are indicative only. The service uses them for an advisory
//! plausibility check that is logged and never alters a prediction.

use crate::data::features::{FeatureVector, FEATURE_NAMES};

/// Inclusive `(min, max)` bounds for each measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRequirements {
    pub nitrogen: (f64, f64),
    pub phosphorus: (f64, f64),
    pub potassium: (f64, f64),
    pub temperature: (f64, f64),
    pub humidity: (f64, f64),
    pub ph: (f64, f64),
    pub rainfall: (f64, f64),
}

pub static CROP_REQUIREMENTS: &[(&str, CropRequirements)] = &[
    (
        "rice",
        CropRequirements {
            nitrogen: (60.0, 100.0),
            phosphorus: (30.0, 60.0),
            potassium: (30.0, 45.0),
            temperature: (20.0, 35.0),
            humidity: (70.0, 100.0),
            ph: (5.0, 7.5),
            // units differ from the dataset's rainfall column
            rainfall: (1000.0, 3000.0),
        },
    ),
    (
        "wheat",
        CropRequirements {
            nitrogen: (40.0, 60.0),
            phosphorus: (20.0, 40.0),
            potassium: (20.0, 30.0),
            temperature: (10.0, 25.0),
            humidity: (50.0, 70.0),
            ph: (6.0, 7.5),
            rainfall: (400.0, 1000.0),
        },
    ),
];

/// Case-insensitive lookup by crop name.
pub fn requirements_for(crop: &str) -> Option<&'static CropRequirements> {
    CROP_REQUIREMENTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(crop))
        .map(|(_, req)| req)
}

impl CropRequirements {
    fn bounds(&self) -> [(f64, f64); 7] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// Names of the features that fall outside this crop's ranges.
    pub fn out_of_range(&self, input: &FeatureVector) -> Vec<&'static str> {
        self.bounds()
            .iter()
            .zip(input.to_array())
            .zip(FEATURE_NAMES)
            .filter(|(((min, max), value), _)| value < min || value > max)
            .map(|(_, name)| name)
            .collect()
    }
}
