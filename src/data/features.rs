use ndarray::Array2;

/// Column names in the order the models consume them.
pub const FEATURE_NAMES: [&str; 7] = ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

/// One set of soil and weather measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl FeatureVector {
    /// Build from values ordered as in [`FEATURE_NAMES`].
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
        FeatureVector {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
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

    /// Single-row matrix suitable for a scaler or classifier.
    pub fn to_row(&self) -> Array2<f64> {
        let values = self.to_array();
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, j)| values[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_keeps_column_order() {
        let v = FeatureVector::from_array([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]);
        let row = v.to_row();
        assert_eq!(row.shape(), &[1, FEATURE_COUNT]);
        assert_eq!(row[[0, 0]], 90.0);
        assert_eq!(row[[0, 5]], 6.5);
        assert_eq!(row[[0, 6]], 202.9);
    }
}
