use ndarray::Array2;
use csv::Reader;
use serde::{Deserialize, Serialize};
use smartcore::api::{Transformer, UnsupervisedEstimator};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::model_selection;
use smartcore::preprocessing::numerical::{StandardScaler, StandardScalerParameters};
use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::data::features::{FEATURE_COUNT, FEATURE_NAMES};
use crate::error::{CropError, Result};

/// One row of the crop recommendation CSV.
#[derive(Debug, Clone, Deserialize)]
struct CropRecord {
    #[serde(rename = "N")]
    nitrogen: f64,
    #[serde(rename = "P")]
    phosphorus: f64,
    #[serde(rename = "K")]
    potassium: f64,
    temperature: f64,
    humidity: f64,
    ph: f64,
    rainfall: f64,
    label: String,
}

/// Feature matrix plus the crop name of every row.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub features: Array2<f64>,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn new(features: Array2<f64>, labels: Vec<String>) -> Result<Self> {
        if features.ncols() != FEATURE_COUNT {
            return Err(CropError::ShapeMismatch {
                expected: FEATURE_COUNT,
                actual: features.ncols(),
            });
        }
        if features.nrows() != labels.len() {
            return Err(CropError::ShapeMismatch {
                expected: features.nrows(),
                actual: labels.len(),
            });
        }
        Ok(Dataset { features, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn matrix(&self) -> DenseMatrix<f64> {
        to_matrix(&self.features)
    }
}

pub fn load_dataset(csv_path: &Path) -> Result<Dataset> {
    let file = File::open(csv_path)?;
    read_dataset(Reader::from_reader(file))
}

/// Parse a dataset from any CSV source with a `N,P,K,temperature,humidity,ph,rainfall,label` header.
pub fn read_dataset<R: std::io::Read>(mut rdr: Reader<R>) -> Result<Dataset> {
    let mut inputs = Vec::new();
    let mut labels = Vec::new();

    for result in rdr.deserialize() {
        let record: CropRecord = result?;
        inputs.extend_from_slice(&[
            record.nitrogen,
            record.phosphorus,
            record.potassium,
            record.temperature,
            record.humidity,
            record.ph,
            record.rainfall,
        ]);
        labels.push(record.label);
    }

    if labels.is_empty() {
        return Err(CropError::EmptyDataset("no rows in CSV".to_string()));
    }

    let n_values = inputs.len();
    let features = Array2::from_shape_vec((labels.len(), FEATURE_COUNT), inputs)
        .map_err(|_| CropError::ShapeMismatch {
            expected: labels.len() * FEATURE_COUNT,
            actual: n_values,
        })?;
    info!(rows = labels.len(), "dataset loaded");
    Dataset::new(features, labels)
}

/// Row-major copy of `x` in the matrix type the models consume.
pub fn to_matrix(x: &Array2<f64>) -> DenseMatrix<f64> {
    DenseMatrix::new(x.nrows(), x.ncols(), x.iter().copied().collect(), false)
}

/// Train and held-out partitions of encoded rows.
#[derive(Debug)]
pub struct Split {
    pub x_train: DenseMatrix<f64>,
    pub x_test: DenseMatrix<f64>,
    pub y_train: Vec<u32>,
    pub y_test: Vec<u32>,
}

/// Shuffle with `seed` and hold out `floor(n * test_fraction)` rows.
///
/// Both partitions must keep at least one row.
pub fn train_test_split(
    x: &DenseMatrix<f64>,
    y: &[u32],
    test_fraction: f64,
    seed: u64,
) -> Result<Split> {
    let n = y.len();
    let (n_rows, _) = x.shape();
    if n_rows != n {
        return Err(CropError::ShapeMismatch {
            expected: n_rows,
            actual: n,
        });
    }
    let n_test = ((n as f32) * test_fraction as f32) as usize;
    if n_test == 0 || n_test >= n {
        return Err(CropError::EmptyDataset(format!(
            "cannot hold out {} of {} rows",
            test_fraction, n
        )));
    }

    let y = y.to_vec();
    let (x_train, x_test, y_train, y_test) =
        model_selection::train_test_split(x, &y, test_fraction as f32, true, Some(seed));
    debug!(train = y_train.len(), test = y_test.len(), seed, "split dataset");
    Ok(Split {
        x_train,
        x_test,
        y_train,
        y_test,
    })
}

/// Per-feature standardization fitted on training rows.
#[derive(Serialize, Deserialize)]
pub struct FeatureScaler {
    n_features: usize,
    inner: StandardScaler<f64>,
}

impl FeatureScaler {
    /// Learn the mean and standard deviation of every feature column.
    ///
    /// A column that never changes would scale to NaN, so it is rejected.
    pub fn fit(x: &DenseMatrix<f64>) -> Result<Self> {
        let (n_rows, n_cols) = x.shape();
        if n_cols != FEATURE_COUNT {
            return Err(CropError::ShapeMismatch {
                expected: FEATURE_COUNT,
                actual: n_cols,
            });
        }
        if n_rows == 0 {
            return Err(CropError::EmptyDataset("cannot fit scaler on zero rows".to_string()));
        }
        for (j, name) in FEATURE_NAMES.iter().enumerate() {
            let first = *x.get((0, j));
            if (1..n_rows).all(|i| *x.get((i, j)) == first) {
                return Err(CropError::ConstantFeature(name));
            }
        }
        let inner = StandardScaler::fit(x, StandardScalerParameters::default())?;
        Ok(FeatureScaler {
            n_features: n_cols,
            inner,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn transform(&self, x: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        let (_, n_cols) = x.shape();
        if n_cols != self.n_features {
            return Err(CropError::ShapeMismatch {
                expected: self.n_features,
                actual: n_cols,
            });
        }
        Ok(self.inner.transform(x)?)
    }
}

impl fmt::Debug for FeatureScaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureScaler")
            .field("n_features", &self.n_features)
            .finish_non_exhaustive()
    }
}

/// Maps crop names to dense class indices, sorted alphabetically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit(labels: &[String]) -> Self {
        let classes: BTreeSet<&String> = labels.iter().collect();
        LabelEncoder {
            classes: classes.into_iter().cloned().collect(),
        }
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Encode labels; names never seen during `fit` are an error.
    pub fn encode(&self, labels: &[String]) -> Result<Vec<u32>> {
        labels
            .iter()
            .map(|label| {
                self.classes
                    .binary_search(label)
                    .map(|index| index as u32)
                    .map_err(|_| CropError::UnknownClassName(label.clone()))
            })
            .collect()
    }

    pub fn decode(&self, index: u32) -> Result<&str> {
        self.classes
            .get(index as usize)
            .map(String::as_str)
            .ok_or(CropError::UnknownLabel(index))
    }
}
