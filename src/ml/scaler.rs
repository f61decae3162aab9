//! Standard feature scaler.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SahihError};
use crate::ml::FeatureScaler;

/// Column-wise standardization: `(x - mean) / std`.
///
/// Means and deviations come from the training run that produced the
/// classifier bundle. Zero-deviation columns pass through unscaled (the
/// convention the training side's scaler uses).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl StandardScaler {
    /// Create a scaler from trained column statistics.
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Result<Self> {
        if mean.len() != std.len() {
            return Err(SahihError::incomplete_model(format!(
                "scaler mean/std length mismatch: {} vs {}",
                mean.len(),
                std.len()
            )));
        }
        Ok(StandardScaler { mean, std })
    }

    /// An identity scaler of the given dimension, useful for tests.
    pub fn identity(dimension: usize) -> Self {
        StandardScaler {
            mean: vec![0.0; dimension],
            std: vec![1.0; dimension],
        }
    }

    /// Expected input dimension.
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Re-check the mean/std invariant after deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.mean.len() != self.std.len() {
            return Err(SahihError::incomplete_model(format!(
                "scaler mean/std length mismatch: {} vs {}",
                self.mean.len(),
                self.std.len()
            )));
        }
        Ok(())
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.mean.len() {
            return Err(SahihError::invalid_input(format!(
                "scaler expected {} features, got {}",
                self.mean.len(),
                features.len()
            )));
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(x, (mean, std))| {
                if *std == 0.0 {
                    x - mean
                } else {
                    (x - mean) / std
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![1.0, 0.0], vec![2.0, 1.0]).unwrap();
        let out = scaler.transform(&[3.0, 4.0]).unwrap();
        assert_eq!(out, vec![1.0, 4.0]);
    }

    #[test]
    fn test_zero_std_passthrough() {
        let scaler = StandardScaler::new(vec![1.0], vec![0.0]).unwrap();
        assert_eq!(scaler.transform(&[5.0]).unwrap(), vec![4.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let scaler = StandardScaler::identity(2);
        assert!(scaler.transform(&[1.0]).is_err());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(StandardScaler::new(vec![0.0], vec![1.0, 1.0]).is_err());
    }
}
