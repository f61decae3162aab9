//! Soft-voting ensemble classifier.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SahihError};
use crate::ml::{CLASS_FAKE, CLASS_REAL, Classifier};

/// One trained linear member of the ensemble.
///
/// Produces `sigmoid(weights . input + bias)` as its fake-class probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearMember {
    /// Per-column weights over the combined (sparse ++ scaled dense) input.
    pub weights: Vec<f64>,
    /// Intercept.
    pub bias: f64,
}

impl LinearMember {
    fn fake_probability(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.weights.len() {
            return Err(SahihError::classifier(format!(
                "ensemble member expected {} inputs, got {}",
                self.weights.len(),
                input.len()
            )));
        }

        let z: f64 = self
            .weights
            .iter()
            .zip(input.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;

        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

/// Soft-voting ensemble over linear members.
///
/// The fake-class probability is the mean of the members' probabilities;
/// the predicted label is the argmax of `[p_real, p_fake]`. Member weights
/// are trained externally and arrive via the model bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftVotingEnsemble {
    members: Vec<LinearMember>,
}

impl SoftVotingEnsemble {
    /// Create an ensemble from trained members.
    pub fn new(members: Vec<LinearMember>) -> Result<Self> {
        if members.is_empty() {
            return Err(SahihError::incomplete_model("ensemble has no members"));
        }
        let dim = members[0].weights.len();
        if members.iter().any(|m| m.weights.len() != dim) {
            return Err(SahihError::incomplete_model(
                "ensemble members disagree on input dimension",
            ));
        }
        Ok(SoftVotingEnsemble { members })
    }

    /// Expected input dimension.
    pub fn dimension(&self) -> usize {
        self.members.first().map_or(0, |m| m.weights.len())
    }

    /// Re-check the member invariants after deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.members.is_empty() {
            return Err(SahihError::incomplete_model("ensemble has no members"));
        }
        let dim = self.members[0].weights.len();
        if self.members.iter().any(|m| m.weights.len() != dim) {
            return Err(SahihError::incomplete_model(
                "ensemble members disagree on input dimension",
            ));
        }
        Ok(())
    }
}

impl Classifier for SoftVotingEnsemble {
    fn predict(&self, input: &[f64]) -> Result<usize> {
        let proba = self.predict_proba(input)?;
        Ok(if proba[CLASS_FAKE] >= proba[CLASS_REAL] {
            CLASS_FAKE
        } else {
            CLASS_REAL
        })
    }

    fn predict_proba(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut fake = 0.0;
        for member in &self.members {
            fake += member.fake_probability(input)?;
        }
        fake /= self.members.len() as f64;

        Ok(vec![1.0 - fake, fake])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ensemble() -> SoftVotingEnsemble {
        SoftVotingEnsemble::new(vec![
            LinearMember {
                weights: vec![2.0, 0.0],
                bias: -1.0,
            },
            LinearMember {
                weights: vec![0.0, -2.0],
                bias: 1.0,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let proba = ensemble().predict_proba(&[0.5, 0.5]).unwrap();
        assert_eq!(proba.len(), 2);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_predict_matches_argmax() {
        let e = ensemble();
        let input = [3.0, -3.0];
        let proba = e.predict_proba(&input).unwrap();
        let label = e.predict(&input).unwrap();
        assert_eq!(label == CLASS_FAKE, proba[CLASS_FAKE] >= proba[CLASS_REAL]);
    }

    #[test]
    fn test_dimension_mismatch() {
        assert!(ensemble().predict_proba(&[1.0]).is_err());
    }

    #[test]
    fn test_empty_ensemble_rejected() {
        assert!(SoftVotingEnsemble::new(vec![]).is_err());
    }

    #[test]
    fn test_mismatched_members_rejected() {
        let members = vec![
            LinearMember {
                weights: vec![1.0],
                bias: 0.0,
            },
            LinearMember {
                weights: vec![1.0, 2.0],
                bias: 0.0,
            },
        ];
        assert!(SoftVotingEnsemble::new(members).is_err());
    }
}
