//! Linear regression artifact

use crate::bundle::ArtifactError;
use resrec_core::{AlignedVector, CapabilityError, Model};
use serde::{Deserialize, Serialize};

/// Serialized form of a fitted linear model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearModelSpec {
    #[serde(default)]
    pub intercept: f64,
    /// Feature names in training-time order
    pub features: Vec<String>,
    /// One coefficient per feature
    pub coefficients: Vec<f64>,
}

/// `intercept + sum(coefficient * feature)`
#[derive(Debug, Clone)]
pub struct LinearModel {
    features: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn from_spec(spec: LinearModelSpec) -> Result<Self, ArtifactError> {
        if spec.features.len() != spec.coefficients.len() {
            return Err(ArtifactError::CoefficientMismatch {
                features: spec.features.len(),
                coefficients: spec.coefficients.len(),
            });
        }
        if !spec.intercept.is_finite() {
            return Err(ArtifactError::NonFiniteCoefficient("intercept".to_string()));
        }
        if let Some((name, _)) = spec
            .features
            .iter()
            .zip(&spec.coefficients)
            .find(|(_, c)| !c.is_finite())
        {
            return Err(ArtifactError::NonFiniteCoefficient(name.clone()));
        }

        Ok(Self {
            features: spec.features,
            coefficients: spec.coefficients,
            intercept: spec.intercept,
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl Model for LinearModel {
    fn expected_features(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, features: &AlignedVector) -> Result<f64, CapabilityError> {
        let weighted = features.dot(&self.coefficients).ok_or_else(|| {
            format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.dim()
            )
        })?;
        Ok(self.intercept + weighted)
    }
}
