//! Model bundle definitions
//!
//! A bundle is the JSON document exported next to a trained model. It carries
//! the fitted encoder categories and the model coefficients together so the
//! two can never drift apart on disk.

use crate::encoder::{EncoderSpec, OneHotEncoder};
use crate::model::{LinearModel, LinearModelSpec};
use resrec_core::{Field, Predictor};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Only bundle version understood by this crate
pub const BUNDLE_VERSION: u32 = 1;

/// Fitted encoder and model exported together
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelBundle {
    /// Bundle format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Fitted one-hot encoder
    pub encoder: EncoderSpec,

    /// Fitted linear model
    pub model: LinearModelSpec,
}

fn default_version() -> u32 {
    BUNDLE_VERSION
}

impl ModelBundle {
    /// Read and parse a bundle file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bundle = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), "model bundle loaded");
        Ok(bundle)
    }

    pub fn from_json(raw: &str) -> Result<Self, ArtifactError> {
        let bundle: Self = serde_json::from_str(raw)?;
        if bundle.version != BUNDLE_VERSION {
            return Err(ArtifactError::UnsupportedVersion(bundle.version));
        }
        Ok(bundle)
    }

    /// Validate and build the encoder and model
    pub fn into_parts(self) -> Result<(OneHotEncoder, LinearModel), ArtifactError> {
        let encoder = OneHotEncoder::from_spec(self.encoder)?;
        let model = LinearModel::from_spec(self.model)?;
        Ok((encoder, model))
    }

    /// Build the request pipeline from this bundle
    pub fn into_predictor(self) -> Result<Predictor, ArtifactError> {
        let (encoder, model) = self.into_parts()?;
        Ok(Predictor::new(Arc::new(encoder), Arc::new(model))?)
    }
}

/// Load a bundle file straight into a predictor
pub fn load_predictor<P: AsRef<Path>>(path: P) -> Result<Predictor, ArtifactError> {
    ModelBundle::from_path(path)?.into_predictor()
}

/// Errors raised while loading artifacts
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed bundle: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported bundle version {0}")]
    UnsupportedVersion(u32),

    #[error("Unknown field '{0}' in encoder")]
    UnknownField(String),

    #[error("Field {0} is declared more than once")]
    DuplicateField(Field),

    #[error("Field {field} has an invalid category: {value}")]
    InvalidCategory { field: Field, value: String },

    #[error("Field {field} lists category '{value}' more than once")]
    DuplicateCategory { field: Field, value: String },

    #[error("Model has {features} features but {coefficients} coefficients")]
    CoefficientMismatch { features: usize, coefficients: usize },

    #[error("Coefficient for '{0}' is not finite")]
    NonFiniteCoefficient(String),

    #[error(transparent)]
    Core(#[from] resrec_core::Error),
}
