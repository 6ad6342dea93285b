//! # resrec
//!
//! Restaurant popularity predictions from a pre-trained regression model,
//! driven by the city and cuisine a user picks in a web form.
//!
//! The interesting part is between the form and the model: raw input is
//! checked against the categories the encoder was fitted on, missing fields
//! get deterministic defaults, and the encoded row is reordered and
//! zero-filled to exactly the feature layout the model was trained with.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! resrec --artifact model.json --dataset restaurants.csv --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use resrec::prelude::*;
//!
//! let predictor = load_predictor("model.json").unwrap();
//! let prediction = predictor
//!     .predict(&PredictionRequest::new("Delhi", "Italian"))
//!     .unwrap();
//! println!("score = {}", prediction.score);
//! for substitution in &prediction.substitutions {
//!     println!("{} '{}' replaced by '{}'", substitution.field, substitution.raw, substitution.value);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `resrec-core` - Field, Vocabulary, validation, assembly and schema alignment
//! - `resrec-artifact` - JSON model bundle: one-hot encoder and linear model
//! - `resrec-catalog` - restaurant CSV dataset and top-N recommendations
//! - `resrec-api` - actix-web REST endpoints

// Re-export core types
pub use resrec_core::{
    assemble, encode_and_align, reconcile, resolve_default, validate,
    AlignedVector, CategoricalRecord, EncodedVector, Encoder, Error, Field, Model, ModelSchema,
    Prediction, PredictionRequest, Predictor, Result, Vocabulary,
};

// Re-export artifacts
pub use resrec_artifact::{load_predictor, ArtifactError, LinearModel, ModelBundle, OneHotEncoder};

// Re-export catalog
pub use resrec_catalog::{Catalog, Restaurant};

// Re-export API
pub use resrec_api::{ApiConfig, AppState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_predictor, ApiConfig, AppState, Catalog, Error, Field, ModelBundle, Prediction,
        PredictionRequest, Predictor, RestApi, Result,
    };
}
