//! # resrec Artifact
//!
//! Fitted encoder and model artifacts for the resrec pipeline.
//!
//! A trained model is exported as a single JSON bundle holding the one-hot
//! encoder's fitted categories and the regression coefficients. This crate
//! parses and validates the bundle and exposes both parts through the
//! [`resrec_core::Encoder`] and [`resrec_core::Model`] traits.
//!
//! ## Bundle Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "encoder": {
//!     "separator": "_",
//!     "handle_unknown": "error",
//!     "emit": "observed",
//!     "fields": [
//!       {"name": "Location", "categories": ["0", "Connaught Place"]},
//!       {"name": "Locality", "categories": ["0", "Block A"]},
//!       {"name": "City", "categories": ["Delhi", "Mumbai"]},
//!       {"name": "Cuisine", "categories": ["Italian", "Thai"]}
//!     ]
//!   },
//!   "model": {
//!     "intercept": 3.1,
//!     "features": ["City_Delhi", "City_Mumbai", "Cuisine_Italian", "Cuisine_Thai"],
//!     "coefficients": [0.4, 0.2, 0.1, -0.3]
//!   }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use resrec_artifact::load_predictor;
//! use resrec_core::PredictionRequest;
//!
//! let predictor = load_predictor("model.json").unwrap();
//! let prediction = predictor.predict(&PredictionRequest::new("Delhi", "Italian")).unwrap();
//! println!("score: {}", prediction.score);
//! ```

pub mod bundle;
pub mod encoder;
pub mod model;

pub use bundle::{load_predictor, ArtifactError, ModelBundle, BUNDLE_VERSION};
pub use encoder::{Emit, EncoderSpec, FieldSpec, HandleUnknown, OneHotEncoder, DEFAULT_SEPARATOR};
pub use model::{LinearModel, LinearModelSpec};
