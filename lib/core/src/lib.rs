//! # resrec Core
//!
//! Categorical feature normalization and encoding alignment for the resrec
//! restaurant popularity service.
//!
//! This crate turns raw, untrusted form input into the exact feature vector a
//! pre-trained regression model expects:
//!
//! - [`Vocabulary`] - known categories per [`Field`], derived from the fitted encoder
//! - [`resolve_default`] / [`validate`] - deterministic defaults and input correction
//! - [`assemble`] - fixed positional field order for the encoder
//! - [`reconcile`] / [`encode_and_align`] - zero-fill, drop and reorder encoded columns
//! - [`Predictor`] - the whole pipeline bound to an [`Encoder`] and a [`Model`]
//!
//! ## Example
//!
//! ```rust
//! use resrec_core::{reconcile, EncodedVector, ModelSchema};
//!
//! let schema = ModelSchema::new(["City_Delhi", "City_Mumbai", "Cuisine_Italian"]).unwrap();
//! let encoded: EncodedVector = vec![("City_Delhi", 1.0), ("Cuisine_Italian", 1.0)]
//!     .into_iter()
//!     .collect();
//!
//! let reconciled = reconcile(&encoded, &schema).unwrap();
//! assert_eq!(reconciled.vector.as_slice(), &[1.0, 0.0, 1.0]);
//! ```
//!
//! ## Request Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Validator  │────>│  Assembler  │────>│   Encoder   │
//! │ (+defaults) │     │ (row order) │     │ (indicators)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌──────┴──────┐
//!                     │    Model    │<────│  Reconcile  │
//!                     │  (predict)  │     │ (schema)    │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod align;
pub mod capability;
pub mod error;
pub mod field;
pub mod pipeline;
pub mod record;
pub mod resolve;
pub mod vector;
pub mod vocabulary;

pub use align::{encode_and_align, reconcile, ModelSchema, Reconciled};
pub use capability::{CapabilityError, Encoder, Model};
pub use error::{Error, Result};
pub use field::{Field, FALLBACK_DEFAULT, SENTINEL};
pub use pipeline::{Prediction, PredictionRequest, Predictor};
pub use record::{assemble, CategoricalRecord, RecordBuilder, Substitution};
pub use resolve::{check, resolve_default, validate, Validation};
pub use vector::{AlignedVector, EncodedVector};
pub use vocabulary::{build_vocabulary, FieldVocabulary, Vocabulary};
