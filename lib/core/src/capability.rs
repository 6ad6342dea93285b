//! External capabilities consumed by the pipeline
//!
//! The encoder and the model are fitted elsewhere and treated as opaque,
//! side-effect-free functions of their input. Both are shared across request
//! workers, hence the `Send + Sync` bounds.

use crate::field::Field;
use crate::vector::{AlignedVector, EncodedVector};

/// Error type returned by capability implementations
pub type CapabilityError = Box<dyn std::error::Error + Send + Sync>;

/// A fitted categorical encoder
pub trait Encoder: Send + Sync {
    /// Field order of the raw input row the encoder was fitted with
    fn field_order(&self) -> Vec<Field>;

    /// Fitted categories for a field, in fitted order
    fn categories(&self, field: Field) -> Option<&[String]>;

    /// Encode one positional row into named indicator columns
    fn transform(&self, row: &[&str]) -> Result<EncodedVector, CapabilityError>;
}

/// A fitted regression model
pub trait Model: Send + Sync {
    /// Feature names in training-time order
    fn expected_features(&self) -> &[String];

    /// Score one aligned feature vector
    fn predict(&self, features: &AlignedVector) -> Result<f64, CapabilityError>;
}
