//! Categorical fields the model was trained on
//!
//! The encoder is positional on its raw input row, so the declaration order
//! of [`Field`] is the training-time column order and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Literal meaning "unset". Never a valid category.
pub const SENTINEL: &str = "0";

/// Value served when a field has no usable category at all.
pub const FALLBACK_DEFAULT: &str = "Unknown";

/// A categorical input dimension of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Location,
    Locality,
    City,
    Cuisine,
}

impl Field {
    /// Number of fields in a record
    pub const COUNT: usize = 4;

    /// All fields in the order the encoder was fitted with
    pub const ALL: [Field; Field::COUNT] = [
        Field::Location,
        Field::Locality,
        Field::City,
        Field::Cuisine,
    ];

    /// Position of this field in the encoder's input row
    #[inline]
    pub fn position(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Field::Location => "Location",
            Field::Locality => "Locality",
            Field::City => "City",
            Field::Cuisine => "Cuisine",
        }
    }

    /// Whether the web form exposes this field.
    /// Fields that are not user-supplied always take the resolved default.
    pub fn is_user_supplied(self) -> bool {
        matches!(self, Field::City | Field::Cuisine)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| crate::Error::UnknownField(s.to_string()))
    }
}
