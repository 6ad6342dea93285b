use serde::{Deserialize, Serialize};

/// Named indicator columns produced by an encoder for a single row
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EncodedVector {
    columns: Vec<(String, f32)>,
}

impl EncodedVector {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, name: impl Into<String>, value: f32) {
        self.columns.push((name.into(), value));
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Value of a named column, if the encoder produced it
    pub fn get(&self, name: &str) -> Option<f32> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }
}

impl<S: Into<String>> FromIterator<(S, f32)> for EncodedVector {
    fn from_iter<I: IntoIterator<Item = (S, f32)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(name, v)| (name.into(), v)).collect(),
        }
    }
}

/// Feature vector laid out exactly as the model expects
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlignedVector {
    data: Vec<f32>,
}

impl AlignedVector {
    #[inline]
    #[must_use]
    pub(crate) fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Dot product with a weight vector of the same length
    pub fn dot(&self, weights: &[f64]) -> Option<f64> {
        if weights.len() != self.data.len() {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(weights)
                .map(|(x, w)| f64::from(*x) * w)
                .sum(),
        )
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }
}
