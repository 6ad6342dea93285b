//! Encoding and schema alignment
//!
//! Regression and tree models index features positionally, so a misordered
//! vector yields a wrong score rather than an error. Everything fed to the
//! model goes through [`reconcile`], which lays encoded columns out exactly in
//! the model's training-time order.

use crate::capability::Encoder;
use crate::record::CategoricalRecord;
use crate::vector::{AlignedVector, EncodedVector};
use crate::{Error, Result};
use ahash::{AHashMap, AHashSet};

/// Feature columns the model was trained on, in order
#[derive(Debug, Clone)]
pub struct ModelSchema {
    columns: Vec<String>,
    index: AHashMap<String, usize>,
}

impl ModelSchema {
    /// Fails on an empty column list or a repeated column name
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(Error::InvalidSchema("model expects no features".to_string()));
        }

        let mut index = AHashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if index.insert(column.clone(), position).is_some() {
                return Err(Error::InvalidSchema(format!(
                    "feature '{}' appears more than once",
                    column
                )));
            }
        }

        Ok(Self { columns, index })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }
}

/// Outcome of aligning one encoded row
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub vector: AlignedVector,
    /// Expected columns the encoder did not produce (zero-filled)
    pub missing: Vec<String>,
    /// Encoded columns the model was not trained on (excluded)
    pub dropped: Vec<String>,
}

/// Lay an encoded row out in schema order.
///
/// Expected columns absent from `encoded` are zero-filled and encoded columns
/// absent from the schema are dropped. A column name produced twice by the
/// encoder is an encoding error.
pub fn reconcile(encoded: &EncodedVector, schema: &ModelSchema) -> Result<Reconciled> {
    let mut data = vec![0.0f32; schema.len()];
    let mut seen = AHashSet::with_capacity(encoded.len());
    let mut dropped = Vec::new();

    for (name, value) in encoded.iter() {
        if !seen.insert(name) {
            return Err(Error::Encoding(format!(
                "encoder produced column '{}' more than once",
                name
            )));
        }
        match schema.position(name) {
            Some(position) => data[position] = value,
            None => dropped.push(name.to_string()),
        }
    }

    let missing = schema
        .columns()
        .iter()
        .filter(|column| !seen.contains(column.as_str()))
        .cloned()
        .collect();

    Ok(Reconciled {
        vector: AlignedVector::new(data),
        missing,
        dropped,
    })
}

/// Encode a record and align it to the model schema.
///
/// Encoder failures are reported as [`Error::Encoding`] and never retried.
pub fn encode_and_align(
    record: &CategoricalRecord,
    encoder: &dyn Encoder,
    schema: &ModelSchema,
) -> Result<AlignedVector> {
    let encoded = encoder
        .transform(&record.as_row())
        .map_err(|e| Error::Encoding(e.to_string()))?;

    let reconciled = reconcile(&encoded, schema)?;
    if !reconciled.dropped.is_empty() {
        tracing::debug!(dropped = ?reconciled.dropped, "encoded columns unknown to the model were dropped");
    }
    tracing::trace!(
        zero_filled = reconciled.missing.len(),
        features = reconciled.vector.dim(),
        "feature vector aligned"
    );

    Ok(reconciled.vector)
}
