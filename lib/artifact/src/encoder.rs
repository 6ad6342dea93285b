//! One-hot encoder artifact
//!
//! Replays a fitted one-hot transform: a row of category strings becomes named
//! indicator columns `{Field}{separator}{category}`.

use crate::bundle::ArtifactError;
use ahash::AHashSet;
use resrec_core::{CapabilityError, EncodedVector, Encoder, Field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default separator between field name and category in column names
pub const DEFAULT_SEPARATOR: &str = "_";

/// Serialized form of a fitted encoder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncoderSpec {
    /// Fields in fitted (positional) order
    pub fields: Vec<FieldSpec>,

    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default)]
    pub handle_unknown: HandleUnknown,

    #[serde(default)]
    pub emit: Emit,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Fitted categories of one field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    /// Raw fitted categories; strings, numbers or booleans
    pub categories: Vec<Value>,
}

/// What to do with a value the encoder was not fitted on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Fail the transform
    #[default]
    Error,
    /// Emit no indicator for the field
    Ignore,
}

/// Which indicator columns a transform produces
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Emit {
    /// Only the indicator of the row's own value
    #[default]
    Observed,
    /// One column per fitted category
    All,
}

/// Fitted one-hot encoder
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    fields: Vec<Field>,
    categories: Vec<Vec<String>>,
    known: Vec<AHashSet<String>>,
    separator: String,
    handle_unknown: HandleUnknown,
    emit: Emit,
}

impl OneHotEncoder {
    pub fn from_spec(spec: EncoderSpec) -> Result<Self, ArtifactError> {
        let mut fields: Vec<Field> = Vec::with_capacity(spec.fields.len());
        let mut categories: Vec<Vec<String>> = Vec::with_capacity(spec.fields.len());
        let mut known: Vec<AHashSet<String>> = Vec::with_capacity(spec.fields.len());

        for field_spec in spec.fields {
            let field: Field = field_spec
                .name
                .parse()
                .map_err(|_| ArtifactError::UnknownField(field_spec.name.clone()))?;
            if fields.contains(&field) {
                return Err(ArtifactError::DuplicateField(field));
            }

            let mut values: Vec<String> = Vec::with_capacity(field_spec.categories.len());
            let mut seen: AHashSet<String> = AHashSet::with_capacity(field_spec.categories.len());
            for raw in &field_spec.categories {
                let value = stringify(field, raw)?;
                // `0` and `"0"`, or `"Delhi"` and `" Delhi"`, collapse to one column name.
                if !seen.insert(value.clone()) {
                    return Err(ArtifactError::DuplicateCategory { field, value });
                }
                values.push(value);
            }

            known.push(seen);
            categories.push(values);
            fields.push(field);
        }

        Ok(Self {
            fields,
            categories,
            known,
            separator: spec.separator,
            handle_unknown: spec.handle_unknown,
            emit: spec.emit,
        })
    }

    /// Column name of one indicator
    pub fn column_name(&self, field: Field, category: &str) -> String {
        format!("{}{}{}", field, self.separator, category)
    }

    /// Every column this encoder can produce, in fitted order
    pub fn output_columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .zip(&self.categories)
            .flat_map(|(field, values)| values.iter().map(|v| self.column_name(*field, v)))
            .collect()
    }
}

/// Categories are compared as trimmed strings; JSON numbers keep their text form.
fn stringify(field: Field, value: &Value) -> Result<String, ArtifactError> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            return Err(ArtifactError::InvalidCategory {
                field,
                value: other.to_string(),
            })
        }
    };
    Ok(text)
}

impl Encoder for OneHotEncoder {
    fn field_order(&self) -> Vec<Field> {
        self.fields.clone()
    }

    fn categories(&self, field: Field) -> Option<&[String]> {
        self.fields
            .iter()
            .position(|f| *f == field)
            .map(|idx| self.categories[idx].as_slice())
    }

    fn transform(&self, row: &[&str]) -> Result<EncodedVector, CapabilityError> {
        if row.len() != self.fields.len() {
            return Err(format!(
                "expected a row of {} values, got {}",
                self.fields.len(),
                row.len()
            )
            .into());
        }

        let capacity = match self.emit {
            Emit::Observed => row.len(),
            Emit::All => self.categories.iter().map(Vec::len).sum(),
        };
        let mut encoded = EncodedVector::with_capacity(capacity);

        for (idx, value) in row.iter().enumerate() {
            let field = self.fields[idx];
            let is_known = self.known[idx].contains(*value);

            if !is_known && self.handle_unknown == HandleUnknown::Error {
                return Err(format!("unknown category '{}' for field {}", value, field).into());
            }

            match self.emit {
                Emit::Observed => {
                    if is_known {
                        encoded.push(self.column_name(field, value), 1.0);
                    }
                }
                Emit::All => {
                    for category in &self.categories[idx] {
                        let hot = if category == value { 1.0 } else { 0.0 };
                        encoded.push(self.column_name(field, category), hot);
                    }
                }
            }
        }

        Ok(encoded)
    }
}
