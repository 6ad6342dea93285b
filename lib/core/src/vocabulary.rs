//! Category vocabulary
//!
//! Built once at startup from the encoder's fitted categories and read-only
//! afterwards. Every field's vocabulary is non-empty and free of the sentinel.

use crate::capability::Encoder;
use crate::field::{Field, SENTINEL};
use crate::resolve::{self, Validation};
use crate::{Error, Result};
use ahash::AHashSet;

/// Known values of one field, in encoder order
#[derive(Debug, Clone)]
pub struct FieldVocabulary {
    field: Field,
    values: Vec<String>,
    members: AHashSet<String>,
}

impl FieldVocabulary {
    /// Stringified, trimmed categories with the sentinel and duplicates removed.
    /// Fails if nothing usable is left.
    pub fn from_categories<I, S>(field: Field, categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Vec::new();
        let mut members = AHashSet::new();

        for category in categories {
            let value = category.as_ref().trim();
            if value.is_empty() || value == SENTINEL {
                continue;
            }
            if members.insert(value.to_string()) {
                values.push(value.to_string());
            }
        }

        if values.is_empty() {
            return Err(Error::Vocabulary {
                field,
                reason: "no categories left after removing the sentinel".to_string(),
            });
        }

        Ok(Self {
            field,
            values,
            members,
        })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.members.contains(value)
    }

    /// Value used when the field is not supplied
    pub fn default_value(&self) -> &str {
        // non-empty by construction
        &self.values[0]
    }

    /// Validate a raw value against this field.
    /// Substitutions are logged so silently corrected predictions can be traced.
    pub fn check(&self, raw: &str) -> Validation {
        let normalized = raw.trim();
        if self.contains(normalized) {
            return Validation {
                value: normalized.to_string(),
                replaced: None,
            };
        }

        let validation = resolve::check(raw, &self.values);
        tracing::warn!(
            field = %self.field,
            raw = %raw,
            substitute = %validation.value,
            "input not in vocabulary, substituting"
        );
        validation
    }
}

/// Vocabulary of every field
#[derive(Debug, Clone)]
pub struct Vocabulary {
    // indexed by Field::position
    fields: Vec<FieldVocabulary>,
}

impl Vocabulary {
    /// Build from a per-field category source.
    /// A field the source knows nothing about is a fatal vocabulary error.
    pub fn from_source<F, I, S>(mut source: F) -> Result<Self>
    where
        F: FnMut(Field) -> Option<I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Vec::with_capacity(Field::COUNT);
        for field in Field::ALL {
            let categories = source(field).ok_or_else(|| Error::Vocabulary {
                field,
                reason: "encoder has no fitted categories for this field".to_string(),
            })?;
            fields.push(FieldVocabulary::from_categories(field, categories)?);
        }
        Ok(Self { fields })
    }

    #[inline]
    pub fn get(&self, field: Field) -> &FieldVocabulary {
        &self.fields[field.position()]
    }

    pub fn values(&self, field: Field) -> &[String] {
        self.get(field).values()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldVocabulary> {
        self.fields.iter()
    }
}

/// Derive the vocabulary from a fitted encoder
pub fn build_vocabulary(encoder: &dyn Encoder) -> Result<Vocabulary> {
    let vocabulary = Vocabulary::from_source(|field| encoder.categories(field))?;
    for entry in vocabulary.iter() {
        tracing::debug!(field = %entry.field(), categories = entry.len(), "vocabulary loaded");
    }
    Ok(vocabulary)
}
