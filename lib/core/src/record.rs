//! Feature assembly
//!
//! A [`CategoricalRecord`] holds exactly one value per [`Field`], laid out in
//! the encoder's positional order.

use crate::field::Field;
use crate::resolve::Validation;
use crate::vocabulary::Vocabulary;
use crate::{Error, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One validated value per field, in training-time order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalRecord {
    values: Vec<String>,
}

impl CategoricalRecord {
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.position()]
    }

    /// Positional row as consumed by the encoder
    pub fn as_row(&self) -> Vec<&str> {
        self.values.iter().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.iter().copied().zip(self.values.iter().map(String::as_str))
    }
}

impl Serialize for CategoricalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

/// Order validated values by field position.
///
/// Input order does not matter; a repeated field keeps its last value.
/// Every field must be present.
pub fn assemble<I, S>(values: I) -> Result<CategoricalRecord>
where
    I: IntoIterator<Item = (Field, S)>,
    S: Into<String>,
{
    let mut slots: Vec<Option<String>> = vec![None; Field::COUNT];
    for (field, value) in values {
        slots[field.position()] = Some(value.into());
    }

    let mut ordered = Vec::with_capacity(Field::COUNT);
    for (field, slot) in Field::ALL.iter().zip(slots) {
        match slot {
            Some(value) => ordered.push(value),
            None => {
                return Err(Error::Encoding(format!(
                    "record is missing a value for field {}",
                    field
                )))
            }
        }
    }

    Ok(CategoricalRecord { values: ordered })
}

/// A value replaced during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub field: Field,
    pub raw: String,
    pub value: String,
}

/// Builds a record from raw user input: supplied fields are validated,
/// the rest take the vocabulary default.
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    vocabulary: &'a Vocabulary,
    raw: Vec<Option<String>>,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self {
            vocabulary,
            raw: vec![None; Field::COUNT],
        }
    }

    pub fn set(mut self, field: Field, raw: impl Into<String>) -> Self {
        self.raw[field.position()] = Some(raw.into());
        self
    }

    pub fn set_opt(self, field: Field, raw: Option<impl Into<String>>) -> Self {
        match raw {
            Some(raw) => self.set(field, raw),
            None => self,
        }
    }

    /// Validate and assemble, reporting every substitution made
    pub fn build(self) -> Result<(CategoricalRecord, Vec<Substitution>)> {
        let mut substitutions = Vec::new();
        let mut values = Vec::with_capacity(Field::COUNT);

        for (field, raw) in Field::ALL.iter().copied().zip(self.raw) {
            let vocab = self.vocabulary.get(field);
            let value = match raw {
                Some(raw) => {
                    let Validation { value, replaced } = vocab.check(&raw);
                    if let Some(raw) = replaced {
                        substitutions.push(Substitution {
                            field,
                            raw,
                            value: value.clone(),
                        });
                    }
                    value
                }
                None => vocab.default_value().to_string(),
            };
            values.push((field, value));
        }

        Ok((assemble(values)?, substitutions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vocabulary() -> Vocabulary {
        let mut map: HashMap<Field, Vec<&str>> = HashMap::new();
        map.insert(Field::Location, vec!["0", "Connaught Place"]);
        map.insert(Field::Locality, vec!["0", "Block A"]);
        map.insert(Field::City, vec!["Delhi", "Mumbai", "0"]);
        map.insert(Field::Cuisine, vec!["Italian", "Thai"]);
        Vocabulary::from_source(|f| map.get(&f).cloned()).unwrap()
    }

    #[test]
    fn test_assemble_orders_fields() {
        let shuffled = vec![
            (Field::Cuisine, "Thai"),
            (Field::City, "Delhi"),
            (Field::Location, "Connaught Place"),
            (Field::Locality, "Block A"),
        ];
        let record = assemble(shuffled).unwrap();
        assert_eq!(record.as_row(), vec!["Connaught Place", "Block A", "Delhi", "Thai"]);
    }

    #[test]
    fn test_assemble_from_hashmap_any_order() {
        let mut values = HashMap::new();
        values.insert(Field::City, "Mumbai".to_string());
        values.insert(Field::Cuisine, "Italian".to_string());
        values.insert(Field::Locality, "Block A".to_string());
        values.insert(Field::Location, "Connaught Place".to_string());
        let record = assemble(values).unwrap();
        assert_eq!(record.get(Field::City), "Mumbai");
        assert_eq!(record.as_row()[3], "Italian");
    }

    #[test]
    fn test_assemble_missing_field() {
        let err = assemble(vec![(Field::City, "Delhi")]).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_builder_defaults_unsupplied_fields() {
        let vocab = vocabulary();
        let (record, substitutions) = RecordBuilder::new(&vocab)
            .set(Field::City, "Mumbai")
            .set(Field::Cuisine, "Thai")
            .build()
            .unwrap();
        assert_eq!(record.get(Field::Location), "Connaught Place");
        assert_eq!(record.get(Field::Locality), "Block A");
        assert_eq!(record.get(Field::City), "Mumbai");
        assert!(substitutions.is_empty());
    }

    #[test]
    fn test_builder_reports_substitutions() {
        let vocab = vocabulary();
        let (record, substitutions) = RecordBuilder::new(&vocab)
            .set(Field::City, "Atlantis")
            .set_opt(Field::Cuisine, None::<String>)
            .build()
            .unwrap();
        assert_eq!(record.get(Field::City), "Delhi");
        assert_eq!(record.get(Field::Cuisine), "Italian");
        assert_eq!(
            substitutions,
            vec![Substitution {
                field: Field::City,
                raw: "Atlantis".to_string(),
                value: "Delhi".to_string(),
            }]
        );
    }

    #[test]
    fn test_record_serializes_by_field_name() {
        let record = assemble(vec![
            (Field::Location, "Connaught Place"),
            (Field::Locality, "Block A"),
            (Field::City, "Delhi"),
            (Field::Cuisine, "Thai"),
        ])
        .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["City"], "Delhi");
        assert_eq!(json["Cuisine"], "Thai");
    }
}
