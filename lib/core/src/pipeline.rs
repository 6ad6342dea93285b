//! Prediction pipeline
//!
//! The [`Predictor`] owns everything loaded at startup and is shared
//! read-only by every request.

use crate::align::{encode_and_align, ModelSchema};
use crate::capability::{Encoder, Model};
use crate::field::Field;
use crate::record::{CategoricalRecord, RecordBuilder, Substitution};
use crate::vocabulary::{build_vocabulary, Vocabulary};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw user input. Either field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionRequest {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
}

impl PredictionRequest {
    pub fn new(city: impl Into<String>, cuisine: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            cuisine: Some(cuisine.into()),
        }
    }
}

/// A scored request
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub score: f64,
    pub record: CategoricalRecord,
    pub substitutions: Vec<Substitution>,
}

/// Vocabulary, encoder and model bound together
pub struct Predictor {
    vocabulary: Vocabulary,
    schema: ModelSchema,
    encoder: Arc<dyn Encoder>,
    model: Arc<dyn Model>,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("vocabulary", &self.vocabulary)
            .field("features", &self.schema.len())
            .finish()
    }
}

impl Predictor {
    /// Check the encoder/model pairing and derive the vocabulary.
    /// Every error returned here is fatal.
    pub fn new(encoder: Arc<dyn Encoder>, model: Arc<dyn Model>) -> Result<Self> {
        let actual = encoder.field_order();
        if actual != Field::ALL {
            return Err(Error::FieldOrder {
                expected: Field::ALL.to_vec(),
                actual,
            });
        }

        let vocabulary = build_vocabulary(encoder.as_ref())?;
        let schema = ModelSchema::new(model.expected_features().iter().cloned())?;

        tracing::info!(
            features = schema.len(),
            cities = vocabulary.get(Field::City).len(),
            cuisines = vocabulary.get(Field::Cuisine).len(),
            "predictor ready"
        );

        Ok(Self {
            vocabulary,
            schema,
            encoder,
            model,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Validate, assemble and encode a request without scoring it
    pub fn prepare(&self, request: &PredictionRequest) -> Result<(CategoricalRecord, Vec<Substitution>)> {
        RecordBuilder::new(&self.vocabulary)
            .set_opt(Field::City, request.city.as_deref())
            .set_opt(Field::Cuisine, request.cuisine.as_deref())
            .build()
    }

    pub fn predict(&self, request: &PredictionRequest) -> Result<Prediction> {
        let (record, substitutions) = self.prepare(request)?;
        let features = encode_and_align(&record, self.encoder.as_ref(), &self.schema)?;

        // The model is the authority on its input width, not the schema snapshot.
        let expected = self.model.expected_features().len();
        if features.dim() != expected {
            return Err(Error::SchemaMismatch {
                expected,
                actual: features.dim(),
            });
        }

        let score = self
            .model
            .predict(&features)
            .map_err(|e| Error::Model(e.to_string()))?;

        Ok(Prediction {
            score,
            record,
            substitutions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityError;
    use crate::vector::{AlignedVector, EncodedVector};
    use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

    /// Dummies-style encoder: one indicator per known value
    struct StubEncoder {
        order: Vec<Field>,
        categories: Vec<Vec<String>>,
    }

    impl StubEncoder {
        fn new() -> Self {
            let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
            Self {
                order: Field::ALL.to_vec(),
                categories: vec![
                    owned(&["0", "Connaught Place"]),
                    owned(&["0", "Block A"]),
                    owned(&["Delhi", "Mumbai", "0"]),
                    owned(&["Italian", "Thai"]),
                ],
            }
        }
    }

    impl Encoder for StubEncoder {
        fn field_order(&self) -> Vec<Field> {
            self.order.clone()
        }

        fn categories(&self, field: Field) -> Option<&[String]> {
            self.categories.get(field.position()).map(Vec::as_slice)
        }

        fn transform(&self, row: &[&str]) -> std::result::Result<EncodedVector, CapabilityError> {
            if row.len() != Field::COUNT {
                return Err(format!("expected {} values, got {}", Field::COUNT, row.len()).into());
            }
            Ok(Field::ALL
                .iter()
                .zip(row)
                .map(|(field, value)| (format!("{}_{}", field, value), 1.0))
                .collect())
        }
    }

    struct SumModel {
        features: Vec<String>,
    }

    impl Model for SumModel {
        fn expected_features(&self) -> &[String] {
            &self.features
        }

        fn predict(&self, features: &AlignedVector) -> std::result::Result<f64, CapabilityError> {
            let weights: Vec<f64> = (1..=features.dim()).map(|w| w as f64).collect();
            features.dot(&weights).ok_or_else(|| "dimension mismatch".into())
        }
    }

    fn predictor() -> Predictor {
        let model = SumModel {
            features: ["City_Delhi", "City_Mumbai", "Cuisine_Italian", "Cuisine_Thai"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };
        Predictor::new(Arc::new(StubEncoder::new()), Arc::new(model)).unwrap()
    }

    #[test]
    fn test_predict_valid_input() {
        let prediction = predictor()
            .predict(&PredictionRequest::new("Mumbai", "Thai"))
            .unwrap();
        // City_Mumbai (2) + Cuisine_Thai (4)
        assert_eq!(prediction.score, 6.0);
        assert!(prediction.substitutions.is_empty());
        assert_eq!(prediction.record.get(Field::Location), "Connaught Place");
    }

    #[test]
    fn test_predict_substitutes_unknown_input() {
        let prediction = predictor()
            .predict(&PredictionRequest::new("Atlantis", "Thai"))
            .unwrap();
        assert_eq!(prediction.record.get(Field::City), "Delhi");
        assert_eq!(prediction.substitutions.len(), 1);
        assert_eq!(prediction.score, 5.0);
    }

    #[test]
    fn test_predict_missing_input_uses_defaults() {
        let prediction = predictor().predict(&PredictionRequest::default()).unwrap();
        assert_eq!(prediction.record.get(Field::City), "Delhi");
        assert_eq!(prediction.record.get(Field::Cuisine), "Italian");
        assert!(prediction.substitutions.is_empty());
    }

    #[test]
    fn test_field_order_mismatch_is_fatal() {
        let mut encoder = StubEncoder::new();
        encoder.order.swap(2, 3);
        let model = SumModel {
            features: vec!["City_Delhi".to_string()],
        };
        let err = Predictor::new(Arc::new(encoder), Arc::new(model)).unwrap_err();
        assert!(matches!(err, Error::FieldOrder { .. }));
        assert!(err.is_fatal());
    }

    /// Reports a wider feature list once the predictor has been built
    struct SkewedModel {
        trained: Vec<String>,
        upgraded: Vec<String>,
        swapped: AtomicBool,
    }

    impl Model for SkewedModel {
        fn expected_features(&self) -> &[String] {
            if self.swapped.load(AtomicOrdering::SeqCst) {
                &self.upgraded
            } else {
                &self.trained
            }
        }

        fn predict(&self, _features: &AlignedVector) -> std::result::Result<f64, CapabilityError> {
            Ok(0.0)
        }
    }

    #[test]
    fn test_model_width_skew_is_schema_mismatch() {
        let trained: Vec<String> = vec!["City_Delhi".to_string(), "Cuisine_Thai".to_string()];
        let mut upgraded = trained.clone();
        upgraded.push("Cuisine_Italian".to_string());
        let model = Arc::new(SkewedModel {
            trained,
            upgraded,
            swapped: AtomicBool::new(false),
        });
        let predictor = Predictor::new(Arc::new(StubEncoder::new()), model.clone()).unwrap();
        model.swapped.store(true, AtomicOrdering::SeqCst);

        let err = predictor
            .predict(&PredictionRequest::new("Delhi", "Thai"))
            .unwrap_err();
        assert_eq!(err, Error::SchemaMismatch { expected: 3, actual: 2 });
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_empty_model_schema_is_fatal() {
        let model = SumModel { features: vec![] };
        let err = Predictor::new(Arc::new(StubEncoder::new()), Arc::new(model)).unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }
}
