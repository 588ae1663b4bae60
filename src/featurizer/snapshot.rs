//! Plain-data export of a featurizer's fitted state.
//!
//! A snapshot carries everything needed to featurize identically without
//! fitting again: the vocabulary and IDF weights, the selected columns, the
//! entity lexicon and the scalar settings. An untrained featurizer exports
//! null vocabulary, IDF and selection.
//!
//! ```json
//! {
//!   "language": "en",
//!   "config": {"sublinear_tf": false, "norm": "l2", "use_stemming": true, "word_clusters_name": null},
//!   "vectorizer": {"vocabulary": {"book": 0, "flight": 1}, "idf": [1.51, 1.92]},
//!   "selected_indices": [0, 1],
//!   "pvalue_threshold": 0.4,
//!   "entity_lexicon": {"the offic": ["entityfeaturethe_office"]},
//!   "unknown_token_replacement": null
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FeaturizerError, Result};
use crate::featurizer::config::FeaturizerConfig;
use crate::language::Language;

const SNAPSHOT_KEYS: [&str; 7] = [
    "language",
    "config",
    "vectorizer",
    "selected_indices",
    "pvalue_threshold",
    "entity_lexicon",
    "unknown_token_replacement",
];

const VECTORIZER_KEYS: [&str; 2] = ["vocabulary", "idf"];

/// Vocabulary and IDF weights, both null when untrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorizerSnapshot {
    pub vocabulary: Option<BTreeMap<String, usize>>,
    pub idf: Option<Vec<f64>>,
}

/// Serializable state of a [`Featurizer`](crate::featurizer::Featurizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturizerSnapshot {
    pub language: Language,
    pub config: FeaturizerConfig,
    pub vectorizer: VectorizerSnapshot,
    pub selected_indices: Option<Vec<usize>>,
    pub pvalue_threshold: f64,
    pub entity_lexicon: BTreeMap<String, Vec<String>>,
    pub unknown_token_replacement: Option<String>,
}

impl FeaturizerSnapshot {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot from JSON.
    ///
    /// Every key must be present, including the nullable ones.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Convert a parsed JSON value into a snapshot.
    pub fn from_value(value: Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| FeaturizerError::malformed_snapshot("snapshot is not a JSON object"))?;
        if let Some(key) = SNAPSHOT_KEYS.iter().find(|key| !object.contains_key(**key)) {
            return Err(FeaturizerError::malformed_snapshot(format!(
                "missing key '{key}'"
            )));
        }

        let vectorizer = object["vectorizer"].as_object().ok_or_else(|| {
            FeaturizerError::malformed_snapshot("'vectorizer' is not a JSON object")
        })?;
        if let Some(key) = VECTORIZER_KEYS
            .iter()
            .find(|key| !vectorizer.contains_key(**key))
        {
            return Err(FeaturizerError::malformed_snapshot(format!(
                "missing key 'vectorizer.{key}'"
            )));
        }

        serde_json::from_value(value)
            .map_err(|error| FeaturizerError::malformed_snapshot(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted_snapshot() -> FeaturizerSnapshot {
        FeaturizerSnapshot {
            language: Language::En,
            config: FeaturizerConfig::default(),
            vectorizer: VectorizerSnapshot {
                vocabulary: Some(BTreeMap::from([
                    ("book".to_string(), 0),
                    ("flight".to_string(), 1),
                ])),
                idf: Some(vec![1.510_825_623_765_990_7, 0.1 + 0.2]),
            },
            selected_indices: Some(vec![1]),
            pvalue_threshold: 0.4,
            entity_lexicon: BTreeMap::from([(
                "the offic".to_string(),
                vec!["entityfeaturethe_office".to_string()],
            )]),
            unknown_token_replacement: Some("unk".to_string()),
        }
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let snapshot = fitted_snapshot();
        let restored = FeaturizerSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_untrained_snapshot_serializes_nulls() {
        let snapshot = FeaturizerSnapshot {
            vectorizer: VectorizerSnapshot::default(),
            selected_indices: None,
            entity_lexicon: BTreeMap::new(),
            ..fitted_snapshot()
        };
        let value: Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert!(value["vectorizer"]["vocabulary"].is_null());
        assert!(value["vectorizer"]["idf"].is_null());
        assert!(value["selected_indices"].is_null());
    }

    #[test]
    fn test_missing_nullable_key_is_malformed() {
        let mut value = serde_json::to_value(fitted_snapshot()).unwrap();
        value
            .as_object_mut()
            .unwrap()
            .remove("unknown_token_replacement");
        let result = FeaturizerSnapshot::from_value(value);
        assert!(matches!(result, Err(FeaturizerError::MalformedSnapshot(_))));
    }

    #[test]
    fn test_missing_vectorizer_key_is_malformed() {
        let mut value = serde_json::to_value(fitted_snapshot()).unwrap();
        value["vectorizer"].as_object_mut().unwrap().remove("idf");
        let result = FeaturizerSnapshot::from_value(value);
        assert!(matches!(result, Err(FeaturizerError::MalformedSnapshot(_))));
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let mut value = serde_json::to_value(fitted_snapshot()).unwrap();
        value["pvalue_threshold"] = Value::String("high".to_string());
        assert!(matches!(
            FeaturizerSnapshot::from_value(value),
            Err(FeaturizerError::MalformedSnapshot(_))
        ));
        assert!(matches!(
            FeaturizerSnapshot::from_json("[1, 2]"),
            Err(FeaturizerError::MalformedSnapshot(_))
        ));
    }
}
