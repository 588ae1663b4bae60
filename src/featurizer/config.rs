//! Featurizer configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Row normalization applied after IDF weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    /// Scale every row to unit Euclidean length.
    #[default]
    L2,
    /// Keep raw tf-idf values.
    None,
}

/// Options controlling how utterances are turned into features.
///
/// The configuration is fixed at construction time and serialized with the
/// fitted featurizer so that a restored instance featurizes identically.
///
/// # Examples
///
/// ```
/// use intent_featurizer::featurizer::config::{FeaturizerConfig, Norm};
///
/// let config = FeaturizerConfig::default()
///     .with_sublinear_tf(true)
///     .with_word_clusters_name("brown_clusters");
///
/// assert_eq!(config.norm, Norm::L2);
/// assert!(config.use_stemming);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturizerConfig {
    /// Use `1 + ln(tf)` instead of the raw term count.
    pub sublinear_tf: bool,
    /// Row normalization of the tf-idf matrix.
    pub norm: Norm,
    /// Stem normalized tokens when a stemmer exists for the language.
    pub use_stemming: bool,
    /// Word cluster table used for cluster features, if any.
    pub word_clusters_name: Option<String>,
}

impl Default for FeaturizerConfig {
    fn default() -> Self {
        Self {
            sublinear_tf: false,
            norm: Norm::L2,
            use_stemming: true,
            word_clusters_name: None,
        }
    }
}

impl FeaturizerConfig {
    /// Set sublinear term frequency scaling.
    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    /// Set row normalization.
    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    /// Enable or disable stemming.
    pub fn with_stemming(mut self, use_stemming: bool) -> Self {
        self.use_stemming = use_stemming;
        self
    }

    /// Use the named word cluster table for cluster features.
    pub fn with_word_clusters_name<S: Into<String>>(mut self, name: S) -> Self {
        self.word_clusters_name = Some(name.into());
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
