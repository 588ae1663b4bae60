//! Language resources consumed by the featurizer.
//!
//! The featurizer never tokenizes, stems or looks up stop words itself; it
//! goes through the [`LanguageResources`] trait. [`BuiltinResources`] is the
//! default implementation, backed by the primitives in
//! [`analysis`](crate::analysis). Word cluster tables are registered on it
//! explicitly since they are large, corpus-derived assets.
//!
//! # Examples
//!
//! ```
//! use intent_featurizer::analysis::word_clusters::WordClusters;
//! use intent_featurizer::language::Language;
//! use intent_featurizer::resources::{BuiltinResources, LanguageResources};
//!
//! let clusters: WordClusters = [("paris", "0110")].into_iter().collect();
//! let resources = BuiltinResources::new()
//!     .unwrap()
//!     .with_word_clusters(Language::En, "brown_clusters", clusters);
//!
//! assert_eq!(resources.tokenize("Let's go!", Language::En), vec!["Let", "s", "go"]);
//! assert_eq!(resources.stem("offices", Language::En).unwrap(), "offic");
//! assert!(resources.stem("offices", Language::Ko).is_err());
//! assert!(resources.word_clusters(Language::En, "brown_clusters").is_ok());
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::normalizer;
use crate::analysis::stemmer::stemmer_for;
use crate::analysis::stop_words::stop_words;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::word_clusters::WordClusters;
use crate::error::{FeaturizerError, Result};
use crate::language::Language;

/// Prefix of builtin entity names (dates, numbers, ...) in datasets.
pub const BUILTIN_ENTITY_PREFIX: &str = "builtin/";

/// External language resources used by the featurizer.
///
/// Implementations must be pure: the same input always yields the same
/// output, which is what makes a fitted featurizer reproducible.
pub trait LanguageResources: Send + Sync {
    /// Split text into light tokens.
    fn tokenize(&self, text: &str, language: Language) -> Vec<String>;

    /// Language-agnostic normalization (case and diacritic folding).
    fn normalize(&self, text: &str) -> String;

    /// Stem text. Fails with [`FeaturizerError::ResourceUnavailable`] when
    /// there is no stemmer for the language.
    fn stem(&self, text: &str, language: Language) -> Result<String>;

    /// Stop words of the language.
    fn stop_words(&self, language: Language) -> &HashSet<String>;

    /// Word cluster table `cluster_name` for the language. Fails with
    /// [`FeaturizerError::ResourceUnavailable`] when it is not registered.
    fn word_clusters(&self, language: Language, cluster_name: &str) -> Result<Arc<WordClusters>>;

    /// Whether an entity name designates a builtin entity.
    fn is_builtin_entity(&self, entity_name: &str) -> bool;

    /// Get the name of these resources (for debugging).
    fn name(&self) -> &str;
}

/// Default resources: `\w+` tokenizer, Unicode folding, Porter stemming for
/// English and registered word cluster tables.
#[derive(Clone, Debug)]
pub struct BuiltinResources {
    tokenizer: RegexTokenizer,
    word_clusters: AHashMap<(Language, String), Arc<WordClusters>>,
}

impl BuiltinResources {
    /// Create resources without any word cluster table.
    pub fn new() -> Result<Self> {
        Ok(BuiltinResources {
            tokenizer: RegexTokenizer::new()?,
            word_clusters: AHashMap::new(),
        })
    }

    /// Register a word cluster table under a name for a language.
    pub fn with_word_clusters<S: Into<String>>(
        mut self,
        language: Language,
        cluster_name: S,
        clusters: WordClusters,
    ) -> Self {
        self.word_clusters
            .insert((language, cluster_name.into()), Arc::new(clusters));
        self
    }
}

impl LanguageResources for BuiltinResources {
    fn tokenize(&self, text: &str, _language: Language) -> Vec<String> {
        self.tokenizer.tokenize_light(text)
    }

    fn normalize(&self, text: &str) -> String {
        normalizer::normalize(text)
    }

    fn stem(&self, text: &str, language: Language) -> Result<String> {
        let stemmer = stemmer_for(language).ok_or_else(|| {
            FeaturizerError::resource_unavailable(format!("No stemmer for language '{language}'"))
        })?;
        let stemmed: Vec<String> = self
            .tokenizer
            .tokenize_light(text)
            .iter()
            .map(|token| stemmer.stem(token))
            .collect();
        Ok(stemmed.join(" "))
    }

    fn stop_words(&self, language: Language) -> &HashSet<String> {
        stop_words(language)
    }

    fn word_clusters(&self, language: Language, cluster_name: &str) -> Result<Arc<WordClusters>> {
        self.word_clusters
            .get(&(language, cluster_name.to_string()))
            .cloned()
            .ok_or_else(|| {
                FeaturizerError::resource_unavailable(format!(
                    "No word clusters '{cluster_name}' for language '{language}'"
                ))
            })
    }

    fn is_builtin_entity(&self, entity_name: &str) -> bool {
        entity_name.starts_with(BUILTIN_ENTITY_PREFIX)
    }

    fn name(&self) -> &str {
        "builtin"
    }
}
