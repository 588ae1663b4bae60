//! Injection of entity and word cluster pseudo-tokens.
//!
//! Two signals are appended to the normalized tokens of an utterance before
//! vectorization:
//!
//! - **entity features**: when a contiguous n-gram of the normalized query
//!   equals a known entity utterance, the entity's feature token
//!   (`entityfeature<name>`) is added;
//! - **word cluster features**: when an n-gram of the raw query belongs to a
//!   word cluster, the cluster label is added.
//!
//! ```text
//! "let's go to the office"
//!   → "let s go to the offic entityfeaturethe_office"
//! ```

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::dataset::Dataset;
use crate::featurizer::config::FeaturizerConfig;
use crate::featurizer::normalizer::normalize_stem;
use crate::language::Language;
use crate::resources::LanguageResources;

/// Prefix of entity feature tokens, keeping them apart from real words.
pub const ENTITY_FEATURE_PREFIX: &str = "entityfeature";

/// Mapping from a normalized entity utterance to its entity feature tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityLexicon {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl EntityLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the lexicon from the custom entities of a dataset.
    ///
    /// Builtin entities are skipped. Keys are built like query n-grams: the
    /// utterance is tokenized, each token normalized and stemmed, and the
    /// results space-joined. A key equal to `unknown_token_replacement` is
    /// dropped.
    pub fn from_dataset(
        dataset: &Dataset,
        language: Language,
        resources: &dyn LanguageResources,
        config: &FeaturizerConfig,
        unknown_token_replacement: Option<&str>,
    ) -> Self {
        let mut lexicon = EntityLexicon::new();
        for (entity_name, entity) in &dataset.entities {
            if resources.is_builtin_entity(entity_name) {
                continue;
            }
            let feature = entity_feature_name(entity_name, language, resources);
            for utterance in &entity.utterances {
                let tokens = resources.tokenize(utterance, language);
                let key = normalize_tokens(&tokens, language, resources, config).join(" ");
                lexicon.insert(key, feature.clone());
            }
        }

        if let Some(unknown) = unknown_token_replacement {
            if lexicon.entries.remove(unknown).is_some() {
                debug!("Removed unknown token replacement '{unknown}' from the entity lexicon");
            }
        }
        lexicon
    }

    /// Add a feature token for a normalized utterance.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, utterance: K, feature: V) {
        self.entries
            .entry(utterance.into())
            .or_default()
            .insert(feature.into());
    }

    /// Feature tokens of a normalized utterance.
    pub fn get(&self, utterance: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(utterance)
    }

    /// Check whether a normalized utterance is a key of the lexicon.
    pub fn contains(&self, utterance: &str) -> bool {
        self.entries.contains_key(utterance)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }

    /// Number of distinct utterances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert into an utterance → ordered feature list mapping.
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.entries
            .iter()
            .map(|(utterance, features)| (utterance.clone(), features.iter().cloned().collect()))
            .collect()
    }

    /// Rebuild a lexicon from an utterance → feature list mapping.
    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> Self {
        let entries = map
            .into_iter()
            .map(|(utterance, features)| (utterance, features.into_iter().collect()))
            .collect();
        EntityLexicon { entries }
    }
}

/// Feature token of an entity: its name tokens concatenated after the prefix.
pub fn entity_feature_name(
    entity_name: &str,
    language: Language,
    resources: &dyn LanguageResources,
) -> String {
    format!(
        "{ENTITY_FEATURE_PREFIX}{}",
        resources.tokenize(entity_name, language).concat()
    )
}

/// Normalize and stem each token.
pub fn normalize_tokens(
    tokens: &[String],
    language: Language,
    resources: &dyn LanguageResources,
    config: &FeaturizerConfig,
) -> Vec<String> {
    tokens
        .iter()
        .map(|token| normalize_stem(token, language, resources, config.use_stemming))
        .collect()
}

/// All contiguous n-grams of a token sequence, space-joined.
///
/// N-grams are listed by start position, then by increasing length.
///
/// # Examples
///
/// ```
/// use intent_featurizer::featurizer::injector::all_ngrams;
///
/// let tokens = vec!["a".to_string(), "b".to_string(), "c".to_string()];
/// assert_eq!(all_ngrams(&tokens), vec!["a", "a b", "a b c", "b", "b c", "c"]);
/// ```
pub fn all_ngrams(tokens: &[String]) -> Vec<String> {
    let mut ngrams = Vec::with_capacity(tokens.len() * (tokens.len() + 1) / 2);
    for start in 0..tokens.len() {
        for end in start + 1..=tokens.len() {
            ngrams.push(tokens[start..end].join(" "));
        }
    }
    ngrams
}

/// Entity feature tokens found among the n-grams of normalized tokens.
pub fn entity_features(normalized_tokens: &[String], lexicon: &EntityLexicon) -> Vec<String> {
    all_ngrams(normalized_tokens)
        .iter()
        .filter_map(|ngram| lexicon.get(ngram))
        .flat_map(|features| features.iter().cloned())
        .collect()
}

/// Cluster labels found among the n-grams of raw query tokens.
///
/// Languages without a configured cluster table contribute nothing, and
/// neither does a table missing from the resources.
pub fn word_cluster_features(
    query_tokens: &[String],
    language: Language,
    resources: &dyn LanguageResources,
    config: &FeaturizerConfig,
) -> Vec<String> {
    let Some(cluster_name) = config.word_clusters_name.as_deref() else {
        return Vec::new();
    };
    let clusters = match resources.word_clusters(language, cluster_name) {
        Ok(clusters) => clusters,
        Err(error) => {
            debug!("Word cluster features skipped: {error}");
            return Vec::new();
        }
    };
    all_ngrams(query_tokens)
        .iter()
        .filter_map(|ngram| clusters.get(&ngram.to_lowercase()))
        .map(|cluster| cluster.to_string())
        .collect()
}

/// Build the feature string of one utterance.
///
/// The result is the normalized tokens joined with the language separator,
/// followed by the sorted entity features and then the sorted cluster
/// features, each block space-separated.
pub fn preprocess_query(
    query: &str,
    language: Language,
    resources: &dyn LanguageResources,
    config: &FeaturizerConfig,
    lexicon: &EntityLexicon,
) -> String {
    let query_tokens = resources.tokenize(query, language);
    let mut cluster_features = word_cluster_features(&query_tokens, language, resources, config);
    let normalized_tokens = normalize_tokens(&query_tokens, language, resources, config);
    let mut entity_features = entity_features(&normalized_tokens, lexicon);

    let mut features = normalized_tokens.join(language.default_separator());
    if !entity_features.is_empty() {
        entity_features.sort();
        features.push(' ');
        features.push_str(&entity_features.join(" "));
    }
    if !cluster_features.is_empty() {
        cluster_features.sort();
        features.push(' ');
        features.push_str(&cluster_features.join(" "));
    }
    features
}
