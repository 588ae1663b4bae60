//! Featurization of utterances for intent classification.
//!
//! A [`Featurizer`] turns raw utterances into a fixed-width tf-idf matrix:
//!
//! 1. each utterance is normalized and stemmed token by token, and entity and
//!    word cluster pseudo-tokens are appended ([`injector`]);
//! 2. the resulting strings are vectorized with smoothed IDF weights
//!    ([`vectorizer`]);
//! 3. at fit time, a chi-squared test picks the columns associated with the
//!    intent labels ([`selector`]), and every later matrix is restricted to
//!    those columns.
//!
//! The fitted state can be exported as a [`FeaturizerSnapshot`] and restored
//! without fitting again.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use intent_featurizer::dataset::Dataset;
//! use intent_featurizer::featurizer::{Featurizer, FitOutcome};
//! use intent_featurizer::featurizer::config::FeaturizerConfig;
//! use intent_featurizer::language::Language;
//! use intent_featurizer::resources::BuiltinResources;
//!
//! let resources = Arc::new(BuiltinResources::new().unwrap());
//! let mut featurizer = Featurizer::new(Language::En, FeaturizerConfig::default(), resources);
//!
//! let dataset = Dataset::new().with_entity("city", ["paris", "london"]);
//! let queries = ["book a flight to paris", "fly to london", "play some jazz", "play rock"];
//! let outcome = featurizer.fit(&dataset, &queries, &[0, 0, 1, 1]).unwrap();
//! assert_eq!(outcome, FitOutcome::Fitted);
//!
//! let matrix = featurizer.transform(&["play jazz"]).unwrap();
//! assert_eq!(matrix.n_rows(), 1);
//! assert_eq!(matrix.n_cols(), featurizer.selected_indices().unwrap().len());
//! ```

pub mod config;
pub mod injector;
pub mod matrix;
pub mod normalizer;
pub mod selector;
pub mod snapshot;
pub mod stats;
pub mod vectorizer;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, info};

use crate::dataset::Dataset;
use crate::error::{FeaturizerError, Result};
use crate::language::Language;
use crate::resources::LanguageResources;

use self::config::FeaturizerConfig;
use self::injector::{EntityLexicon, preprocess_query};
use self::matrix::SparseMatrix;
use self::selector::{DEFAULT_PVALUE_THRESHOLD, FeatureSelector};
use self::snapshot::{FeaturizerSnapshot, VectorizerSnapshot};
use self::vectorizer::{TfIdfModel, TfIdfVectorizer};

/// File name of a persisted featurizer inside its directory.
pub const SNAPSHOT_FILE_NAME: &str = "featurizer.json";

/// Result of [`Featurizer::fit`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOutcome {
    /// Vocabulary, IDF weights and selected columns were computed.
    Fitted,
    /// No training utterance contained a token; the featurizer is untrained.
    EmptyCorpus,
}

/// Fitted (or fittable) featurizer for one language.
pub struct Featurizer {
    language: Language,
    config: FeaturizerConfig,
    resources: Arc<dyn LanguageResources>,
    vectorizer: TfIdfVectorizer,
    selector: FeatureSelector,
    selected_indices: Option<Vec<usize>>,
    entity_lexicon: EntityLexicon,
    unknown_token_replacement: Option<String>,
}

impl std::fmt::Debug for Featurizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Featurizer")
            .field("language", &self.language)
            .field("config", &self.config)
            .field("resources", &self.resources.name())
            .field("vectorizer", &self.vectorizer)
            .field("pvalue_threshold", &self.selector.pvalue_threshold())
            .field("selected_indices", &self.selected_indices)
            .field("entity_lexicon_size", &self.entity_lexicon.len())
            .field("unknown_token_replacement", &self.unknown_token_replacement)
            .finish()
    }
}

impl Featurizer {
    /// Create an untrained featurizer with the default p-value threshold.
    pub fn new(
        language: Language,
        config: FeaturizerConfig,
        resources: Arc<dyn LanguageResources>,
    ) -> Self {
        let vectorizer = TfIdfVectorizer::new(language, config.clone(), Arc::clone(&resources));
        Featurizer {
            language,
            config,
            resources,
            vectorizer,
            selector: FeatureSelector::default(),
            selected_indices: None,
            entity_lexicon: EntityLexicon::new(),
            unknown_token_replacement: None,
        }
    }

    /// Set the p-value threshold of feature selection, in `(0, 1]`.
    pub fn with_pvalue_threshold(mut self, pvalue_threshold: f64) -> Result<Self> {
        self.selector = FeatureSelector::new(pvalue_threshold)?;
        Ok(self)
    }

    /// Set the token that stands for unknown words in training utterances.
    ///
    /// It never becomes an entity lexicon key.
    pub fn with_unknown_token_replacement<S: Into<String>>(mut self, replacement: S) -> Self {
        self.unknown_token_replacement = Some(replacement.into());
        self
    }

    /// Fit on a labelled corpus.
    ///
    /// The dataset provides the entity utterances of the lexicon; `queries`
    /// and `labels` are the training utterances and their intent indices.
    /// Fitting replaces any previously fitted state. When no query contains a
    /// token, the featurizer is left untrained and
    /// [`FitOutcome::EmptyCorpus`] is returned.
    pub fn fit<S: AsRef<str>>(
        &mut self,
        dataset: &Dataset,
        queries: &[S],
        labels: &[usize],
    ) -> Result<FitOutcome> {
        if queries.len() != labels.len() {
            return Err(FeaturizerError::DimensionMismatch {
                expected: queries.len(),
                actual: labels.len(),
            });
        }

        self.selected_indices = None;
        self.entity_lexicon = EntityLexicon::from_dataset(
            dataset,
            self.language,
            self.resources.as_ref(),
            &self.config,
            self.unknown_token_replacement.as_deref(),
        );
        debug!("Entity lexicon has {} utterances", self.entity_lexicon.len());

        let preprocessed = self.preprocess_queries(queries);
        let Some(matrix) = self.vectorizer.fit_transform(&preprocessed)? else {
            info!(
                "No token in {} training utterances, featurizer left untrained",
                queries.len()
            );
            self.entity_lexicon = EntityLexicon::new();
            return Ok(FitOutcome::EmptyCorpus);
        };

        let feature_names = self
            .vectorizer
            .model()
            .map(TfIdfModel::feature_names)
            .unwrap_or_default();
        let selected = self.selector.select(
            &matrix,
            labels,
            &feature_names,
            self.resources.stop_words(self.language),
        )?;
        info!(
            "Selected {} of {} features at p-value threshold {}",
            selected.len(),
            feature_names.len(),
            self.selector.pvalue_threshold()
        );
        self.selected_indices = Some(selected);
        Ok(FitOutcome::Fitted)
    }

    /// Map utterances into the selected feature space.
    ///
    /// The output has one row per utterance and one column per selected
    /// index, in ascending vocabulary order.
    pub fn transform<S: AsRef<str>>(&self, queries: &[S]) -> Result<SparseMatrix> {
        let selected = self
            .selected_indices
            .as_deref()
            .ok_or_else(|| FeaturizerError::not_fitted("featurizer has not been fitted"))?;
        let preprocessed = self.preprocess_queries(queries);
        self.vectorizer
            .transform(&preprocessed)?
            .select_columns(selected)
    }

    /// Fit, then transform the training queries.
    ///
    /// Returns `None` when the corpus is empty.
    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        dataset: &Dataset,
        queries: &[S],
        labels: &[usize],
    ) -> Result<Option<SparseMatrix>> {
        match self.fit(dataset, queries, labels)? {
            FitOutcome::Fitted => self.transform(queries).map(Some),
            FitOutcome::EmptyCorpus => Ok(None),
        }
    }

    /// Feature strings of utterances, with injected entity and cluster tokens.
    pub fn preprocess_queries<S: AsRef<str>>(&self, queries: &[S]) -> Vec<String> {
        queries
            .iter()
            .map(|query| {
                preprocess_query(
                    query.as_ref(),
                    self.language,
                    self.resources.as_ref(),
                    &self.config,
                    &self.entity_lexicon,
                )
            })
            .collect()
    }

    /// Check whether the featurizer can transform.
    pub fn is_fitted(&self) -> bool {
        self.vectorizer.is_fitted() && self.selected_indices.is_some()
    }

    /// Tokens of the output columns, in output order.
    pub fn feature_names(&self) -> Option<Vec<String>> {
        let model = self.vectorizer.model()?;
        let selected = self.selected_indices.as_ref()?;
        let names = model.feature_names();
        Some(selected.iter().map(|&index| names[index].clone()).collect())
    }

    /// Language of the featurized utterances.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Featurization options.
    pub fn config(&self) -> &FeaturizerConfig {
        &self.config
    }

    /// Significance cutoff of feature selection.
    pub fn pvalue_threshold(&self) -> f64 {
        self.selector.pvalue_threshold()
    }

    /// Token standing for unknown words, if any.
    pub fn unknown_token_replacement(&self) -> Option<&str> {
        self.unknown_token_replacement.as_deref()
    }

    /// Normalized entity utterances and their feature tokens.
    pub fn entity_lexicon(&self) -> &EntityLexicon {
        &self.entity_lexicon
    }

    /// Selected column indices, ascending.
    pub fn selected_indices(&self) -> Option<&[usize]> {
        self.selected_indices.as_deref()
    }

    /// Vocabulary of the fitted vectorizer.
    pub fn vocabulary(&self) -> Option<&AHashMap<String, usize>> {
        self.vectorizer.model().map(TfIdfModel::vocabulary)
    }

    /// IDF weights of the fitted vectorizer, by column index.
    pub fn idf(&self) -> Option<&[f64]> {
        self.vectorizer.model().map(TfIdfModel::idf)
    }

    /// Export the current state.
    pub fn to_snapshot(&self) -> FeaturizerSnapshot {
        let (vectorizer, selected_indices, entity_lexicon) =
            match (self.vectorizer.model(), &self.selected_indices) {
                (Some(model), Some(selected)) => (
                    VectorizerSnapshot {
                        vocabulary: Some(model.sorted_vocabulary()),
                        idf: Some(model.idf().to_vec()),
                    },
                    Some(selected.clone()),
                    self.entity_lexicon.to_map(),
                ),
                _ => (VectorizerSnapshot::default(), None, Default::default()),
            };

        FeaturizerSnapshot {
            language: self.language,
            config: self.config.clone(),
            vectorizer,
            selected_indices,
            pvalue_threshold: self.selector.pvalue_threshold(),
            entity_lexicon,
            unknown_token_replacement: self.unknown_token_replacement.clone(),
        }
    }

    /// Restore a featurizer from a snapshot, without fitting.
    ///
    /// Inconsistent snapshots are rejected with
    /// [`FeaturizerError::MalformedSnapshot`].
    pub fn from_snapshot(
        snapshot: FeaturizerSnapshot,
        resources: Arc<dyn LanguageResources>,
    ) -> Result<Self> {
        let FeaturizerSnapshot {
            language,
            config,
            vectorizer,
            selected_indices,
            pvalue_threshold,
            entity_lexicon,
            unknown_token_replacement,
        } = snapshot;

        let selector = FeatureSelector::new(pvalue_threshold)
            .map_err(|error| FeaturizerError::malformed_snapshot(error.to_string()))?;

        let model = match (vectorizer.vocabulary, vectorizer.idf) {
            (Some(vocabulary), Some(idf)) => Some(TfIdfModel::new(vocabulary, idf)?),
            (None, None) => None,
            (Some(_), None) | (None, Some(_)) => {
                return Err(FeaturizerError::malformed_snapshot(
                    "vocabulary and idf must be both present or both null",
                ));
            }
        };

        match (&model, &selected_indices) {
            (Some(model), Some(selected)) => validate_selection(selected, model.len())?,
            (None, None) => {}
            (Some(_), None) => {
                return Err(FeaturizerError::malformed_snapshot(
                    "fitted snapshot has no selected indices",
                ));
            }
            (None, Some(_)) => {
                return Err(FeaturizerError::malformed_snapshot(
                    "untrained snapshot has selected indices",
                ));
            }
        }

        let vectorizer = match model {
            Some(model) => {
                TfIdfVectorizer::with_model(language, config.clone(), Arc::clone(&resources), model)
            }
            None => TfIdfVectorizer::new(language, config.clone(), Arc::clone(&resources)),
        };

        Ok(Featurizer {
            language,
            config,
            resources,
            vectorizer,
            selector,
            selected_indices,
            entity_lexicon: EntityLexicon::from_map(entity_lexicon),
            unknown_token_replacement,
        })
    }

    /// Write the snapshot as JSON into `directory`, creating it if needed.
    pub fn persist<P: AsRef<Path>>(&self, directory: P) -> Result<()> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory)?;
        let path = directory.join(SNAPSHOT_FILE_NAME);
        fs::write(&path, self.to_snapshot().to_json()?)?;
        debug!("Persisted featurizer to {}", path.display());
        Ok(())
    }

    /// Load a featurizer persisted with [`Featurizer::persist`].
    pub fn from_path<P: AsRef<Path>>(
        directory: P,
        resources: Arc<dyn LanguageResources>,
    ) -> Result<Self> {
        let content = fs::read_to_string(directory.as_ref().join(SNAPSHOT_FILE_NAME))?;
        Self::from_snapshot(FeaturizerSnapshot::from_json(&content)?, resources)
    }
}

fn validate_selection(selected: &[usize], n_features: usize) -> Result<()> {
    if let Some(&index) = selected.iter().find(|&&index| index >= n_features) {
        return Err(FeaturizerError::malformed_snapshot(format!(
            "selected index {index} out of range for {n_features} features"
        )));
    }
    if selected.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(FeaturizerError::malformed_snapshot(
            "selected indices are not strictly increasing",
        ));
    }
    Ok(())
}
