//! TF-IDF vectorizer over preprocessed utterances.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;

use crate::error::{FeaturizerError, Result};
use crate::featurizer::config::{FeaturizerConfig, Norm};
use crate::featurizer::matrix::SparseMatrix;
use crate::language::Language;
use crate::resources::LanguageResources;

/// Vocabulary and IDF weights of a fitted vectorizer.
///
/// Both always have the same cardinality: `idf[i]` is the weight of the
/// token whose column index is `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfModel {
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfModel {
    /// Rebuild a model from stored state, checking its consistency.
    pub fn new(vocabulary: BTreeMap<String, usize>, idf: Vec<f64>) -> Result<Self> {
        if vocabulary.len() != idf.len() {
            return Err(FeaturizerError::malformed_snapshot(format!(
                "idf length {} != vocabulary size {}",
                idf.len(),
                vocabulary.len()
            )));
        }
        let mut seen = vec![false; idf.len()];
        for (token, &index) in &vocabulary {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(FeaturizerError::malformed_snapshot(format!(
                        "vocabulary index {index} of '{token}' is out of range or duplicated"
                    )));
                }
            }
        }
        if let Some(weight) = idf.iter().find(|weight| !weight.is_finite()) {
            return Err(FeaturizerError::malformed_snapshot(format!(
                "idf weight {weight} is not finite"
            )));
        }
        Ok(TfIdfModel {
            vocabulary: vocabulary.into_iter().collect(),
            idf,
        })
    }

    /// Vocabulary: token → column index.
    pub fn vocabulary(&self) -> &AHashMap<String, usize> {
        &self.vocabulary
    }

    /// IDF weight per column index.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Number of vocabulary tokens.
    pub fn len(&self) -> usize {
        self.idf.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    /// Tokens ordered by column index.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec![String::new(); self.idf.len()];
        for (token, &index) in &self.vocabulary {
            names[index] = token.clone();
        }
        names
    }

    /// Vocabulary as an ordered map, for serialization.
    pub fn sorted_vocabulary(&self) -> BTreeMap<String, usize> {
        self.vocabulary
            .iter()
            .map(|(token, &index)| (token.clone(), index))
            .collect()
    }
}

/// TF-IDF vectorizer for preprocessed utterances.
///
/// Utterances are lowercased and split with the light tokenizer of the
/// language. Vocabulary indices follow the lexicographic order of tokens and
/// IDF weights are smoothed: `ln((1 + n_docs) / (1 + df)) + 1`.
pub struct TfIdfVectorizer {
    language: Language,
    config: FeaturizerConfig,
    resources: Arc<dyn LanguageResources>,
    model: Option<TfIdfModel>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("language", &self.language)
            .field("config", &self.config)
            .field("resources", &self.resources.name())
            .field(
                "vocabulary_size",
                &self.model.as_ref().map(|model| model.len()),
            )
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(
        language: Language,
        config: FeaturizerConfig,
        resources: Arc<dyn LanguageResources>,
    ) -> Self {
        Self {
            language,
            config,
            resources,
            model: None,
        }
    }

    /// Create a vectorizer from an already fitted model.
    pub fn with_model(
        language: Language,
        config: FeaturizerConfig,
        resources: Arc<dyn LanguageResources>,
        model: TfIdfModel,
    ) -> Self {
        Self {
            language,
            config,
            resources,
            model: Some(model),
        }
    }

    /// Fit on documents and return their tf-idf matrix.
    ///
    /// Returns `Ok(None)` and leaves the vectorizer unfitted when no document
    /// contains a single token.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Option<SparseMatrix>> {
        self.model = None;
        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| self.tokenize(doc)).collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique_tokens: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
            for token in unique_tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            debug!("Empty vocabulary after tokenizing {} documents", documents.len());
            return Ok(None);
        }

        let n_documents = documents.len() as f64;
        let mut vocabulary = AHashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (token, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(token.to_string(), index);
            // IDF = ln((N + 1) / (df + 1)) + 1
            idf.push(((n_documents + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
        }
        debug!("Fitted tf-idf vocabulary of {} tokens", idf.len());

        let model = TfIdfModel { vocabulary, idf };
        let matrix = self.weigh(&model, &tokenized)?;
        self.model = Some(model);
        Ok(Some(matrix))
    }

    /// Map documents into the fitted vocabulary space.
    ///
    /// Tokens outside the vocabulary are ignored.
    pub fn transform(&self, documents: &[String]) -> Result<SparseMatrix> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| FeaturizerError::not_fitted("tf-idf vectorizer has no vocabulary"))?;
        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| self.tokenize(doc)).collect();
        self.weigh(model, &tokenized)
    }

    /// Fitted model, if any.
    pub fn model(&self) -> Option<&TfIdfModel> {
        self.model.as_ref()
    }

    /// Check whether the vectorizer has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Get the size of the vocabulary (zero when unfitted).
    pub fn vocabulary_size(&self) -> usize {
        self.model.as_ref().map_or(0, |model| model.len())
    }

    fn tokenize(&self, document: &str) -> Vec<String> {
        self.resources
            .tokenize(&document.to_lowercase(), self.language)
    }

    fn weigh(&self, model: &TfIdfModel, tokenized: &[Vec<String>]) -> Result<SparseMatrix> {
        let mut matrix = SparseMatrix::new(model.len());
        for tokens in tokenized {
            let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
            for token in tokens {
                if let Some(&index) = model.vocabulary.get(token) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }

            let mut row: Vec<(usize, f64)> = counts
                .into_iter()
                .map(|(index, count)| {
                    let tf = if self.config.sublinear_tf {
                        1.0 + count.ln()
                    } else {
                        count
                    };
                    (index, tf * model.idf[index])
                })
                .collect();

            if self.config.norm == Norm::L2 {
                let l2_norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
                if l2_norm > 0.0 {
                    for (_, value) in &mut row {
                        *value /= l2_norm;
                    }
                }
            }
            matrix.push_row(row)?;
        }
        Ok(matrix)
    }
}
