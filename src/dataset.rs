//! Training dataset view used to build the entity lexicon.
//!
//! Only the entity part of a dataset matters to the featurizer: for every
//! entity name, the literal utterances that are known to mention it.
//!
//! ```json
//! {
//!   "entities": {
//!     "the_office": { "utterances": ["the office", "my office"] },
//!     "builtin/datetime": { "utterances": [] }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A custom or builtin entity and its literal example utterances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Literal utterances of the entity values and their synonyms.
    #[serde(default)]
    pub utterances: BTreeSet<String>,
}

/// Dataset entities keyed by entity name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub entities: BTreeMap<String, Entity>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity with its utterances.
    ///
    /// # Examples
    ///
    /// ```
    /// use intent_featurizer::dataset::Dataset;
    ///
    /// let dataset = Dataset::new().with_entity("the_office", ["the office", "my office"]);
    /// assert_eq!(dataset.entities["the_office"].utterances.len(), 2);
    /// ```
    pub fn with_entity<N, I, S>(mut self, name: N, utterances: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities
            .entry(name.into())
            .or_default()
            .utterances
            .extend(utterances.into_iter().map(Into::into));
        self
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a dataset from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
