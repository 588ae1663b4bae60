//! Word cluster tables.
//!
//! A word cluster table maps a token (or a space-joined n-gram) to the label
//! of the distributional cluster it belongs to, such as the Brown clusters
//! computed over a large corpus. Tables are stored as plain text with one
//! `token<TAB>cluster` entry per line.

use std::io::BufRead;

use ahash::AHashMap;

use crate::error::{FeaturizerError, Result};

/// Mapping from a lowercased token to its cluster label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordClusters {
    clusters: AHashMap<String, String>,
}

impl WordClusters {
    /// Create an empty cluster table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cluster table from tab-separated lines.
    ///
    /// Blank lines are skipped. Keys are lowercased so that lookups, which
    /// are always made with lowercased n-grams, are case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use intent_featurizer::analysis::word_clusters::WordClusters;
    ///
    /// let data = "Paris\t0110\nlondon\t0110\nrun\t1011\n";
    /// let clusters = WordClusters::from_reader(data.as_bytes()).unwrap();
    /// assert_eq!(clusters.get("paris"), Some("0110"));
    /// assert_eq!(clusters.len(), 3);
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut clusters = AHashMap::new();
        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            let (token, cluster) = line.split_once('\t').ok_or_else(|| {
                FeaturizerError::invalid_argument(format!(
                    "Word cluster line {} has no tab separator",
                    line_number + 1
                ))
            })?;
            clusters.insert(token.to_lowercase(), cluster.trim().to_string());
        }
        Ok(WordClusters { clusters })
    }

    /// Add a single entry.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, token: K, cluster: V) {
        self.clusters.insert(token.into().to_lowercase(), cluster.into());
    }

    /// Cluster label of a token, if it belongs to one.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.clusters.get(token).map(|s| s.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WordClusters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut clusters = WordClusters::new();
        for (token, cluster) in iter {
            clusters.insert(token, cluster);
        }
        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader_skips_blank_lines() {
        let data = "new york\t0101\n\nBerlin\t0100\r\n";
        let clusters = WordClusters::from_reader(data.as_bytes()).unwrap();

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.get("new york"), Some("0101"));
        assert_eq!(clusters.get("berlin"), Some("0100"));
        assert_eq!(clusters.get("Berlin"), None);
    }

    #[test]
    fn test_from_reader_rejects_missing_separator() {
        let data = "paris 0110\n";
        let result = WordClusters::from_reader(data.as_bytes());
        assert!(matches!(result, Err(FeaturizerError::InvalidArgument(_))));
    }

    #[test]
    fn test_from_iter() {
        let clusters: WordClusters = [("Run", "1011"), ("walk", "1011")].into_iter().collect();
        assert_eq!(clusters.get("run"), Some("1011"));
        assert!(!clusters.is_empty());
    }
}
