//! Light regex tokenizer.
//!
//! # Examples
//!
//! ```
//! use intent_featurizer::analysis::tokenizer::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::new().unwrap();
//! assert_eq!(tokenizer.tokenize_light("let's go"), vec!["let", "s", "go"]);
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::error::{FeaturizerError, Result};

/// Pattern of the light tokenizer: runs of Unicode word characters.
const WORD_PATTERN: &str = r"\w+";

/// Tokenizer that extracts every run of word characters.
///
/// Punctuation and whitespace separate tokens and are dropped, so `"let's"`
/// yields `"let"` and `"s"`.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    pub fn new() -> Result<Self> {
        let regex = Regex::new(WORD_PATTERN).map_err(|e| {
            FeaturizerError::invalid_argument(format!("Invalid regex pattern: {e}"))
        })?;
        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Tokenize into token strings, in order of appearance.
    pub fn tokenize_light(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|mat| mat.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_splits_tokens() {
        let tokenizer = RegexTokenizer::new().unwrap();
        assert_eq!(
            tokenizer.tokenize_light("Let's go to the_office!"),
            vec!["Let", "s", "go", "to", "the_office"]
        );
        assert!(tokenizer.tokenize_light("  ?! ").is_empty());
    }

    #[test]
    fn test_double_spaces_collapse() {
        let tokenizer = RegexTokenizer::new().unwrap();
        assert_eq!(
            tokenizer.tokenize_light("le  grand\thotel"),
            vec!["le", "grand", "hotel"]
        );
    }

    #[test]
    fn test_unicode_words() {
        let tokenizer = RegexTokenizer::new().unwrap();
        assert_eq!(
            tokenizer.tokenize_light("café crème 東京"),
            vec!["café", "crème", "東京"]
        );
    }
}
