//! Stemming algorithms for reducing words to their root forms.

use crate::language::Language;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;
}

pub mod porter;

pub use porter::PorterStemmer;

/// Stemmer available for a language, if any.
pub fn stemmer_for(language: Language) -> Option<Box<dyn Stemmer>> {
    match language {
        Language::En => Some(Box::new(PorterStemmer::new())),
        _ => None,
    }
}
