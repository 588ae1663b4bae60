//! Text normalization with stemming fallback.

use log::debug;

use crate::language::Language;
use crate::resources::LanguageResources;

/// Normalize text, then stem it when `use_stemming` is set.
///
/// A missing stemmer is not an error: the normalized, unstemmed text is
/// returned instead.
///
/// # Examples
///
/// ```
/// use intent_featurizer::featurizer::normalizer::normalize_stem;
/// use intent_featurizer::language::Language;
/// use intent_featurizer::resources::BuiltinResources;
///
/// let resources = BuiltinResources::new().unwrap();
/// assert_eq!(normalize_stem("Offices", Language::En, &resources, true), "offic");
/// // No Korean stemmer: falls back to the normalized form.
/// assert_eq!(normalize_stem("Offices", Language::Ko, &resources, true), "offices");
/// ```
pub fn normalize_stem(
    text: &str,
    language: Language,
    resources: &dyn LanguageResources,
    use_stemming: bool,
) -> String {
    let normalized = resources.normalize(text);
    if !use_stemming {
        return normalized;
    }
    match resources.stem(&normalized, language) {
        Ok(stemmed) => stemmed,
        Err(error) => {
            debug!("Stemming skipped for '{language}': {error}");
            normalized
        }
    }
}
