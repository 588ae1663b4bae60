//! Language-agnostic text normalization.
//!
//! Normalization folds case and strips diacritics so that `"Café"`,
//! `"CAFE"` and `"cafe\u{0301}"` all map to `"cafe"`. Compatibility
//! decomposition (NFKD) also folds full-width forms and ligatures. Kana
//! voicing marks are not diacritics: `"ガス"` and `"カス"` stay distinct.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Combining kana voiced and semi-voiced sound marks.
const KANA_VOICING_MARKS: [char; 2] = ['\u{3099}', '\u{309A}'];

fn is_diacritic(c: char) -> bool {
    is_combining_mark(c) && !KANA_VOICING_MARKS.contains(&c)
}

/// Normalize text: NFKD decomposition, diacritics removed, lowercased, then
/// recomposed with NFC.
///
/// The function is idempotent: normalizing an already normalized string
/// returns it unchanged.
///
/// # Examples
///
/// ```
/// use intent_featurizer::analysis::normalizer::normalize;
///
/// assert_eq!(normalize("Crème Brûlée"), "creme brulee");
/// assert_eq!(normalize("ガス"), "ガス");
/// ```
pub fn normalize(text: &str) -> String {
    let folded: String = text.nfkd().filter(|c| !is_diacritic(*c)).collect();
    folded
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_diacritic(*c))
        .nfc()
        .collect()
}
