//! Stop word lists per language.
//!
//! Stop words are the very frequent function words of a language. The
//! featurizer does not drop them from the bag of words; it only uses these
//! lists to demote weakly significant stop words during feature selection.
//!
//! # Examples
//!
//! ```
//! use intent_featurizer::analysis::stop_words::stop_words;
//! use intent_featurizer::language::Language;
//!
//! assert!(stop_words(Language::En).contains("the"));
//! assert!(!stop_words(Language::En).contains("office"));
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::language::Language;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

const JAPANESE_STOP_WORDS: &[&str] = &[
    "の", "に", "は", "を", "た", "が", "で", "て", "と", "し", "れ", "さ", "ある", "いる", "も", "する", "から",
    "な", "こと", "として", "い", "や", "れる", "など", "なっ", "ない", "この", "ため", "その", "あっ", "よう", "また",
    "もの", "という", "あり", "まで", "られ", "なる", "へ", "か", "だ", "これ", "によって", "により", "おり", "より", "による",
    "ず", "なり", "られる", "において", "ば", "なかっ", "なく", "しかし", "について", "せ", "だっ", "その後", "できる", "それ",
    "う", "ので", "なお", "のみ", "でき", "き", "つ", "における", "および", "いう", "さらに", "でも", "ら", "たり", "その他",
    "に関する", "たち", "ます", "ん", "なら", "に対して", "特に", "せる", "及び", "これら", "とき", "では", "にて", "ほか",
    "ながら", "うち", "そして", "とともに", "ただし", "かつて", "それぞれ", "または", "お", "ほど", "ものの", "に対する", "ほとんど",
    "と共に", "といった", "です", "とも", "ところ", "ここ",
];

static ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().map(|&s| s.to_string()).collect());

static JAPANESE_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| JAPANESE_STOP_WORDS.iter().map(|&s| s.to_string()).collect());

static EMPTY_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(HashSet::new);

/// Stop words for a language. Languages without a list get an empty set.
pub fn stop_words(language: Language) -> &'static HashSet<String> {
    match language {
        Language::En => &ENGLISH_STOP_WORDS_SET,
        Language::Ja => &JAPANESE_STOP_WORDS_SET,
        _ => &EMPTY_STOP_WORDS_SET,
    }
}
