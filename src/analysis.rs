//! Light text analysis primitives.
//!
//! These are the building blocks behind the default
//! [`BuiltinResources`](crate::resources::BuiltinResources): a regex word
//! tokenizer, a Unicode folding normalizer, a Porter stemmer for English,
//! per-language stop word lists and a word cluster table.
//!
//! ```text
//! Raw Text → Tokenizer → Normalizer → Stemmer → normalized tokens
//! ```

pub mod normalizer;
pub mod stemmer;
pub mod stop_words;
pub mod tokenizer;
pub mod word_clusters;
