//! Supported languages.
//!
//! A [`Language`] selects the tokenization, stemming, stop-word and word
//! cluster resources used by a featurizer. It serializes as its ISO 639-1
//! code (`"en"`, `"ja"`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FeaturizerError;

/// Language of the utterances handled by a featurizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "de")]
    De,
    #[serde(rename = "en")]
    En,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "it")]
    It,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "ko")]
    Ko,
    #[serde(rename = "pt")]
    Pt,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 8] = [
        Language::De,
        Language::En,
        Language::Es,
        Language::Fr,
        Language::It,
        Language::Ja,
        Language::Ko,
        Language::Pt,
    ];

    /// ISO 639-1 code of the language.
    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::It => "it",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Pt => "pt",
        }
    }

    /// Separator used to join tokens back into a string.
    ///
    /// Japanese is written without spaces between words.
    pub fn default_separator(&self) -> &'static str {
        match self {
            Language::Ja => "",
            _ => " ",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = FeaturizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .find(|language| language.code().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| FeaturizerError::invalid_argument(format!("Unknown language '{s}'")))
    }
}
