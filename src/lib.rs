//! # Intent Featurizer
//!
//! Text featurization for supervised intent classification.
//!
//! ## Features
//!
//! - Language-aware normalization and stemming of utterances
//! - Entity and word cluster pseudo-tokens injected into the bag of words
//! - Smoothed tf-idf vectorization into a sparse matrix
//! - Chi-squared feature selection with stop-word demotion
//! - Exact JSON snapshots of the fitted state

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod featurizer;
pub mod language;
pub mod resources;

pub use error::{FeaturizerError, Result};
pub use featurizer::{Featurizer, FitOutcome};
pub use language::Language;

/// Version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
