//! Integration tests for exporting and restoring fitted featurizers.

use std::sync::Arc;

use intent_featurizer::dataset::Dataset;
use intent_featurizer::error::{FeaturizerError, Result};
use intent_featurizer::featurizer::config::FeaturizerConfig;
use intent_featurizer::featurizer::snapshot::FeaturizerSnapshot;
use intent_featurizer::featurizer::{Featurizer, SNAPSHOT_FILE_NAME};
use intent_featurizer::language::Language;
use intent_featurizer::resources::{BuiltinResources, LanguageResources};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

const WORDS: [&str; 16] = [
    "book", "flight", "paris", "london", "play", "jazz", "music", "song", "turn", "light",
    "kitchen", "the", "to", "a", "please", "now",
];

fn resources() -> Result<Arc<dyn LanguageResources>> {
    Ok(Arc::new(BuiltinResources::new()?))
}

fn random_queries(rng: &mut StdRng, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let length = rng.random_range(0..8);
            (0..length)
                .filter_map(|_| WORDS.choose(rng).copied())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn fitted_featurizer() -> Result<Featurizer> {
    let dataset = Dataset::new()
        .with_entity("city", ["paris", "london", "new york"])
        .with_entity("room", ["the kitchen"]);
    let queries = [
        "book a flight to paris",
        "book me a flight to london please",
        "fly to new york",
        "play some jazz",
        "play a song now",
        "play music in the kitchen",
        "turn the kitchen light on",
        "turn off the light",
    ];
    let labels = [0, 0, 0, 1, 1, 1, 2, 2];

    let mut featurizer = Featurizer::new(
        Language::En,
        FeaturizerConfig::default().with_sublinear_tf(true),
        resources()?,
    )
    .with_unknown_token_replacement("unk");
    let _ = featurizer.fit(&dataset, &queries, &labels)?;
    Ok(featurizer)
}

#[test]
fn test_round_trip_transform_is_identical() -> Result<()> {
    let featurizer = fitted_featurizer()?;
    let json = featurizer.to_snapshot().to_json()?;
    let restored = Featurizer::from_snapshot(FeaturizerSnapshot::from_json(&json)?, resources()?)?;

    assert_eq!(restored.to_snapshot(), featurizer.to_snapshot());

    let mut rng = StdRng::seed_from_u64(7);
    let queries = random_queries(&mut rng, 200);
    assert_eq!(restored.transform(&queries)?, featurizer.transform(&queries)?);

    Ok(())
}

#[test]
fn test_persist_and_reload() -> Result<()> {
    let featurizer = fitted_featurizer()?;
    let temp_dir = TempDir::new()?;
    featurizer.persist(temp_dir.path())?;

    assert!(temp_dir.path().join(SNAPSHOT_FILE_NAME).exists());

    let loaded = Featurizer::from_path(temp_dir.path(), resources()?)?;
    assert_eq!(loaded.language(), Language::En);
    assert_eq!(loaded.unknown_token_replacement(), Some("unk"));
    assert_eq!(loaded.feature_names(), featurizer.feature_names());
    assert_eq!(loaded.entity_lexicon(), featurizer.entity_lexicon());

    let queries = ["book a flight to new york", "play jazz in the kitchen"];
    assert_eq!(loaded.transform(&queries)?, featurizer.transform(&queries)?);

    Ok(())
}

#[test]
fn test_snapshot_json_layout() -> Result<()> {
    let json = fitted_featurizer()?.to_snapshot().to_json()?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    for key in [
        "language",
        "config",
        "vectorizer",
        "selected_indices",
        "pvalue_threshold",
        "entity_lexicon",
        "unknown_token_replacement",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["language"], "en");
    assert_eq!(value["config"]["norm"], "l2");
    assert_eq!(
        value["entity_lexicon"]["pari"],
        serde_json::json!(["entityfeaturecity"])
    );

    let vocabulary = value["vectorizer"]["vocabulary"].as_object().unwrap();
    let idf = value["vectorizer"]["idf"].as_array().unwrap();
    assert_eq!(vocabulary.len(), idf.len());

    Ok(())
}

#[test]
fn test_truncated_snapshot_is_rejected() -> Result<()> {
    let json = fitted_featurizer()?.to_snapshot().to_json()?;
    let mut value: serde_json::Value = serde_json::from_str(&json)?;
    value["vectorizer"]["idf"]
        .as_array_mut()
        .unwrap()
        .truncate(1);

    let snapshot = FeaturizerSnapshot::from_value(value)?;
    assert!(matches!(
        Featurizer::from_snapshot(snapshot, resources()?),
        Err(FeaturizerError::MalformedSnapshot(_))
    ));

    Ok(())
}

#[test]
fn test_untrained_round_trip() -> Result<()> {
    let featurizer = Featurizer::new(Language::Ja, FeaturizerConfig::default(), resources()?);
    let temp_dir = TempDir::new()?;
    featurizer.persist(temp_dir.path())?;

    let loaded = Featurizer::from_path(temp_dir.path(), resources()?)?;
    assert_eq!(loaded.language(), Language::Ja);
    assert!(!loaded.is_fitted());
    assert!(matches!(
        loaded.transform(&["東京"]),
        Err(FeaturizerError::NotFitted(_))
    ));

    Ok(())
}
