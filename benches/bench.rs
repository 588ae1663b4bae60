//! Criterion benchmarks for the intent featurizer.
//!
//! Covers the two hot paths of a featurizer's life:
//! - fitting on a labelled corpus (vectorization and chi-squared selection)
//! - transforming batches of utterances with a fitted instance

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use intent_featurizer::dataset::Dataset;
use intent_featurizer::featurizer::Featurizer;
use intent_featurizer::featurizer::config::FeaturizerConfig;
use intent_featurizer::language::Language;
use intent_featurizer::resources::BuiltinResources;

const INTENT_VOCABULARIES: [&[&str]; 4] = [
    &["book", "flight", "ticket", "airport", "travel", "depart"],
    &["play", "song", "music", "album", "artist", "playlist"],
    &["turn", "light", "lamp", "bright", "dim", "room"],
    &["weather", "rain", "forecast", "sunny", "cold", "tomorrow"],
];

const FILLERS: [&str; 8] = ["please", "the", "a", "to", "can", "you", "me", "now"];

/// Generate labelled utterances with a pseudo-random word distribution.
fn generate_corpus(count: usize) -> (Vec<String>, Vec<usize>) {
    let mut queries = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);
    for i in 0..count {
        let label = i % INTENT_VOCABULARIES.len();
        let words = INTENT_VOCABULARIES[label];
        let length = 4 + (i % 6);
        let query: Vec<&str> = (0..length)
            .map(|j| {
                if (i + j) % 3 == 0 {
                    FILLERS[(i * 7 + j * 13) % FILLERS.len()]
                } else {
                    words[(i * 5 + j * 11) % words.len()]
                }
            })
            .collect();
        queries.push(query.join(" "));
        labels.push(label);
    }
    (queries, labels)
}

fn dataset() -> Dataset {
    Dataset::new()
        .with_entity("room", ["kitchen", "living room", "bedroom"])
        .with_entity("city", ["paris", "new york", "london"])
}

fn featurizer() -> Featurizer {
    let resources = Arc::new(BuiltinResources::new().unwrap());
    Featurizer::new(Language::En, FeaturizerConfig::default(), resources)
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    group.sample_size(20);

    let dataset = dataset();
    for count in [100, 1000] {
        let (queries, labels) = generate_corpus(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("fit_{count}_queries"), |b| {
            b.iter_with_setup(featurizer, |mut featurizer| {
                let outcome = featurizer.fit(&dataset, black_box(&queries), &labels);
                let _ = black_box(outcome);
            })
        });
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    let (queries, labels) = generate_corpus(1000);
    let mut fitted = featurizer();
    let _ = fitted.fit(&dataset(), &queries, &labels);

    group.bench_function("transform_single_query", |b| {
        b.iter(|| black_box(fitted.transform(black_box(&queries[..1]))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("transform_batch", |b| {
        b.iter(|| black_box(fitted.transform(black_box(&queries[..100]))))
    });

    group.finish();
}

criterion_group!(benches, bench_fit, bench_transform);
criterion_main!(benches);
