//! Benchmarks for filtering and ranking
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic candidate set shaped like a multi-seed expansion.

use catalog::{CatalogEntity, GenreTable, MediaKind};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::{FilterCriteria, FilterPipeline, Ranker};
use sources::Candidate;
use std::sync::Arc;

const GENRE_IDS: [u32; 6] = [18, 28, 35, 80, 878, 10765];

fn synthetic_candidates(count: u64) -> Vec<Candidate> {
    (0..count)
        .map(|i| {
            let year = 1970 + (i % 55);
            let vote = (i % 100) as f32 / 10.0;
            let genre = GENRE_IDS[(i % GENRE_IDS.len() as u64) as usize];
            let kind = if i % 3 == 0 { MediaKind::Show } else { MediaKind::Movie };
            Candidate::new(
                // every id appears twice to exercise dedup
                CatalogEntity::new(i / 2, format!("Title {}", i), vote)
                    .with_release_date(format!("{}-01-01", year))
                    .with_genres(vec![genre]),
                kind,
                "seed",
            )
        })
        .collect()
}

fn bench_filter_pipeline(c: &mut Criterion) {
    let pipeline = FilterPipeline::standard(Arc::new(GenreTable::standard()));
    let criteria = FilterCriteria::new(1990, 2023, 6.0, ["Drama", "Crime"]).unwrap();
    let candidates = synthetic_candidates(2_000);

    c.bench_function("filter_pipeline_standard", |b| {
        b.iter(|| {
            let filtered = pipeline.apply(black_box(candidates.clone()), black_box(&criteria));
            black_box(filtered)
        })
    });
}

fn bench_ranker(c: &mut Criterion) {
    let ranker = Ranker::default();
    let candidates = synthetic_candidates(2_000);

    c.bench_function("ranker_finalize", |b| {
        b.iter(|| {
            let ranked = ranker.finalize(black_box(candidates.clone()));
            black_box(ranked)
        })
    });
}

criterion_group!(benches, bench_filter_pipeline, bench_ranker);
criterion_main!(benches);
