//! Benchmark for user-similarity matrix construction.
//!
//! Matrix construction is rebuilt on every recommendation request, so it is
//! the dominant per-request cost and the thing to watch when tuning.
//!
//! Run with: cargo bench -p recommender

use catalog::{Movie, Rating, RatingsStore};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use recommender::UserSimilarity;

/// Deterministic synthetic store: `users` users, `movies` movies, each
/// user rating a strided subset so the matrix is sparse but non-degenerate.
fn synthetic_store(users: u32, movies: u32) -> RatingsStore {
    let mut store = RatingsStore::new();
    for id in 1..=movies {
        store.insert_movie(Movie {
            id,
            title: format!("Movie {} ({})", id, 1990 + (id % 30)),
            genres: vec!["Drama".to_string()],
        });
    }
    for user_id in 1..=users {
        // Each user rates ~20 movies with varying values.
        for step in 0..20u32 {
            let movie_id = 1 + (user_id * 7 + step * 13) % movies;
            let rating = 1.0 + ((user_id + step * 3) % 9) as f32 * 0.5;
            store.insert_rating(Rating {
                user_id,
                movie_id,
                rating,
            });
        }
    }
    store
}

fn bench_similarity_build(c: &mut Criterion) {
    let small = synthetic_store(100, 200);
    let medium = synthetic_store(500, 500);

    c.bench_function("similarity_build_100_users", |b| {
        b.iter(|| UserSimilarity::build(black_box(&small)))
    });

    c.bench_function("similarity_build_500_users", |b| {
        b.iter(|| UserSimilarity::build(black_box(&medium)))
    });
}

criterion_group!(benches, bench_similarity_build);
criterion_main!(benches);
