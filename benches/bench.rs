// Criterion benchmarks for Partner Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use partner_match::core::{
    distance::{calculate_bounding_box, haversine_distance},
    matcher::rank_candidates,
    MAX_RESULT_LIMIT,
};
use partner_match::models::{Coordinate, Material, MatchQuery, Partner};

fn create_partner(id: usize, lat: f64, lon: f64) -> Partner {
    let material_count = 1 + id % 4;
    Partner {
        id: id as i64,
        categories: vec![],
        materials: (1..=material_count as i64)
            .map(|m| Material {
                id: m,
                description: format!("material {}", m),
            })
            .collect(),
        location: Coordinate { latitude: lat, longitude: lon },
        service_radius_km: 20.0 + (id % 50) as f64,
        rating: (id % 5) as i32,
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    let center = Coordinate { latitude: 40.7128, longitude: -74.0060 };
    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| calculate_bounding_box(black_box(center), black_box(50.0)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let origin = Coordinate { latitude: 40.7128, longitude: -74.0060 };
    let query = match MatchQuery::new([1, 2], origin) {
        Ok(query) => query,
        Err(e) => panic!("invalid benchmark query: {}", e),
    };

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 1000, 10000].iter() {
        let candidates: Vec<Partner> = (0..*candidate_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lon_offset = (i as f64 * 0.0007) % 0.5;
                create_partner(i, origin.latitude + lat_offset, origin.longitude + lon_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(candidate_count),
            &candidates,
            |b, candidates| {
                b.iter(|| rank_candidates(&query, black_box(candidates.clone()), MAX_RESULT_LIMIT));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_haversine_distance, bench_bounding_box, bench_ranking);
criterion_main!(benches);
