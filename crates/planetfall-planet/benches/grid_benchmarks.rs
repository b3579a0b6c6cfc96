use criterion::{Criterion, black_box, criterion_group, criterion_main};
use planetfall_planet::*;

fn bench_strip_indices(c: &mut Criterion) {
    c.bench_function("strip_indices_128", |bencher| {
        bencher.iter(|| black_box(strip_indices(black_box(128)).unwrap()))
    });
}

fn bench_terrain_face(c: &mut Criterion) {
    let params = PlanetParams::default();
    let surface = params.terrain_surface();
    let patch = CubeFace::PosX.patch();
    c.bench_function("terrain_face_64", |bencher| {
        bencher.iter(|| black_box(build_grid_mesh(64, patch, &surface)))
    });
}

fn bench_atmosphere_face(c: &mut Criterion) {
    let params = PlanetParams::default();
    let patch = CubeFace::NegZ.patch();
    c.bench_function("atmosphere_face_64", |bencher| {
        bencher.iter(|| black_box(build_atmosphere_mesh(&params, patch)))
    });
}

fn bench_full_planet(c: &mut Criterion) {
    let params = PlanetParams {
        resolution: 32,
        ..Default::default()
    };
    c.bench_function("planet_six_faces_32", |bencher| {
        bencher.iter(|| black_box(build_planet(&params)))
    });
}

criterion_group!(
    benches,
    bench_strip_indices,
    bench_terrain_face,
    bench_atmosphere_face,
    bench_full_planet
);
criterion_main!(benches);
