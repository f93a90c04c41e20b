use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::{DMat4, DVec3};

use tellus_lod::{FrustumLens, LodTables};
use tellus_planet::{PlanetConfig, ViewState, generate_pass};

const RADIUS: f64 = 6371.0;

fn bench_config(max_level: u8) -> PlanetConfig {
    PlanetConfig {
        radius: RADIUS,
        max_level,
        ..Default::default()
    }
}

fn bench_view(eye: DVec3) -> ViewState {
    ViewState {
        eye,
        target: DVec3::ZERO,
        up: DVec3::Y,
        lens: FrustumLens {
            fov_y: 45f64.to_radians(),
            aspect: 16.0 / 9.0,
            near: 1.0,
            far: RADIUS * 20.0,
        },
        viewport_width: 1920.0,
    }
}

fn bench_tables(config: &PlanetConfig, view: &ViewState) -> LodTables {
    LodTables::build(
        config.radius,
        config.max_altitude,
        view.lens.fov_y,
        view.viewport_width,
        48.0,
    )
}

fn bench_pass_orbital(c: &mut Criterion) {
    let config = bench_config(6);
    let view = bench_view(DVec3::new(RADIUS * 3.0, 0.0, 0.0));
    let tables = bench_tables(&config, &view);

    c.bench_function("generate_pass_orbital", |bencher| {
        bencher.iter(|| {
            black_box(generate_pass(
                black_box(&config),
                black_box(&view),
                &DMat4::IDENTITY,
                &tables,
                64,
            ))
        })
    });
}

fn bench_pass_low_orbit(c: &mut Criterion) {
    let config = bench_config(9);
    let view = bench_view(DVec3::new(RADIUS * 1.05, 0.0, 0.0));
    let tables = bench_tables(&config, &view);

    c.bench_function("generate_pass_low_orbit", |bencher| {
        bencher.iter(|| {
            black_box(generate_pass(
                black_box(&config),
                black_box(&view),
                &DMat4::IDENTITY,
                &tables,
                64,
            ))
        })
    });
}

fn bench_table_rebuild(c: &mut Criterion) {
    let config = bench_config(6);
    let view = bench_view(DVec3::new(RADIUS * 3.0, 0.0, 0.0));

    c.bench_function("lod_tables_build", |bencher| {
        bencher.iter(|| black_box(bench_tables(black_box(&config), black_box(&view))))
    });
}

criterion_group!(
    benches,
    bench_pass_orbital,
    bench_pass_low_orbit,
    bench_table_rebuild
);
criterion_main!(benches);
