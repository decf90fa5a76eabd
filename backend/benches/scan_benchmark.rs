use std::hint::black_box;

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use qtty::{Degrees, Meters};

use pccp_watch::config::{SiteConfig, WatchConfig};
use pccp_watch::db::LocalStateRepository;
use pccp_watch::models::CelestialObject;
use pccp_watch::parsing::parse_catalog_str;
use pccp_watch::services::{current_night, run_cycle, scan_object, sidereal_time, ScanParameters};

fn site() -> SiteConfig {
    SiteConfig {
        longitude: Degrees::new(7.07181),
        latitude: Degrees::new(43.6),
        elevation: Meters::new(50.0),
        min_alt_obj: Degrees::new(20.0),
        max_sun_alt: Degrees::new(-12.0),
        max_mag: 21.0,
    }
}

fn catalog(count: usize) -> Vec<CelestialObject> {
    (0..count)
        .map(|i| {
            CelestialObject::new(
                format!("P{:05}", i),
                Degrees::new((i as f64 * 13.7) % 360.0),
                Degrees::new((i as f64 * 7.3) % 140.0 - 60.0),
                18.0 + (i % 5) as f64,
            )
        })
        .collect()
}

fn bench_sidereal_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinates");
    let t = Utc.with_ymd_and_hms(2026, 1, 15, 22, 0, 0).unwrap();

    group.bench_function("sidereal_time", |b| {
        b.iter(|| sidereal_time(black_box(t), black_box(Degrees::new(7.07181))));
    });

    group.finish();
}

fn bench_object_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility_scan");
    let site = site();
    let start = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
    let params = ScanParameters::default();
    let night = current_night(&site, start, &params);
    let object = CelestialObject::new("Z", Degrees::new(152.6), Degrees::new(43.6), 18.5);

    group.bench_function("current_night", |b| {
        b.iter(|| current_night(black_box(&site), black_box(start), &params));
    });
    group.bench_function("scan_object", |b| {
        b.iter(|| scan_object(black_box(&object), &site, start, &params, night.as_ref()));
    });

    group.finish();
}

fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("watch_cycle");
    let config = WatchConfig::for_site(site());
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 22, 0, 0).unwrap();

    for size in [10usize, 100] {
        let objects = catalog(size);
        group.bench_with_input(BenchmarkId::new("first_run", size), &objects, |b, objects| {
            b.iter(|| {
                let repo = LocalStateRepository::new();
                run_cycle(&config, black_box(objects), &repo, None, now)
            });
        });
    }

    group.finish();
}

fn bench_catalog_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_parsing");
    let text: String = (0..200)
        .map(|i| {
            format!(
                "P{:05}  {:>3} 2026 01 15.4  {:>2}.{:04}  +{:02}.{:03}  19.5 Updated Jan. 15.84 UT   5   0.12  5.3  0.113\n",
                i,
                i % 100,
                i % 24,
                (i * 37) % 10_000,
                i % 60,
                (i * 11) % 1000
            )
        })
        .collect();

    group.bench_function("parse_200_lines", |b| {
        b.iter(|| parse_catalog_str(black_box(&text)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sidereal_time,
    bench_object_scan,
    bench_full_cycle,
    bench_catalog_parsing
);
criterion_main!(benches);
