// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use multiview_embed::{DetectorConfig, EmbedDetector, FrameProbe};

fn loaded_detector(devices: u32) -> EmbedDetector<u32> {
    let mut detector = EmbedDetector::new(DetectorConfig::default());
    for id in 0..devices {
        detector.track(id);
    }
    detector.set_target("https://example.com").unwrap();
    for id in 0..devices {
        detector.on_load(&id, u64::from(id));
    }
    detector
}

fn bench_reload_storm(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector/reload");

    // Every reload cancels the device's pending timer before scheduling a new one.
    for devices in [8u32, 64, 512] {
        group.throughput(Throughput::Elements(u64::from(devices)));
        group.bench_with_input(BenchmarkId::from_parameter(devices), &devices, |b, &n| {
            b.iter_batched(
                || loaded_detector(n),
                |mut detector| {
                    for id in 0..n {
                        detector.on_load(&id, 1_000 + u64::from(id));
                    }
                    black_box(detector);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_classify_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector/advance");

    for devices in [8u32, 64, 512] {
        group.throughput(Throughput::Elements(u64::from(devices)));
        group.bench_with_input(BenchmarkId::from_parameter(devices), &devices, |b, &n| {
            b.iter_batched(
                || loaded_detector(n),
                |mut detector| {
                    let out = detector.advance(u64::MAX, &|_: &u32| FrameProbe::cross_origin());
                    black_box(out);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reload_storm, bench_classify_all);
criterion_main!(benches);
