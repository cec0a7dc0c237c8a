// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use multiview_device::DeviceCatalog;
use multiview_scale::{Orientation, ScalingEngine, ViewMode};
use multiview_session::PreviewSession;

fn bench_engine(c: &mut Criterion) {
    let catalog = DeviceCatalog::builtin();
    let engine = ScalingEngine::default();
    let mut group = c.benchmark_group("geometry/engine");
    group.throughput(Throughput::Elements(catalog.len() as u64));

    for (name, orientation, view_mode) in [
        ("grid_portrait", Orientation::Portrait, ViewMode::Grid),
        ("single_landscape", Orientation::Landscape, ViewMode::Single),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                for profile in &catalog {
                    let g = engine
                        .geometry(profile, orientation, view_mode, black_box(1.25), false)
                        .unwrap();
                    black_box(g.pixel_size());
                }
            });
        });
    }
    group.finish();
}

fn bench_frame_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/frames");

    // Planning allocates one entry per visible device; focus collapses it to one.
    for focused in [false, true] {
        let mut session = PreviewSession::builtin().unwrap();
        session.select_all();
        if focused {
            session.focus("ipad-pro").unwrap();
        }
        group.bench_with_input(
            BenchmarkId::new("frames", if focused { "focused" } else { "all" }),
            &session,
            |b, session| {
                b.iter(|| black_box(session.frames().unwrap()));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_engine, bench_frame_plan);
criterion_main!(benches);
