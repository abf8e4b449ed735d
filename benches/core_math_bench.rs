use preview_chart::api::{ChartConfig, ChartEngine};
use preview_chart::core::{ChartData, Series, Viewport, VisibleSlice, nice_step};
use preview_chart::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn daily_data(count: usize) -> ChartData {
    let timestamps: Vec<f64> = (0..count)
        .map(|i| 1_546_300_800_000.0 + i as f64 * 86_400_000.0)
        .collect();
    let wave = |phase: f64| -> Vec<f64> {
        (0..count)
            .map(|i| 500.0 + 400.0 * ((i as f64) * 0.01 + phase).sin())
            .collect()
    };
    let series = vec![
        Series::with_hex_color("Joined", "#3DC23F", wave(0.0)).expect("valid series"),
        Series::with_hex_color("Left", "#F34C44", wave(1.5)).expect("valid series"),
    ];
    ChartData::new(timestamps, series).expect("valid generated data")
}

fn bench_nice_step(c: &mut Criterion) {
    c.bench_function("nice_step", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for max_y in [7.0, 93.0, 1_234.0, 56_789.0, 2_500_000.0] {
                acc += nice_step(black_box(max_y));
            }
            acc
        })
    });
}

fn bench_visible_slice_10k(c: &mut Criterion) {
    let data = daily_data(10_000);
    let timestamps = data.timestamps();
    let values = &data.series()[0].values;

    c.bench_function("visible_slice_resolve_max_10k", |b| {
        b.iter(|| {
            let slice = VisibleSlice::resolve(black_box(timestamps), 0.25, 0.75)
                .expect("non-degenerate range");
            slice.max_value(timestamps, black_box(values))
        })
    });
}

fn bench_engine_drag_tick_10k(c: &mut Criterion) {
    let config = ChartConfig::new(Viewport::new(1000, 900)).with_initial_window(0.3, 0.6);
    let mut engine =
        ChartEngine::new(NullRenderer::default(), config, daily_data(10_000)).expect("engine init");
    for _ in 0..30 {
        let _ = engine.advance_frame(0.0);
    }
    engine.pointer_down(500.0, 705.0).expect("finite pointer");
    let mut x = 500.0;

    c.bench_function("engine_drag_tick_10k", |b| {
        b.iter(|| {
            x = if x > 700.0 { 300.0 } else { x + 3.0 };
            engine.pointer_move(x, 705.0).expect("finite pointer");
            black_box(engine.advance_frame(black_box(0.0)))
        })
    });
}

criterion_group!(
    benches,
    bench_nice_step,
    bench_visible_slice_10k,
    bench_engine_drag_tick_10k
);
criterion_main!(benches);
