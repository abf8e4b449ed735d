use preview_chart::api::{ChartConfig, ChartEngine};
use preview_chart::core::{ChartData, Series, Viewport};
use preview_chart::render::{DrawCommand, NullRenderer, RedrawRegion};

const DAY_MS: f64 = 86_400_000.0;
const START_MS: f64 = 1_551_916_800_000.0;

fn sample_data(samples: usize) -> ChartData {
    let timestamps: Vec<f64> = (0..samples).map(|i| START_MS + i as f64 * DAY_MS).collect();
    let joined: Vec<f64> = (0..samples)
        .map(|i| 100.0 + ((i * 37) % 90) as f64)
        .collect();
    let left: Vec<f64> = (0..samples).map(|i| 20.0 + ((i * 11) % 40) as f64).collect();
    ChartData::new(
        timestamps,
        vec![
            Series::with_hex_color("Joined", "#3DC23F", joined).expect("joined"),
            Series::with_hex_color("Left", "#F34C44", left).expect("left"),
        ],
    )
    .expect("valid chart data")
}

fn engine() -> ChartEngine<NullRenderer> {
    let config = ChartConfig::new(Viewport::new(1000, 900));
    ChartEngine::new(NullRenderer::default(), config, sample_data(100)).expect("engine init")
}

fn run(engine: &mut ChartEngine<NullRenderer>, ticks: usize) {
    for _ in 0..ticks {
        engine.tick(0.0).expect("tick");
    }
}

#[test]
fn first_tick_paints_every_region_in_order() {
    let mut engine = engine();
    let report = engine.tick(0.0).expect("tick");
    assert_eq!(report.frame_index, 0);
    assert_eq!(
        report.repainted.as_slice(),
        &[
            RedrawRegion::Preview,
            RedrawRegion::Plot,
            RedrawRegion::Buttons,
            RedrawRegion::Mark,
        ]
    );
    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_region_count, 4);
    assert!(renderer.last_text_count > 0);
}

#[test]
fn settled_chart_stops_repainting() {
    let mut engine = engine();
    run(&mut engine, 500);
    let rendered = engine.renderer().frames_rendered;
    let report = engine.tick(0.0).expect("tick");
    assert!(report.is_idle());
    assert_eq!(engine.renderer().frames_rendered, rendered);
    assert!(engine.dirty_regions().is_clean());
}

#[test]
fn theme_mix_change_repaints_everything() {
    let mut engine = engine();
    run(&mut engine, 500);
    let report = engine.tick(0.5).expect("tick");
    assert_eq!(report.repainted.len(), 4);
}

#[test]
fn resize_repaints_everything_and_rejects_empty_surfaces() {
    let mut engine = engine();
    run(&mut engine, 500);
    engine.resize(1200, 900).expect("resize");
    assert_eq!(engine.viewport(), Viewport::new(1200, 900));
    let report = engine.tick(0.0).expect("tick");
    assert_eq!(report.repainted.len(), 4);

    assert!(engine.resize(0, 900).is_err());
    assert_eq!(engine.viewport(), Viewport::new(1200, 900));
}

#[test]
fn window_opens_from_collapsed_start() {
    let mut engine = engine();
    assert_eq!(engine.window().current(), (0.0, 0.0));
    run(&mut engine, 1);
    let (_, end) = engine.window().current();
    assert!((end - 0.025).abs() <= 1e-12);
    run(&mut engine, 200);
    let (_, end) = engine.window().current();
    assert!((end - 0.1).abs() <= 1e-9);
}

#[test]
fn single_sample_chart_holds_the_plot() {
    let data = ChartData::new(
        vec![START_MS],
        vec![Series::with_hex_color("Only", "#3DC23F", vec![5.0]).expect("series")],
    )
    .expect("data");
    let config = ChartConfig::new(Viewport::new(800, 900));
    let mut engine = ChartEngine::new(NullRenderer::default(), config, data).expect("engine");

    for _ in 0..5 {
        let report = engine.tick(0.0).expect("degenerate ticks still succeed");
        assert!(!report.repainted.contains(&RedrawRegion::Plot));
        assert!(report.repainted.contains(&RedrawRegion::Preview));
    }
}

#[test]
fn series_toggle_fades_over_twenty_frames() {
    let mut engine = engine();
    run(&mut engine, 40);
    assert_eq!(engine.data().visibility()[0].opacity, 1.0);

    assert!(engine.toggle_series(0));
    assert!(!engine.data().is_enabled(0));
    for _ in 0..19 {
        engine.tick(0.0).expect("tick");
        assert!(engine.data().visibility()[0].opacity > 0.0);
    }
    run(&mut engine, 5);
    assert_eq!(engine.data().visibility()[0].opacity, 0.0);
    assert_eq!(engine.data().visibility()[0].button_progress, 1.0);

    assert!(engine.toggle_series(0));
    for _ in 0..19 {
        engine.tick(0.0).expect("tick");
        assert!(engine.data().visibility()[0].opacity < 1.0);
    }
    run(&mut engine, 5);
    assert_eq!(engine.data().visibility()[0].opacity, 1.0);
    assert_eq!(engine.data().visibility()[0].button_progress, 0.0);
}

#[test]
fn last_enabled_series_cannot_be_hidden() {
    let mut engine = engine();
    assert!(engine.toggle_series(1));
    assert!(!engine.toggle_series(0));
    assert!(engine.data().is_enabled(0));
    assert_eq!(engine.data().enabled_count(), 1);
}

#[test]
fn hidden_series_lowers_the_y_ceiling() {
    let mut engine = engine();
    run(&mut engine, 200);
    let with_both = engine.main_view().y_scale.target();

    assert!(engine.toggle_series(0));
    run(&mut engine, 200);
    let left_only = engine.main_view().y_scale.target();
    assert!(left_only < with_both);
    assert_eq!(engine.main_view().y_scale.current(), left_only);
}

#[test]
fn holding_the_pointer_over_the_plot_shows_the_mark() {
    let mut engine = engine();
    run(&mut engine, 200);

    engine.pointer_down(500.0, 300.0).expect("pointer down");
    let report = engine.tick(0.0).expect("tick");
    assert!(report.repainted.contains(&RedrawRegion::Mark));
    // 0..=99 samples across the [0, 0.1] window, pointer at mid-width
    assert_eq!(engine.mark().index, 5);

    run(&mut engine, 15);
    assert_eq!(engine.mark().alpha, 1.0);
    assert!(engine.renderer().last_text_count >= 5);

    engine.pointer_up();
    run(&mut engine, 15);
    assert_eq!(engine.mark().alpha, 0.0);
}

#[test]
fn mark_overlay_lists_enabled_series_only() {
    let mut engine = engine();
    run(&mut engine, 100);
    assert!(engine.toggle_series(1));
    engine.pointer_down(500.0, 300.0).expect("pointer down");
    run(&mut engine, 15);

    let frame = engine.advance_frame(0.0);
    let mark = frame.region(RedrawRegion::Mark).expect("mark region");
    let texts: Vec<&str> = mark
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect();
    assert!(texts.contains(&"Joined"));
    assert!(!texts.contains(&"Left"));
}

#[test]
fn non_finite_pointer_input_is_rejected() {
    let mut engine = engine();
    assert!(engine.pointer_move(f64::NAN, 1.0).is_err());
    assert!(engine.pointer_down(1.0, f64::INFINITY).is_err());
    assert!(!engine.pointer().is_down);
}

#[test]
fn hiding_a_series_crossfades_gridline_sets() {
    let mut engine = engine();
    run(&mut engine, 200);
    assert_eq!(engine.main_view().gridlines.sets().len(), 1);
    let settled_target = engine.main_view().gridlines.live().target;

    assert!(engine.toggle_series(0));
    let mut longest_queue = 1;
    for _ in 0..60 {
        engine.tick(0.0).expect("tick");
        longest_queue = longest_queue.max(engine.main_view().gridlines.sets().len());
    }

    assert_eq!(longest_queue, 2);
    let gridlines = &engine.main_view().gridlines;
    assert_eq!(gridlines.sets().len(), 1);
    assert!(gridlines.live().target < settled_target);
    assert_eq!(gridlines.live().alpha, 1.0);
}
