use approx::assert_abs_diff_eq;
use preview_chart::api::{ChartConfig, ChartEngine, GestureConfig};
use preview_chart::core::{ChartData, Series, Viewport};
use preview_chart::interaction::{DragState, HandlePriority};
use preview_chart::render::{NullRenderer, RedrawRegion};

// 1000 px wide: preview strip spans x = 20..980, handles move over 950 px.
const WIDTH: u32 = 1000;
const PREVIEW_MID_Y: f64 = 705.0;

fn data() -> ChartData {
    let timestamps: Vec<f64> = (0..200).map(|i| f64::from(i) * 1_000.0).collect();
    let values: Vec<f64> = (0..200).map(|i| 10.0 + f64::from(i % 17)).collect();
    let other: Vec<f64> = (0..200).map(|i| 5.0 + f64::from(i % 7)).collect();
    ChartData::new(
        timestamps,
        vec![
            Series::with_hex_color("A", "#3DC23F", values).expect("series a"),
            Series::with_hex_color("B", "#F34C44", other).expect("series b"),
        ],
    )
    .expect("data")
}

fn engine_with_window(start: f64, end: f64) -> ChartEngine<NullRenderer> {
    let config = ChartConfig::new(Viewport::new(WIDTH, 900)).with_initial_window(start, end);
    ChartEngine::new(NullRenderer::default(), config, data()).expect("engine init")
}

/// Pixel X whose pointer fraction is `fraction`.
fn x_for_fraction(fraction: f64) -> f64 {
    20.0 + fraction * 960.0
}

#[test]
fn left_handle_drag_clamps_against_the_right_edge() {
    let mut engine = engine_with_window(0.5, 0.95);
    // left handle drawn at 20 + 0.5 * 950 = 495, hit zone 485..525
    engine.pointer_down(500.0, PREVIEW_MID_Y).expect("down");
    engine.tick(0.0).expect("tick");
    assert_eq!(engine.gesture().drag(), DragState::LeftHandle);
    assert_abs_diff_eq!(engine.window().target().0, 0.5, epsilon = 1e-12);

    engine.pointer_move(x_for_fraction(0.9), PREVIEW_MID_Y).expect("move");
    engine.tick(0.0).expect("tick");
    let (start, end) = engine.window().target();
    assert_abs_diff_eq!(start, 0.85, epsilon = 1e-9);
    assert_abs_diff_eq!(end, 0.95, epsilon = 1e-12);

    engine.pointer_move(-500.0, PREVIEW_MID_Y).expect("move");
    engine.tick(0.0).expect("tick");
    assert_eq!(engine.window().target().0, 0.0);

    engine.pointer_up();
    engine.tick(0.0).expect("tick");
    assert_eq!(engine.gesture().drag(), DragState::None);
}

#[test]
fn right_handle_drag_keeps_the_minimum_span() {
    let mut engine = engine_with_window(0.2, 0.6);
    // right handle at 20 + 0.6 * 950 = 590, hit zone 580..620
    engine.pointer_down(600.0, PREVIEW_MID_Y).expect("down");
    engine.tick(0.0).expect("tick");
    assert_eq!(engine.gesture().drag(), DragState::RightHandle);

    engine.pointer_move(0.0, PREVIEW_MID_Y).expect("move");
    engine.tick(0.0).expect("tick");
    let (start, end) = engine.window().target();
    assert_abs_diff_eq!(end - start, 0.1, epsilon = 1e-9);

    engine.pointer_move(5_000.0, PREVIEW_MID_Y).expect("move");
    engine.tick(0.0).expect("tick");
    assert_eq!(engine.window().target().1, 1.0);
}

#[test]
fn center_drag_preserves_span_and_stays_inside() {
    let mut engine = engine_with_window(0.2, 0.5);
    // body spans 225..495 between the handles
    engine.pointer_down(360.0, PREVIEW_MID_Y).expect("down");
    engine.tick(0.0).expect("tick");
    assert_eq!(engine.gesture().drag(), DragState::Center);

    engine.pointer_move(5_000.0, PREVIEW_MID_Y).expect("move");
    engine.tick(0.0).expect("tick");
    let (start, end) = engine.window().target();
    assert_abs_diff_eq!(end, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(end - start, 0.3, epsilon = 1e-9);

    engine.pointer_move(-5_000.0, PREVIEW_MID_Y).expect("move");
    engine.tick(0.0).expect("tick");
    let (start, end) = engine.window().target();
    assert_abs_diff_eq!(start, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(end - start, 0.3, epsilon = 1e-9);
}

#[test]
fn drag_keeps_the_grab_offset() {
    let mut engine = engine_with_window(0.2, 0.5);
    engine.pointer_down(300.0, PREVIEW_MID_Y).expect("down");
    engine.tick(0.0).expect("tick");
    let before = engine.window().target();

    // moving the pointer by 96 px shifts the window by 0.1
    engine.pointer_move(396.0, PREVIEW_MID_Y).expect("move");
    engine.tick(0.0).expect("tick");
    let after = engine.window().target();
    assert_abs_diff_eq!(after.0 - before.0, 0.1, epsilon = 1e-9);
    assert_abs_diff_eq!(after.1 - before.1, 0.1, epsilon = 1e-9);
}

#[test]
fn dragging_arms_plot_and_preview() {
    let mut engine = engine_with_window(0.2, 0.5);
    for _ in 0..500 {
        engine.tick(0.0).expect("tick");
    }
    engine.pointer_down(300.0, PREVIEW_MID_Y).expect("down");
    engine.tick(0.0).expect("tick");
    engine.pointer_move(350.0, PREVIEW_MID_Y).expect("move");
    let report = engine.tick(0.0).expect("tick");
    assert!(report.repainted.contains(&RedrawRegion::Plot));
    assert!(report.repainted.contains(&RedrawRegion::Preview));
}

#[test]
fn narrow_window_overlap_follows_handle_priority() {
    let config = ChartConfig::new(Viewport::new(WIDTH, 900))
        .with_initial_window(0.4, 0.5)
        .with_gesture(GestureConfig {
            priority: HandlePriority::CenterFirst,
            ..GestureConfig::default()
        });
    let mut center_first =
        ChartEngine::new(NullRenderer::default(), config, data()).expect("engine");
    let mut handles_first = engine_with_window(0.4, 0.5);

    // left zone 390..430 overlaps the body starting at 410
    for engine in [&mut center_first, &mut handles_first] {
        engine.pointer_down(420.0, PREVIEW_MID_Y).expect("down");
        engine.tick(0.0).expect("tick");
    }
    assert_eq!(center_first.gesture().drag(), DragState::Center);
    assert_eq!(handles_first.gesture().drag(), DragState::LeftHandle);
}

#[test]
fn press_and_release_in_one_tick_never_leaves_a_drag() {
    let mut engine = engine_with_window(0.5, 0.95);
    engine.pointer_down(500.0, PREVIEW_MID_Y).expect("down");
    engine.pointer_up();
    engine.tick(0.0).expect("tick");
    assert_eq!(engine.gesture().drag(), DragState::None);
    assert!(!engine.pointer().went_down && !engine.pointer().went_up);
}

#[test]
fn clicking_a_button_toggles_its_series() {
    let mut engine = engine_with_window(0.0, 0.1);
    // second button: x = 20 + 155 = 175..300, y = 770..840
    engine.pointer_down(200.0, 800.0).expect("down");
    engine.pointer_up();
    let report = engine.tick(0.0).expect("tick");
    assert!(!engine.data().is_enabled(1));
    assert!(report.repainted.contains(&RedrawRegion::Buttons));

    // the remaining series refuses to go
    engine.pointer_down(60.0, 800.0).expect("down");
    engine.pointer_up();
    engine.tick(0.0).expect("tick");
    assert!(engine.data().is_enabled(0));
}
