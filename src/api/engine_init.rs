use tracing::debug;

use crate::core::{ChartData, PreviewWindow, ViewAnimation};
use crate::error::ChartResult;
use crate::interaction::{GestureState, MarkState, PointerState};
use crate::render::Renderer;

use super::{AnimationTuning, ChartConfig, ChartEngine, DirtyRegions};

impl<R: Renderer> ChartEngine<R> {
    /// Creates a fully initialized engine for one chart.
    ///
    /// Every region starts dirty for the configured initial window so the
    /// first frames paint the whole surface.
    pub fn new(renderer: R, config: ChartConfig, data: ChartData) -> ChartResult<Self> {
        config.validate()?;
        let window = PreviewWindow::new(
            config.initial_window.start,
            config.initial_window.end,
            config.gesture.min_span,
        )?;

        let mut dirty = DirtyRegions::default();
        dirty.arm_all(config.redraw.initial_frames);

        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            samples = data.count(),
            series = data.series().len(),
            max_y = data.max_y(),
            "chart engine created"
        );

        Ok(Self {
            renderer,
            main_view: view_animation(&config.animation),
            preview_view: view_animation(&config.animation),
            config,
            data,
            window,
            gesture: GestureState::default(),
            mark: MarkState::default(),
            pointer: PointerState::default(),
            dirty,
            frame_index: 0,
            last_theme_mix: None,
            holding_plot: false,
        })
    }
}

fn view_animation(tuning: &AnimationTuning) -> ViewAnimation {
    ViewAnimation::new(
        tuning.y_scale_steps,
        tuning.gridline_fade_step,
        tuning.label_levels,
        tuning.label_fade_step,
        tuning.target_label_count,
    )
}
