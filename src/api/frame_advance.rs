use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::{ChartData, VisibleSlice};
use crate::error::ChartResult;
use crate::render::{RedrawRegion, RenderFrame, Renderer};

use super::ChartEngine;

/// Outcome of one [`ChartEngine::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Index of the tick that just completed.
    pub frame_index: u64,
    /// Regions handed to the renderer, in paint order.
    pub repainted: SmallVec<[RedrawRegion; 4]>,
}

impl TickReport {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.repainted.is_empty()
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Runs one frame and hands the repainted regions to the renderer.
    ///
    /// `theme_mix` is the host's light/dark blend for this frame
    /// (`0` light, `1` dark).
    pub fn tick(&mut self, theme_mix: f64) -> ChartResult<TickReport> {
        let frame_index = self.frame_index;
        let frame = self.advance_frame(theme_mix);
        if !frame.is_empty() {
            self.renderer.render(&frame)?;
        }
        Ok(TickReport {
            frame_index,
            repainted: frame.regions.iter().map(|region| region.region).collect(),
        })
    }

    /// Advances every animation by one frame, consumes pending pointer edges
    /// and returns the commands for the regions that are dirty.
    ///
    /// This is [`ChartEngine::tick`] without the renderer call, for hosts
    /// that want to inspect or forward the frame themselves.
    pub fn advance_frame(&mut self, theme_mix: f64) -> RenderFrame {
        let theme_mix = self.apply_theme_mix(theme_mix);
        let tuning = self.config.animation;

        self.window.advance(tuning.window_smoothing_divisor);
        if self
            .data
            .step_visibility(tuning.series_opacity_step, tuning.button_progress_step)
        {
            self.invalidate(RedrawRegion::Plot);
            self.invalidate(RedrawRegion::Preview);
            self.invalidate(RedrawRegion::Buttons);
        }

        let plot_slice = self.update_main_view();
        self.update_preview_view();
        self.process_pointer_input();

        let frame = self.build_render_frame(theme_mix, plot_slice);

        self.dirty.decrement();
        self.frame_index += 1;
        self.pointer.clear_edges();
        frame
    }

    fn apply_theme_mix(&mut self, theme_mix: f64) -> f64 {
        let theme_mix = if theme_mix.is_finite() {
            theme_mix.clamp(0.0, 1.0)
        } else {
            self.last_theme_mix.unwrap_or(0.0)
        };
        if self.last_theme_mix.is_some_and(|last| last != theme_mix) {
            self.invalidate_all();
        }
        self.last_theme_mix = Some(theme_mix);
        theme_mix
    }

    /// Eases the main plot's Y ceiling, gridlines and label density toward
    /// the current window. Returns `None` when the visible range is
    /// degenerate and the plot must hold its last frame.
    fn update_main_view(&mut self) -> Option<VisibleSlice> {
        let (start, end) = self.window.current();
        let Some(slice) = VisibleSlice::resolve(self.data.timestamps(), start, end) else {
            if !self.holding_plot {
                warn!(
                    start,
                    end,
                    samples = self.data.count(),
                    "degenerate visible range, holding last plot frame"
                );
            }
            self.holding_plot = true;
            return None;
        };
        self.holding_plot = false;

        let tuning = self.config.animation;
        let max_y = self.data.max_y();
        let ceiling = enabled_ceiling(&self.data, slice);

        let view = &mut self.main_view;
        view.y_scale.step();
        let retargeted = view.y_scale.retarget(ceiling / max_y);
        view.gridlines.step();
        let pushed = view.maybe_push_gridlines(
            max_y,
            tuning.grid,
            tuning.gridline_cadence,
            self.frame_index,
            self.pointer.went_up,
        );
        let desired_level = view.labels.desired_level(slice.visible_interval_count());
        view.labels.step(desired_level);

        if retargeted {
            trace!(
                target = self.main_view.y_scale.target(),
                current = self.main_view.y_scale.current(),
                "main y-scale retarget"
            );
        }
        if retargeted || pushed {
            self.invalidate(RedrawRegion::Plot);
        }
        Some(slice)
    }

    fn update_preview_view(&mut self) {
        let Some(slice) = VisibleSlice::resolve(self.data.timestamps(), 0.0, 1.0) else {
            return;
        };
        let ceiling = enabled_ceiling(&self.data, slice);
        let max_y = self.data.max_y();

        let y_scale = &mut self.preview_view.y_scale;
        y_scale.step();
        if y_scale.retarget(ceiling / max_y) {
            self.invalidate(RedrawRegion::Preview);
        }
    }
}

/// Largest value of the enabled series inside `slice`, boundary values
/// included. `-inf` when no series is enabled.
fn enabled_ceiling(data: &ChartData, slice: VisibleSlice) -> f64 {
    let timestamps = data.timestamps();
    data.series()
        .iter()
        .zip(data.visibility())
        .filter(|(_, visibility)| visibility.enabled)
        .map(|(series, _)| slice.max_value(timestamps, &series.values))
        .fold(f64::NEG_INFINITY, f64::max)
}
