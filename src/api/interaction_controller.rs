use tracing::debug;

use crate::core::{Rect, Viewport, sample_index_at};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragState, PreviewHitZones};
use crate::render::{RedrawRegion, Renderer};

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Records the pointer position in surface pixels.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        validate_pointer(x, y)?;
        self.pointer.on_move(x, y);
        Ok(())
    }

    /// Records a button press; the edge is consumed by the next tick.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> ChartResult<()> {
        validate_pointer(x, y)?;
        self.pointer.on_down(x, y);
        Ok(())
    }

    /// Records a button release, wherever it happened.
    pub fn pointer_up(&mut self) {
        self.pointer.on_up();
    }

    /// Applies a new surface size and repaints every region for the resize
    /// window.
    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport { width, height });
        }
        self.config.viewport = viewport;
        self.dirty.arm_all(self.config.redraw.resize_frames);
        debug!(width, height, "chart resized");
        Ok(())
    }

    /// Flips a series on or off, refusing to hide the last visible one.
    ///
    /// Returns `true` when the flag changed.
    pub fn toggle_series(&mut self, index: usize) -> bool {
        if !self.data.toggle(index) {
            return false;
        }
        self.invalidate(RedrawRegion::Preview);
        self.invalidate(RedrawRegion::Plot);
        self.invalidate(RedrawRegion::Buttons);
        debug!(
            series = index,
            enabled = self.data.is_enabled(index),
            "series toggled"
        );
        true
    }

    /// Hit zones of the preview window at its target position.
    #[must_use]
    pub fn preview_hit_zones(&self) -> PreviewHitZones {
        let layout = self.config.layout;
        let gesture = self.config.gesture;
        let viewport = self.config.viewport;
        let (start, end) = self.window.target();
        let start_x = layout.vignette_x(viewport, start);
        let end_x = layout.vignette_x(viewport, end);
        let handle_zone = |x: f64| {
            Rect::new(
                x - gesture.handle_zone_margin,
                layout.preview_y,
                gesture.handle_zone_width,
                layout.preview_height,
            )
        };
        PreviewHitZones {
            left_handle: handle_zone(start_x),
            right_handle: handle_zone(end_x),
            center: Rect::new(
                start_x + layout.vignette_handle_width,
                layout.preview_y,
                end_x - start_x - layout.vignette_handle_width,
                layout.preview_height,
            ),
        }
    }

    /// Index of the series button under `(x, y)`.
    #[must_use]
    pub fn button_at(&self, x: f64, y: f64) -> Option<usize> {
        let layout = self.config.layout;
        (0..self.data.series().len()).find(|index| layout.button_rect(*index).contains(x, y))
    }

    /// Consumes this tick's pointer edges: starts or ends drags, toggles
    /// series, moves the window under an active drag and updates the mark.
    pub(super) fn process_pointer_input(&mut self) {
        let pointer = self.pointer;
        let viewport = self.config.viewport;
        let layout = self.config.layout;
        let pointer_fraction = layout.pointer_fraction(viewport, pointer.x);

        if pointer.went_down {
            let drag =
                self.preview_hit_zones()
                    .classify(pointer.x, pointer.y, self.config.gesture.priority);
            let reference = match drag {
                DragState::None => None,
                DragState::LeftHandle => Some(self.window.target().0),
                DragState::RightHandle => Some(self.window.target().1),
                DragState::Center => Some(self.window.target_midpoint()),
            };
            if let Some(reference) = reference {
                self.gesture.begin(drag, pointer_fraction, reference);
                debug!(?drag, pointer_fraction, reference, "drag started");
            } else if let Some(index) = self.button_at(pointer.x, pointer.y) {
                self.toggle_series(index);
            }
        }

        if self.gesture.is_dragging() {
            self.apply_drag(pointer_fraction);
        }

        if pointer.went_up && self.gesture.is_dragging() {
            debug!(drag = ?self.gesture.drag(), "drag ended");
            self.gesture.end();
        }

        self.update_mark();
    }

    fn apply_drag(&mut self, pointer_fraction: f64) {
        let before = self.window.target();
        let fraction = self.gesture.feature_fraction(pointer_fraction);
        match self.gesture.drag() {
            DragState::None => return,
            DragState::LeftHandle => self.window.drag_start_to(fraction),
            DragState::RightHandle => self.window.drag_end_to(fraction),
            DragState::Center => self.window.drag_center_to(fraction),
        }
        if self.window.target() != before {
            self.invalidate(RedrawRegion::Plot);
            self.invalidate(RedrawRegion::Preview);
        }
    }

    /// Holding the pointer over the plot selects the nearest sample and fades
    /// the tooltip in; anything else fades it out.
    fn update_mark(&mut self) {
        let pointer = self.pointer;
        let viewport = self.config.viewport;
        let step = self.config.animation.mark_alpha_step;
        let hovering = !self.gesture.is_dragging()
            && pointer.is_down
            && self.config.layout.hover_rect(viewport).contains(pointer.x, pointer.y);

        if hovering {
            let (start, end) = self.window.target();
            self.mark.index =
                sample_index_at(self.data.count(), start, end, pointer.x / viewport.width_px());
            self.mark.fade_in(step);
            self.invalidate(RedrawRegion::Mark);
        } else if self.mark.is_visible() {
            self.mark.fade_out(step);
            self.invalidate(RedrawRegion::Mark);
        }
    }
}

fn validate_pointer(x: f64, y: f64) -> ChartResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer coordinates must be finite".to_owned(),
        ));
    }
    Ok(())
}
