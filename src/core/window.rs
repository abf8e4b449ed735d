use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Visible time range as fractions of the full timeline.
///
/// Gestures write the target pair; the current pair follows it by a fixed
/// fraction of the remaining distance per frame. Targets always satisfy
/// `0 <= start <= end <= 1` and `end - start >= min_span`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewWindow {
    target_start: f64,
    target_end: f64,
    current_start: f64,
    current_end: f64,
    min_span: f64,
}

impl PreviewWindow {
    /// Creates a window with the given targets; the current range starts
    /// collapsed at `target_start` so the first frames open it smoothly.
    pub fn new(target_start: f64, target_end: f64, min_span: f64) -> ChartResult<Self> {
        if !min_span.is_finite() || !(0.0..=1.0).contains(&min_span) {
            return Err(ChartError::InvalidData(
                "window min span must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !target_start.is_finite()
            || !target_end.is_finite()
            || target_start < 0.0
            || target_end > 1.0
            || target_end - target_start < min_span
        {
            return Err(ChartError::InvalidData(format!(
                "window [{target_start}, {target_end}] must lie in [0, 1] and span at least {min_span}"
            )));
        }
        Ok(Self {
            target_start,
            target_end,
            current_start: target_start,
            current_end: target_start,
            min_span,
        })
    }

    #[must_use]
    pub fn target(self) -> (f64, f64) {
        (self.target_start, self.target_end)
    }

    #[must_use]
    pub fn current(self) -> (f64, f64) {
        (self.current_start, self.current_end)
    }

    #[must_use]
    pub fn min_span(self) -> f64 {
        self.min_span
    }

    #[must_use]
    pub fn target_span(self) -> f64 {
        self.target_end - self.target_start
    }

    #[must_use]
    pub fn target_midpoint(self) -> f64 {
        self.target_start + self.target_span() * 0.5
    }

    /// Moves the current range `1/divisor` of the way toward the targets.
    pub fn advance(&mut self, divisor: f64) {
        self.current_start += (self.target_start - self.current_start) / divisor;
        self.current_end += (self.target_end - self.current_end) / divisor;
    }

    /// Snaps the current range onto the targets.
    pub fn settle(&mut self) {
        self.current_start = self.target_start;
        self.current_end = self.target_end;
    }

    /// Sets the left edge, keeping it in `[0, end - min_span]`.
    pub fn drag_start_to(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        self.target_start = fraction.max(0.0).min(self.target_end - self.min_span);
    }

    /// Sets the right edge, keeping it in `[start + min_span, 1]`.
    pub fn drag_end_to(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        self.target_end = fraction.max(self.target_start + self.min_span).min(1.0);
    }

    /// Recenters the window on `midpoint`, preserving its span and keeping
    /// both edges inside `[0, 1]`.
    pub fn drag_center_to(&mut self, midpoint: f64) {
        if !midpoint.is_finite() {
            return;
        }
        let span = self.target_span();
        let half = span * 0.5;
        let midpoint = midpoint.max(half).min(1.0 - half);
        self.target_start = midpoint - half;
        self.target_end = self.target_start + span;
    }
}

#[cfg(test)]
mod tests {
    use super::PreviewWindow;

    #[test]
    fn left_edge_stops_short_of_right_edge() {
        let mut window = PreviewWindow::new(0.5, 0.95, 0.1).expect("window");
        window.drag_start_to(0.9);
        let (start, end) = window.target();
        assert!((start - 0.85).abs() <= 1e-12);
        assert_eq!(end, 0.95);
    }

    #[test]
    fn center_drag_preserves_span() {
        let mut window = PreviewWindow::new(0.2, 0.5, 0.1).expect("window");
        window.drag_center_to(0.95);
        let (start, end) = window.target();
        assert!((end - 1.0).abs() <= 1e-12);
        assert!((end - start - 0.3).abs() <= 1e-12);
    }

    #[test]
    fn current_range_follows_by_quarter_steps() {
        let mut window = PreviewWindow::new(0.0, 0.1, 0.1).expect("window");
        window.advance(4.0);
        assert_eq!(window.current(), (0.0, 0.025));
    }

    #[test]
    fn rejects_span_below_minimum() {
        assert!(PreviewWindow::new(0.3, 0.35, 0.1).is_err());
    }
}
