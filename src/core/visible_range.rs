use serde::{Deserialize, Serialize};

use super::math::{lerp, middle_y};

/// Slice of samples covered by a visible fraction range, plus the exact
/// domain bounds of that range.
///
/// Samples `start_index..=end_index` lie fully inside `[min_x, max_x]`; the
/// neighbours on either side are only used to interpolate the boundary values
/// so edge segments are clipped at the window edge instead of dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleSlice {
    pub start_index: usize,
    pub end_index: usize,
    pub min_x: f64,
    pub max_x: f64,
}

impl VisibleSlice {
    /// Resolves the slice for `[start, end]` over `timestamps`.
    ///
    /// Returns `None` for degenerate input: fewer than two samples, a
    /// non-finite range, or a zero-width domain span.
    #[must_use]
    pub fn resolve(timestamps: &[f64], start: f64, end: f64) -> Option<Self> {
        let count = timestamps.len();
        if count <= 1 || !start.is_finite() || !end.is_finite() {
            return None;
        }
        let start = start.clamp(0.0, 1.0);
        let end = end.clamp(0.0, 1.0);

        let last = count - 1;
        let last_f = last as f64;
        let start_index = ((last_f * start).ceil() as usize).min(last);
        let end_index = ((last_f * end).floor() as usize).min(last);

        let first_x = timestamps[0];
        let dist_x = timestamps[last] - first_x;
        let min_x = first_x + dist_x * start;
        let max_x = first_x + dist_x * end;
        let span = max_x - min_x;
        if !span.is_finite() || span <= 0.0 {
            return None;
        }

        Some(Self {
            start_index,
            end_index,
            min_x,
            max_x,
        })
    }

    /// Number of whole sample intervals between the first and last visible
    /// sample.
    #[must_use]
    pub fn visible_interval_count(self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    /// Value interpolated exactly at `min_x` and at `max_x`.
    #[must_use]
    pub fn boundary_values(self, timestamps: &[f64], values: &[f64]) -> (f64, f64) {
        let last = timestamps.len() - 1;
        let before = self.start_index.saturating_sub(1);
        let start_y = middle_y(
            timestamps[before],
            timestamps[self.start_index],
            values[before],
            values[self.start_index],
            self.min_x,
        );
        let after = (self.end_index + 1).min(last);
        let end_y = middle_y(
            timestamps[self.end_index],
            timestamps[after],
            values[self.end_index],
            values[after],
            self.max_x,
        );
        (start_y, end_y)
    }

    /// Largest value of one series inside the slice, boundary values included.
    #[must_use]
    pub fn max_value(self, timestamps: &[f64], values: &[f64]) -> f64 {
        let (start_y, end_y) = self.boundary_values(timestamps, values);
        let inner = if self.start_index <= self.end_index {
            values[self.start_index..=self.end_index]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max)
        } else {
            f64::NEG_INFINITY
        };
        start_y.max(end_y).max(inner)
    }
}

/// Sample index under a pointer at `ratio` across a window targeting
/// `[start, end]`, rounded to the nearest sample.
#[must_use]
pub fn sample_index_at(count: usize, start: f64, end: f64, ratio: f64) -> usize {
    if count == 0 {
        return 0;
    }
    let last = (count - 1) as f64;
    let index = lerp(last * start, last * end, ratio).round();
    if !index.is_finite() {
        return 0;
    }
    index.clamp(0.0, last) as usize
}
