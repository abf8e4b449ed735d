//! Pure coordinate and axis helpers shared by both chart views.

use serde::{Deserialize, Serialize};

#[must_use]
pub fn lerp(a: f64, b: f64, coeff: f64) -> f64 {
    a * (1.0 - coeff) + b * coeff
}

/// Clamps `value` into `[min, max]`; `min` wins when the bounds cross.
#[must_use]
pub fn constrain(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Maps a domain X value onto `[0, width]` for the visible `[min_x, max_x]`.
///
/// Callers must reject `max_x == min_x` beforehand; see
/// [`crate::core::VisibleSlice::resolve`].
#[must_use]
pub fn screen_x(x: f64, min_x: f64, max_x: f64, width: f64) -> f64 {
    (x - min_x) / (max_x - min_x) * width
}

/// Maps a value onto `[0, height]` with the origin at the top.
#[must_use]
pub fn screen_y(y: f64, max_y: f64, height: f64) -> f64 {
    height - y / max_y * height
}

/// Linear interpolation of the segment `(x0, y0) -> (x1, y1)` at `x`.
///
/// A zero-width segment yields `y0`.
#[must_use]
pub fn middle_y(x0: f64, x1: f64, y0: f64, y1: f64, x: f64) -> f64 {
    let x_dist = x1 - x0;
    if x_dist == 0.0 || !x_dist.is_finite() {
        return y0;
    }
    lerp(y0, y1, (x - x0) / x_dist)
}

/// Rule that turns a Y ceiling into a round gridline interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStepRule {
    /// Number of gridlines drawn per set, including the zero line.
    pub line_count: usize,
    /// Share of the ceiling the top gridline may reach before rounding.
    pub headroom: f64,
}

impl Default for GridStepRule {
    fn default() -> Self {
        Self {
            line_count: 6,
            headroom: 0.93,
        }
    }
}

impl GridStepRule {
    /// Rounds `max_y * headroom` down to the power of ten one below the
    /// magnitude of `max_y`, then splits it into `line_count - 1` integer steps.
    ///
    /// Returns `0.0` for ceilings that are not finite and positive.
    #[must_use]
    pub fn step(self, max_y: f64) -> f64 {
        if !max_y.is_finite() || max_y <= 0.0 || self.line_count < 2 {
            return 0.0;
        }
        let power = max_y.log10().floor() as i32 - 1;
        let round_by = 10f64.powi(power);
        let rounded = (max_y * self.headroom / round_by).floor() * round_by;
        (rounded / (self.line_count - 1) as f64).floor()
    }

    /// Values of every gridline for the given ceiling, zero first.
    #[must_use]
    pub fn line_values(self, max_y: f64) -> Vec<f64> {
        let step = self.step(max_y);
        (0..self.line_count).map(|index| index as f64 * step).collect()
    }
}

/// Nice gridline step with the default rule (6 lines, 0.93 headroom).
#[must_use]
pub fn nice_step(max_y: f64) -> f64 {
    GridStepRule::default().step(max_y)
}

/// Abbreviates large magnitudes: `1.2m`, `3.4k`, otherwise the plain number.
#[must_use]
pub fn format_axis_value(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}m", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::{GridStepRule, constrain, format_axis_value, middle_y, nice_step, screen_y};

    #[test]
    fn nice_step_rounds_below_magnitude() {
        assert_eq!(nice_step(20.0), 3.0);
        assert_eq!(nice_step(250.0), 46.0);
        assert_eq!(nice_step(2_000.0), 360.0);
        assert_eq!(nice_step(0.0), 0.0);
        assert_eq!(nice_step(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn line_values_start_at_zero() {
        let values = GridStepRule::default().line_values(250.0);
        assert_eq!(values, vec![0.0, 46.0, 92.0, 138.0, 184.0, 230.0]);
    }

    #[test]
    fn axis_values_are_abbreviated() {
        assert_eq!(format_axis_value(0.0), "0");
        assert_eq!(format_axis_value(180.0), "180");
        assert_eq!(format_axis_value(1_500.0), "1.5k");
        assert_eq!(format_axis_value(3_400_000.0), "3.4m");
    }

    #[test]
    fn middle_y_handles_zero_width_segment() {
        assert_eq!(middle_y(5.0, 5.0, 7.0, 9.0, 5.0), 7.0);
        assert_eq!(middle_y(0.0, 10.0, 0.0, 100.0, 2.5), 25.0);
    }

    #[test]
    fn constrain_and_screen_y() {
        assert_eq!(constrain(1.4, 0.0, 1.0), 1.0);
        assert_eq!(constrain(-0.2, 0.0, 1.0), 0.0);
        assert_eq!(screen_y(0.0, 20.0, 600.0), 600.0);
        assert_eq!(screen_y(20.0, 20.0, 600.0), 0.0);
    }
}
