use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One named value sequence sharing the chart's timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: Color,
    pub values: Vec<f64>,
}

impl Series {
    #[must_use]
    pub fn new(label: impl Into<String>, color: Color, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            color,
            values,
        }
    }

    /// Builds a series from a `RRGGBB`/`RRGGBBAA` color, with or without `#`.
    pub fn with_hex_color(
        label: impl Into<String>,
        hex_color: &str,
        values: Vec<f64>,
    ) -> ChartResult<Self> {
        Ok(Self::new(label, Color::from_hex(hex_color)?, values))
    }
}

/// Per-series toggle flag plus the two values eased toward it every frame.
///
/// `button_progress` is `0.0` for a checked (enabled) button and `1.0` for a
/// cleared one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesVisibility {
    pub enabled: bool,
    pub opacity: f64,
    pub button_progress: f64,
}

impl Default for SeriesVisibility {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: 0.0,
            button_progress: 0.0,
        }
    }
}

impl SeriesVisibility {
    /// Moves opacity and button fill one step toward the flag's targets.
    ///
    /// Returns `true` when either value changed.
    pub fn step(&mut self, opacity_step: f64, button_step: f64) -> bool {
        let before = (self.opacity, self.button_progress);
        let opacity_delta = if self.enabled {
            opacity_step
        } else {
            -opacity_step
        };
        let button_delta = if self.enabled {
            -button_step
        } else {
            button_step
        };
        self.opacity = (self.opacity + opacity_delta).clamp(0.0, 1.0);
        self.button_progress = (self.button_progress + button_delta).clamp(0.0, 1.0);
        before != (self.opacity, self.button_progress)
    }

    #[must_use]
    pub fn is_drawn(self) -> bool {
        self.opacity > 0.0
    }
}

/// Immutable chart dataset plus the mutable per-series visibility state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    timestamps: Vec<f64>,
    series: Vec<Series>,
    visibility: Vec<SeriesVisibility>,
    max_y: f64,
}

impl ChartData {
    /// Validates shape and computes the global `max_y` once.
    ///
    /// Timestamps must be finite and strictly increasing; every series must
    /// match their length and hold finite values.
    pub fn new(timestamps: Vec<f64>, series: Vec<Series>) -> ChartResult<Self> {
        if series.is_empty() {
            return Err(ChartError::InvalidData(
                "chart requires at least one series".to_owned(),
            ));
        }
        if timestamps.iter().any(|x| !x.is_finite()) {
            return Err(ChartError::InvalidData(
                "timestamps must be finite".to_owned(),
            ));
        }
        if timestamps.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(ChartError::InvalidData(
                "timestamps must be strictly increasing".to_owned(),
            ));
        }
        for item in &series {
            if item.values.len() != timestamps.len() {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has {} values, expected {}",
                    item.label,
                    item.values.len(),
                    timestamps.len()
                )));
            }
            if item.values.iter().any(|y| !y.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` contains non-finite values",
                    item.label
                )));
            }
            item.color.validate()?;
        }

        let max_y = series
            .iter()
            .flat_map(|item| item.values.iter().copied())
            .map(OrderedFloat)
            .max()
            .map_or(0.0, |value| value.0);
        let visibility = vec![SeriesVisibility::default(); series.len()];

        Ok(Self {
            timestamps,
            series,
            visibility,
            max_y,
        })
    }

    #[must_use]
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[must_use]
    pub fn visibility(&self) -> &[SeriesVisibility] {
        &self.visibility
    }

    #[must_use]
    pub fn is_enabled(&self, index: usize) -> bool {
        self.visibility.get(index).is_some_and(|v| v.enabled)
    }

    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.visibility.iter().filter(|v| v.enabled).count()
    }

    /// Flips the series flag unless that would hide the last enabled series.
    ///
    /// Returns `true` when the flag changed.
    pub fn toggle(&mut self, index: usize) -> bool {
        let enabled_count = self.enabled_count();
        let Some(state) = self.visibility.get_mut(index) else {
            return false;
        };
        if state.enabled && enabled_count <= 1 {
            return false;
        }
        state.enabled = !state.enabled;
        true
    }

    /// Advances every series' opacity and button fill by one frame.
    ///
    /// Returns `true` when any value moved.
    pub fn step_visibility(&mut self, opacity_step: f64, button_step: f64) -> bool {
        let mut changed = false;
        for state in &mut self.visibility {
            changed |= state.step(opacity_step, button_step);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartData, Series};
    use crate::render::Color;

    fn sample() -> ChartData {
        ChartData::new(
            vec![0.0, 1.0, 2.0],
            vec![
                Series::new("a", Color::rgb(1.0, 0.0, 0.0), vec![10.0, 20.0, 15.0]),
                Series::new("b", Color::rgb(0.0, 0.0, 1.0), vec![5.0, 42.0, 1.0]),
            ],
        )
        .expect("valid data")
    }

    #[test]
    fn max_y_spans_all_series() {
        assert_eq!(sample().max_y(), 42.0);
    }

    #[test]
    fn last_enabled_series_cannot_be_hidden() {
        let mut data = sample();
        assert!(data.toggle(0));
        assert!(!data.toggle(1));
        assert!(data.is_enabled(1));
        assert!(data.toggle(0));
        assert_eq!(data.enabled_count(), 2);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let result = ChartData::new(
            vec![0.0, 1.0],
            vec![Series::new("a", Color::rgb(0.0, 0.0, 0.0), vec![1.0])],
        );
        assert!(result.is_err());
    }

    #[test]
    fn unsorted_timestamps_are_rejected() {
        let result = ChartData::new(
            vec![0.0, 2.0, 1.0],
            vec![Series::new("a", Color::rgb(0.0, 0.0, 0.0), vec![1.0, 2.0, 3.0])],
        );
        assert!(result.is_err());
    }
}
