use serde::{Deserialize, Serialize};

use crate::core::{GridStepRule, GridlineCadence, Rect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HandlePriority;
use crate::render::ThemePalette;

/// Fixed pixel layout of the chart surface. Widths follow the viewport;
/// vertical positions are absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub plot_top: f64,
    pub plot_height: f64,
    /// Band under the plot holding the date labels.
    pub label_band_height: f64,
    pub preview_y: f64,
    pub preview_height: f64,
    pub padding_x: f64,
    pub vignette_handle_width: f64,
    pub vignette_bar_height: f64,
    pub button_width: f64,
    pub button_height: f64,
    pub button_gap: f64,
    /// Distance between the preview strip and the button row.
    pub button_offset_y: f64,
    pub button_padding: f64,
    pub gridline_width: f64,
    pub series_line_width: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            plot_top: 20.0,
            plot_height: 600.0,
            label_band_height: 50.0,
            preview_y: 670.0,
            preview_height: 70.0,
            padding_x: 20.0,
            vignette_handle_width: 10.0,
            vignette_bar_height: 2.0,
            button_width: 125.0,
            button_height: 70.0,
            button_gap: 30.0,
            button_offset_y: 30.0,
            button_padding: 10.0,
            gridline_width: 2.0,
            series_line_width: 3.0,
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn plot_rect(&self, viewport: Viewport) -> Rect {
        Rect::new(0.0, self.plot_top, viewport.width_px(), self.plot_height)
    }

    /// Area where holding the pointer inspects samples.
    #[must_use]
    pub fn hover_rect(&self, viewport: Viewport) -> Rect {
        Rect::new(0.0, 0.0, viewport.width_px(), self.preview_y)
    }

    /// Plot, label band and everything above the plot.
    #[must_use]
    pub fn plot_region_rect(&self, viewport: Viewport) -> Rect {
        Rect::new(
            0.0,
            0.0,
            viewport.width_px(),
            self.plot_top + self.plot_height + self.label_band_height,
        )
    }

    #[must_use]
    pub fn preview_width(&self, viewport: Viewport) -> f64 {
        viewport.width_px() - self.padding_x * 2.0
    }

    #[must_use]
    pub fn preview_rect(&self, viewport: Viewport) -> Rect {
        Rect::new(
            self.padding_x,
            self.preview_y,
            self.preview_width(viewport),
            self.preview_height,
        )
    }

    /// Left edge of the vignette handle drawn for `fraction`.
    #[must_use]
    pub fn vignette_x(&self, viewport: Viewport, fraction: f64) -> f64 {
        self.padding_x + fraction * (self.preview_width(viewport) - self.vignette_handle_width)
    }

    /// Timeline fraction under a pointer at `x`.
    #[must_use]
    pub fn pointer_fraction(&self, viewport: Viewport, x: f64) -> f64 {
        (x - self.padding_x) / self.preview_width(viewport)
    }

    #[must_use]
    pub fn button_y(&self) -> f64 {
        self.preview_y + self.preview_height + self.button_offset_y
    }

    #[must_use]
    pub fn button_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.padding_x + index as f64 * (self.button_width + self.button_gap),
            self.button_y(),
            self.button_width,
            self.button_height,
        )
    }

    fn validate(&self) -> ChartResult<()> {
        let positive = [
            ("plot_height", self.plot_height),
            ("preview_height", self.preview_height),
            ("vignette_handle_width", self.vignette_handle_width),
            ("button_width", self.button_width),
            ("button_height", self.button_height),
            ("gridline_width", self.gridline_width),
            ("series_line_width", self.series_line_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        let non_negative = [
            ("plot_top", self.plot_top),
            ("label_band_height", self.label_band_height),
            ("preview_y", self.preview_y),
            ("padding_x", self.padding_x),
            ("vignette_bar_height", self.vignette_bar_height),
            ("button_gap", self.button_gap),
            ("button_offset_y", self.button_offset_y),
            ("button_padding", self.button_padding),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Label density levels beyond this have strides too wide to label any
/// sample on 32-bit targets.
pub const MAX_LABEL_LEVELS: usize = 30;

/// Per-frame easing constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTuning {
    /// Current window edges cover `1/divisor` of the remaining distance.
    pub window_smoothing_divisor: f64,
    /// Frames a Y ceiling change is spread over.
    pub y_scale_steps: f64,
    pub gridline_fade_step: f64,
    pub grid: GridStepRule,
    pub gridline_cadence: GridlineCadence,
    pub label_fade_step: f64,
    pub label_levels: usize,
    pub target_label_count: f64,
    pub series_opacity_step: f64,
    pub button_progress_step: f64,
    pub mark_alpha_step: f64,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            window_smoothing_divisor: 4.0,
            y_scale_steps: 10.0,
            gridline_fade_step: 0.08,
            grid: GridStepRule::default(),
            gridline_cadence: GridlineCadence::default(),
            label_fade_step: 0.1,
            label_levels: 11,
            target_label_count: 7.0,
            series_opacity_step: 0.05,
            button_progress_step: 0.1,
            mark_alpha_step: 0.1,
        }
    }
}

impl AnimationTuning {
    fn validate(&self) -> ChartResult<()> {
        if !self.window_smoothing_divisor.is_finite() || self.window_smoothing_divisor < 1.0 {
            return Err(ChartError::InvalidData(
                "window smoothing divisor must be finite and >= 1".to_owned(),
            ));
        }
        if !self.y_scale_steps.is_finite() || self.y_scale_steps < 1.0 {
            return Err(ChartError::InvalidData(
                "y-scale steps must be finite and >= 1".to_owned(),
            ));
        }
        let steps = [
            ("gridline_fade_step", self.gridline_fade_step),
            ("label_fade_step", self.label_fade_step),
            ("series_opacity_step", self.series_opacity_step),
            ("button_progress_step", self.button_progress_step),
            ("mark_alpha_step", self.mark_alpha_step),
        ];
        for (name, value) in steps {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(ChartError::InvalidData(format!(
                    "animation `{name}` must be finite and in (0, 1]"
                )));
            }
        }
        if self.grid.line_count < 2 || !self.grid.headroom.is_finite() || self.grid.headroom <= 0.0
        {
            return Err(ChartError::InvalidData(
                "gridline rule needs at least two lines and a positive headroom".to_owned(),
            ));
        }
        if self.label_levels == 0 || self.label_levels > MAX_LABEL_LEVELS {
            return Err(ChartError::InvalidData(format!(
                "label levels must be in [1, {MAX_LABEL_LEVELS}]"
            )));
        }
        if !self.target_label_count.is_finite() || self.target_label_count <= 0.0 {
            return Err(ChartError::InvalidData(
                "target label count must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Preview window gesture tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Smallest window span as a timeline fraction.
    pub min_span: f64,
    /// How far a handle zone reaches left of the handle.
    pub handle_zone_margin: f64,
    pub handle_zone_width: f64,
    pub priority: HandlePriority,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_span: 0.1,
            handle_zone_margin: 10.0,
            handle_zone_width: 40.0,
            priority: HandlePriority::HandlesFirst,
        }
    }
}

/// Frames a region keeps repainting after it was invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedrawConfig {
    pub trigger_frames: i32,
    pub initial_frames: i32,
    pub resize_frames: i32,
}

impl Default for RedrawConfig {
    fn default() -> Self {
        Self {
            trigger_frames: 15,
            initial_frames: 10,
            resize_frames: 15,
        }
    }
}

/// Window targets applied at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowRange {
    pub start: f64,
    pub end: f64,
}

impl Default for WindowRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 0.1,
        }
    }
}

/// Unit of the timestamps handed to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimestampUnit {
    #[default]
    Milliseconds,
    Seconds,
}

impl TimestampUnit {
    #[must_use]
    pub fn to_millis(self, value: f64) -> f64 {
        match self {
            Self::Milliseconds => value,
            Self::Seconds => value * 1_000.0,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to their data files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub layout: ChartLayout,
    #[serde(default)]
    pub animation: AnimationTuning,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub redraw: RedrawConfig,
    #[serde(default)]
    pub initial_window: WindowRange,
    #[serde(default)]
    pub timestamp_unit: TimestampUnit,
    #[serde(default)]
    pub palette: ThemePalette,
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layout: ChartLayout::default(),
            animation: AnimationTuning::default(),
            gesture: GestureConfig::default(),
            redraw: RedrawConfig::default(),
            initial_window: WindowRange::default(),
            timestamp_unit: TimestampUnit::default(),
            palette: ThemePalette::default(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationTuning) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    #[must_use]
    pub fn with_redraw(mut self, redraw: RedrawConfig) -> Self {
        self.redraw = redraw;
        self
    }

    /// Sets the window targets applied at startup.
    #[must_use]
    pub fn with_initial_window(mut self, start: f64, end: f64) -> Self {
        self.initial_window = WindowRange { start, end };
        self
    }

    #[must_use]
    pub fn with_timestamp_unit(mut self, unit: TimestampUnit) -> Self {
        self.timestamp_unit = unit;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: ThemePalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.layout.validate()?;
        self.animation.validate()?;

        let gesture = self.gesture;
        if !gesture.min_span.is_finite() || gesture.min_span <= 0.0 || gesture.min_span > 1.0 {
            return Err(ChartError::InvalidData(
                "gesture min span must be finite and in (0, 1]".to_owned(),
            ));
        }
        if !gesture.handle_zone_margin.is_finite()
            || !gesture.handle_zone_width.is_finite()
            || gesture.handle_zone_width <= 0.0
        {
            return Err(ChartError::InvalidData(
                "handle zone margin and width must be finite, width > 0".to_owned(),
            ));
        }
        if self.redraw.trigger_frames < 0
            || self.redraw.initial_frames < 0
            || self.redraw.resize_frames < 0
        {
            return Err(ChartError::InvalidData(
                "redraw frame counts must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON; omitted sections take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}
