use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

use super::Color;

/// Light and dark variants of one semantic color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemedColor {
    pub light: Color,
    pub dark: Color,
}

impl ThemedColor {
    pub fn from_hex(light: &str, dark: &str) -> ChartResult<Self> {
        Ok(Self {
            light: Color::from_hex(light)?,
            dark: Color::from_hex(dark)?,
        })
    }

    /// `mix = 0` is light, `mix = 1` is dark; values outside are clamped.
    #[must_use]
    pub fn resolve(self, mix: f64) -> Color {
        let mix = if mix.is_finite() {
            mix.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if mix == 0.0 {
            self.light
        } else if mix == 1.0 {
            self.dark
        } else {
            self.light.lerp(self.dark, mix)
        }
    }
}

/// Every semantic color the chart paints with, outside series colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: ThemedColor,
    pub axis_text: ThemedColor,
    pub mark_line: ThemedColor,
    pub preview_dim: ThemedColor,
    pub button_border: ThemedColor,
    pub gridline: ThemedColor,
    pub vignette: ThemedColor,
    pub button_text: ThemedColor,
    /// Check mark drawn over the series-colored button circle.
    pub check_mark: Color,
}

impl Default for ThemePalette {
    fn default() -> Self {
        let themed = |light: u32, dark: u32| ThemedColor {
            light: rgba_u32(light),
            dark: rgba_u32(dark),
        };
        Self {
            background: themed(0xFFFFFFFF, 0x242F3EFF),
            axis_text: themed(0x94A0A9FF, 0x56697AFF),
            mark_line: themed(0xDFE6EBFF, 0x3B4B5BFF),
            preview_dim: themed(0x11002207, 0x11002244),
            button_border: themed(0xE5EBF0FF, 0x35485AFF),
            gridline: themed(0xECF0F3FF, 0x313D4DFF),
            vignette: themed(0xDDEAF399, 0x40566B99),
            button_text: themed(0x000000FF, 0xFFFFFFFF),
            check_mark: Color::WHITE,
        }
    }
}

impl ThemePalette {
    #[must_use]
    pub fn resolve(&self, mix: f64) -> ResolvedPalette {
        ResolvedPalette {
            background: self.background.resolve(mix),
            axis_text: self.axis_text.resolve(mix),
            mark_line: self.mark_line.resolve(mix),
            preview_dim: self.preview_dim.resolve(mix),
            button_border: self.button_border.resolve(mix),
            gridline: self.gridline.resolve(mix),
            vignette: self.vignette.resolve(mix),
            button_text: self.button_text.resolve(mix),
            check_mark: self.check_mark,
        }
    }
}

/// Palette flattened for one theme mix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPalette {
    pub background: Color,
    pub axis_text: Color,
    pub mark_line: Color,
    pub preview_dim: Color,
    pub button_border: Color,
    pub gridline: Color,
    pub vignette: Color,
    pub button_text: Color,
    pub check_mark: Color,
}

fn rgba_u32(value: u32) -> Color {
    let [r, g, b, a] = value.to_be_bytes();
    Color::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    )
}
