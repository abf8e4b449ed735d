use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `RRGGBB` or `RRGGBBAA`, with an optional leading `#`.
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(ChartError::InvalidData(format!(
                "color `{input}` must be RRGGBB or RRGGBBAA hex"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| ChartError::InvalidData(format!("color `{input}` is not valid hex")))
        };
        let alpha = if hex.len() == 8 { channel(6..8)? } else { 1.0 };
        Ok(Self::rgba(channel(0..2)?, channel(2..4)?, channel(4..6)?, alpha))
    }

    /// Channel-wise linear blend; `coeff = 0` yields `self`.
    #[must_use]
    pub fn lerp(self, other: Self, coeff: f64) -> Self {
        let mix = |a: f64, b: f64| a * (1.0 - coeff) + b * coeff;
        Self::rgba(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
            mix(self.alpha, other.alpha),
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size_px: f64,
    pub bold: bool,
}

impl FontSpec {
    #[must_use]
    pub const fn regular(size_px: f64) -> Self {
        Self {
            size_px,
            bold: false,
        }
    }

    #[must_use]
    pub const fn bold(size_px: f64) -> Self {
        Self {
            size_px,
            bold: true,
        }
    }
}

/// Draw command for one text run in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontSpec,
    pub color: Color,
    pub h_align: TextHAlign,
    pub baseline: TextBaseline,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, font: FontSpec, color: Color) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color,
            h_align: TextHAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }

    #[must_use]
    pub fn aligned(mut self, h_align: TextHAlign, baseline: TextBaseline) -> Self {
        self.h_align = h_align;
        self.baseline = baseline;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font.size_px.is_finite() || self.font.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathElement {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    /// Clockwise arc in screen space (Y down), angles in radians.
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ClosePath,
}

/// Rotation about the origin followed by a translation.
///
/// Icon geometry is built around its own origin and mapped through one of
/// these instead of relying on a surface-side transform stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation: f64,
}

impl Transform2D {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        rotation: 0.0,
    };

    #[must_use]
    pub const fn translation(x: f64, y: f64) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            rotation: 0.0,
        }
    }

    /// Adds a rotation applied before this transform's own rotation.
    #[must_use]
    pub fn rotated(mut self, radians: f64) -> Self {
        self.rotation += radians;
        self
    }

    #[must_use]
    pub fn apply(self, x: f64, y: f64) -> (f64, f64) {
        let (sin, cos) = self.rotation.sin_cos();
        (
            x * cos - y * sin + self.translate_x,
            x * sin + y * cos + self.translate_y,
        )
    }
}

/// Ordered list of sub-path elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub elements: Vec<PathElement>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.elements.push(PathElement::MoveTo { x, y });
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.elements.push(PathElement::LineTo { x, y });
        self
    }

    pub fn arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> &mut Self {
        self.elements.push(PathElement::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.elements.push(PathElement::ClosePath);
        self
    }

    #[must_use]
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        let mut path = Self::new();
        path.arc(cx, cy, radius, 0.0, std::f64::consts::TAU);
        path
    }

    /// Polyline through `points`; empty when fewer than two points.
    #[must_use]
    pub fn polyline(points: &[(f64, f64)]) -> Self {
        let mut path = Self::new();
        if points.len() < 2 {
            return path;
        }
        path.move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            path.line_to(x, y);
        }
        path
    }

    /// Rounded rectangle traced clockwise from the top edge.
    #[must_use]
    pub fn rounded_rect(rect: Rect, radius: f64) -> Self {
        use std::f64::consts::{FRAC_PI_2, PI};

        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        let r = radius.max(0.0).min(width.abs() * 0.5).min(height.abs() * 0.5);
        let mut path = Self::new();
        path.move_to(x + r, y)
            .line_to(x + width - r, y)
            .arc(x + width - r, y + r, r, 1.5 * PI, 2.0 * PI)
            .line_to(x + width, y + height - r)
            .arc(x + width - r, y + height - r, r, 0.0, FRAC_PI_2)
            .line_to(x + r, y + height)
            .arc(x + r, y + height - r, r, FRAC_PI_2, PI)
            .line_to(x, y + r)
            .arc(x + r, y + r, r, PI, 1.5 * PI)
            .close();
        path
    }

    /// Appends every element of `other`.
    pub fn extend(&mut self, other: Path) {
        self.elements.extend(other.elements);
    }

    #[must_use]
    pub fn transformed(&self, transform: Transform2D) -> Self {
        let elements = self
            .elements
            .iter()
            .map(|element| match *element {
                PathElement::MoveTo { x, y } => {
                    let (x, y) = transform.apply(x, y);
                    PathElement::MoveTo { x, y }
                }
                PathElement::LineTo { x, y } => {
                    let (x, y) = transform.apply(x, y);
                    PathElement::LineTo { x, y }
                }
                PathElement::Arc {
                    cx,
                    cy,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    let (cx, cy) = transform.apply(cx, cy);
                    PathElement::Arc {
                        cx,
                        cy,
                        radius,
                        start_angle: start_angle + transform.rotation,
                        end_angle: end_angle + transform.rotation,
                    }
                }
                PathElement::ClosePath => PathElement::ClosePath,
            })
            .collect();
        Self { elements }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        let finite = self.elements.iter().all(|element| match *element {
            PathElement::MoveTo { x, y } | PathElement::LineTo { x, y } => {
                x.is_finite() && y.is_finite()
            }
            PathElement::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
            } => {
                cx.is_finite()
                    && cy.is_finite()
                    && radius.is_finite()
                    && radius >= 0.0
                    && start_angle.is_finite()
                    && end_angle.is_finite()
            }
            PathElement::ClosePath => true,
        });
        if !finite {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// One immediate-mode canvas operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Pushes the current alpha and clip.
    Save,
    /// Pops the state pushed by the matching `Save`.
    Restore,
    /// Multiplies every later paint until `Restore`.
    SetGlobalAlpha(f64),
    ClipRect(Rect),
    /// Resets pixels to fully transparent.
    ClearRect(Rect),
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokePath {
        path: Path,
        color: Color,
        width: f64,
    },
    FillPath {
        path: Path,
        color: Color,
    },
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Save | Self::Restore => Ok(()),
            Self::SetGlobalAlpha(alpha) => {
                if alpha.is_finite() && (0.0..=1.0).contains(alpha) {
                    Ok(())
                } else {
                    Err(ChartError::InvalidData(
                        "global alpha must be finite and in [0, 1]".to_owned(),
                    ))
                }
            }
            Self::ClipRect(rect) | Self::ClearRect(rect) => validate_rect(*rect),
            Self::FillRect { rect, color } => {
                validate_rect(*rect)?;
                color.validate()
            }
            Self::StrokePath { path, color, width } => {
                if !width.is_finite() || *width <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "stroke width must be finite and > 0".to_owned(),
                    ));
                }
                path.validate()?;
                color.validate()
            }
            Self::FillPath { path, color } => {
                path.validate()?;
                color.validate()
            }
            Self::Text(text) => text.validate(),
        }
    }
}

fn validate_rect(rect: Rect) -> ChartResult<()> {
    if !rect.is_finite() {
        return Err(ChartError::InvalidData(
            "rectangle coordinates must be finite".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Color, Path, PathElement, Transform2D};

    #[test]
    fn hex_colors_parse_with_optional_alpha() {
        let color = Color::from_hex("#3DC23F").expect("rgb");
        assert!((color.green - 194.0 / 255.0).abs() <= 1e-12);
        assert_eq!(color.alpha, 1.0);
        let translucent = Color::from_hex("DDEAF399").expect("rgba");
        assert!((translucent.alpha - 153.0 / 255.0).abs() <= 1e-12);
        assert!(Color::from_hex("12345").is_err());
        assert!(Color::from_hex("zz0000").is_err());
    }

    #[test]
    fn transform_rotates_then_translates() {
        let transform = Transform2D::translation(10.0, 20.0).rotated(std::f64::consts::FRAC_PI_2);
        let (x, y) = transform.apply(1.0, 0.0);
        assert!((x - 10.0).abs() <= 1e-12);
        assert!((y - 21.0).abs() <= 1e-12);
    }

    #[test]
    fn transformed_arcs_shift_their_angles() {
        let path = Path::circle(0.0, 0.0, 2.0);
        let moved = path.transformed(Transform2D::translation(5.0, 5.0).rotated(1.0));
        match moved.elements[0] {
            PathElement::Arc {
                cx,
                cy,
                start_angle,
                ..
            } => {
                assert_eq!((cx, cy), (5.0, 5.0));
                assert_eq!(start_angle, 1.0);
            }
            other => panic!("unexpected element {other:?}"),
        }
    }
}
