use std::f64::consts::FRAC_PI_4;

use crate::core::Rect;
use crate::render::{
    DrawCommand, FontSpec, Path, RedrawRegion, RegionFrame, Renderer, ResolvedPalette,
    TextBaseline, TextHAlign, TextPrimitive, Transform2D,
};

use super::ChartEngine;

const BORDER_WIDTH: f64 = 2.0;
const LABEL_FONT: FontSpec = FontSpec::regular(27.0);
const LABEL_GAP: f64 = 10.0;
/// The background disc covering a disabled button is this much smaller than
/// the colored circle, leaving a colored ring.
const RING_WIDTH: f64 = 4.0;
const CHECK_SHORT: f64 = 18.0;
const CHECK_LONG: f64 = 30.0;
const CHECK_THICKNESS: f64 = 8.0;
/// Check mark pivot relative to the circle center.
const CHECK_PIVOT: (f64, f64) = (-5.0, 10.0);

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn build_buttons_region(&self, palette: &ResolvedPalette) -> RegionFrame {
        let layout = self.config.layout;
        let viewport = self.config.viewport;
        let top = layout.button_y();

        let mut out = RegionFrame::new(RedrawRegion::Buttons);
        out.push(DrawCommand::ClearRect(Rect::new(
            0.0,
            top,
            viewport.width_px(),
            (viewport.height_px() - top).max(0.0),
        )));

        for (index, (series, visibility)) in self
            .data
            .series()
            .iter()
            .zip(self.data.visibility())
            .enumerate()
        {
            let rect = layout.button_rect(index);
            let radius = (rect.height - layout.button_padding * 2.0) * 0.5;
            let cx = rect.x + layout.button_padding + radius;
            let cy = rect.y + layout.button_padding + radius;
            let progress = visibility.button_progress;

            out.push(DrawCommand::StrokePath {
                path: Path::rounded_rect(rect, rect.height * 0.5),
                color: palette.button_border,
                width: BORDER_WIDTH,
            });
            out.push(DrawCommand::FillPath {
                path: Path::circle(cx, cy, radius),
                color: series.color,
            });
            if progress > 0.0 {
                out.push(DrawCommand::FillPath {
                    path: Path::circle(cx, cy, ((radius - RING_WIDTH) * progress).max(0.0)),
                    color: palette.background,
                });
            }
            if progress < 1.0 {
                out.push(DrawCommand::FillPath {
                    path: check_mark(cx + CHECK_PIVOT.0, cy + CHECK_PIVOT.1, 1.0 - progress),
                    color: palette.check_mark,
                });
            }
            if !series.label.is_empty() {
                out.push(DrawCommand::Text(
                    TextPrimitive::new(
                        series.label.clone(),
                        cx + radius + LABEL_GAP,
                        rect.y + rect.height * 0.5,
                        LABEL_FONT,
                        palette.button_text,
                    )
                    .aligned(TextHAlign::Left, TextBaseline::Middle),
                ));
            }
        }
        out
    }
}

/// Two rounded bars pivoting at `(x, y)`, scaled in length by `extent`.
///
/// Bars are built along the local X axis and rotated into place, so an
/// `extent` of `0` collapses the mark onto its pivot.
fn check_mark(x: f64, y: f64, extent: f64) -> Path {
    let bar = |length: f64| {
        Path::rounded_rect(
            Rect::new(
                -CHECK_THICKNESS * 0.5,
                -CHECK_THICKNESS * 0.5,
                length * extent,
                CHECK_THICKNESS,
            ),
            CHECK_THICKNESS * 0.5,
        )
    };
    let long_arm = Transform2D::translation(x, y).rotated(-FRAC_PI_4);
    let short_arm = long_arm.rotated(-2.0 * FRAC_PI_4);

    let mut path = bar(CHECK_LONG).transformed(long_arm);
    path.extend(bar(CHECK_SHORT).transformed(short_arm));
    path
}

#[cfg(test)]
mod tests {
    use super::check_mark;
    use crate::render::PathElement;

    #[test]
    fn check_mark_starts_one_radius_from_its_pivot() {
        let path = check_mark(100.0, 50.0, 1.0);
        let PathElement::MoveTo { x, y } = path.elements[0] else {
            panic!("path must start with a move");
        };
        assert!(((x - 100.0).hypot(y - 50.0) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn collapsed_check_mark_stays_at_pivot() {
        let path = check_mark(10.0, 20.0, 0.0);
        for element in &path.elements {
            if let PathElement::MoveTo { x, y } | PathElement::LineTo { x, y } = *element {
                assert!((x - 10.0).hypot(y - 20.0) <= 6.0);
            }
        }
    }
}
