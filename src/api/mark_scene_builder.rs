use crate::core::math::{screen_x, screen_y};
use crate::core::{Rect, VisibleSlice, format_axis_value};
use crate::render::{
    DrawCommand, FontSpec, Path, RedrawRegion, RegionFrame, Renderer, ResolvedPalette,
    TextBaseline, TextHAlign, TextPrimitive,
};

use super::ChartEngine;
use super::axis_label_format::{DateLabelPattern, format_timestamp};

const LINE_WIDTH: f64 = 3.0;
const DOT_RADIUS: f64 = 10.0;
const COLUMN_WIDTH: f64 = 130.0;
const BOX_PADDING: f64 = 15.0;
const BOX_HEIGHT: f64 = 130.0;
const BOX_RADIUS: f64 = 10.0;
/// Preferred distance from the box's left edge to the mark line.
const BOX_LEAD: f64 = 70.0;
const VALUE_OFFSET_Y: f64 = 60.0;
const LABEL_OFFSET_Y: f64 = 40.0;
const HEADER_FONT: FontSpec = FontSpec::regular(20.0);
const VALUE_FONT: FontSpec = FontSpec::bold(20.0);
const LABEL_FONT: FontSpec = FontSpec::regular(15.0);

impl<R: Renderer> ChartEngine<R> {
    /// Point-inspection overlay: vertical line, one dot per enabled series and
    /// the value box, all under the mark's fade alpha.
    pub(super) fn build_mark_region(&self, palette: &ResolvedPalette) -> RegionFrame {
        let layout = self.config.layout;
        let viewport = self.config.viewport;
        let overlay = layout.hover_rect(viewport);

        let mut out = RegionFrame::new(RedrawRegion::Mark);
        out.push(DrawCommand::ClearRect(overlay));

        let index = self.mark.index;
        let timestamps = self.data.timestamps();
        if !self.mark.is_visible() || index >= timestamps.len() {
            return out;
        }
        let (start, end) = self.window.current();
        let Some(slice) = VisibleSlice::resolve(timestamps, start, end) else {
            return out;
        };
        let ceiling = self.plot_ceiling();
        if !ceiling.is_finite() || ceiling <= 0.0 {
            return out;
        }

        let plot = layout.plot_rect(viewport);
        let mark_x = screen_x(timestamps[index], slice.min_x, slice.max_x, plot.width);
        let enabled: Vec<_> = self
            .data
            .series()
            .iter()
            .zip(self.data.visibility())
            .filter(|(_, visibility)| visibility.enabled)
            .map(|(series, _)| series)
            .collect();

        out.push(DrawCommand::Save);
        out.push(DrawCommand::SetGlobalAlpha(self.mark.alpha.clamp(0.0, 1.0)));

        let mut line = Path::new();
        line.move_to(mark_x, 0.0).line_to(mark_x, plot.bottom());
        out.push(DrawCommand::StrokePath {
            path: line,
            color: palette.mark_line,
            width: LINE_WIDTH,
        });

        for series in &enabled {
            let dot_y = plot.y + screen_y(series.values[index], ceiling, plot.height);
            let dot = Path::circle(mark_x, dot_y, DOT_RADIUS);
            out.push(DrawCommand::FillPath {
                path: dot.clone(),
                color: palette.background,
            });
            out.push(DrawCommand::StrokePath {
                path: dot,
                color: series.color,
                width: LINE_WIDTH,
            });
        }

        let box_width = COLUMN_WIDTH * enabled.len() as f64 + BOX_PADDING * 2.0;
        let box_x = (mark_x - BOX_LEAD)
            .max(0.0)
            .min(viewport.width_px() - box_width);
        let panel = Path::rounded_rect(Rect::new(box_x, 0.0, box_width, BOX_HEIGHT), BOX_RADIUS);
        out.push(DrawCommand::FillPath {
            path: panel.clone(),
            color: palette.background,
        });
        out.push(DrawCommand::StrokePath {
            path: panel,
            color: palette.mark_line,
            width: LINE_WIDTH,
        });

        if let Some(header) = format_timestamp(
            timestamps[index],
            self.config.timestamp_unit,
            DateLabelPattern::TooltipDay,
        ) {
            out.push(DrawCommand::Text(
                TextPrimitive::new(
                    header,
                    box_x + BOX_PADDING,
                    BOX_PADDING,
                    HEADER_FONT,
                    palette.button_text,
                )
                .aligned(TextHAlign::Left, TextBaseline::Top),
            ));
        }

        for (column, series) in enabled.iter().enumerate() {
            let x = box_x + BOX_PADDING + COLUMN_WIDTH * column as f64;
            out.push(DrawCommand::Text(
                TextPrimitive::new(
                    format_axis_value(series.values[index]),
                    x,
                    VALUE_OFFSET_Y,
                    VALUE_FONT,
                    series.color,
                )
                .aligned(TextHAlign::Left, TextBaseline::Top),
            ));
            if !series.label.is_empty() {
                out.push(DrawCommand::Text(
                    TextPrimitive::new(
                        series.label.clone(),
                        x,
                        VALUE_OFFSET_Y + LABEL_OFFSET_Y,
                        LABEL_FONT,
                        series.color,
                    )
                    .aligned(TextHAlign::Left, TextBaseline::Top),
                ));
            }
        }

        out.push(DrawCommand::Restore);
        out
    }
}
