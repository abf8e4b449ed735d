use crate::core::math::{screen_x, screen_y};
use crate::core::{LabelDensity, Rect, VisibleSlice, format_axis_value};
use crate::render::{
    DrawCommand, FontSpec, Path, RedrawRegion, RegionFrame, RenderFrame, Renderer,
    ResolvedPalette, TextBaseline, TextHAlign, TextPrimitive,
};

use super::ChartEngine;
use super::axis_label_format::{DateLabelPattern, format_timestamp};

const AXIS_FONT: FontSpec = FontSpec::regular(20.0);
/// Gridline values sit this far above their line.
const GRID_LABEL_RAISE_PX: f64 = 20.0;
/// Date labels start this far below the top of the label band.
const DATE_LABEL_DROP_PX: f64 = 10.0;

impl<R: Renderer> ChartEngine<R> {
    /// Assembles the commands of every dirty region in paint order.
    ///
    /// The plot region is left out when its visible range is degenerate so the
    /// previous plot frame stays on screen.
    pub(super) fn build_render_frame(
        &self,
        theme_mix: f64,
        plot_slice: Option<VisibleSlice>,
    ) -> RenderFrame {
        let palette = self.config.palette.resolve(theme_mix);
        let mut frame = RenderFrame::new(self.config.viewport);
        for region in self.dirty.pending() {
            let region_frame = match region {
                RedrawRegion::Preview => Some(self.build_preview_region(&palette)),
                RedrawRegion::Plot => {
                    plot_slice.map(|slice| self.build_plot_region(&palette, slice))
                }
                RedrawRegion::Buttons => Some(self.build_buttons_region(&palette)),
                RedrawRegion::Mark => Some(self.build_mark_region(&palette)),
            };
            if let Some(region_frame) = region_frame {
                frame.regions.push(region_frame);
            }
        }
        frame
    }

    /// Y ceiling currently drawn by the main plot, in data units.
    #[must_use]
    pub fn plot_ceiling(&self) -> f64 {
        self.data.max_y() * self.main_view.y_scale.current()
    }

    fn build_plot_region(&self, palette: &ResolvedPalette, slice: VisibleSlice) -> RegionFrame {
        let layout = self.config.layout;
        let viewport = self.config.viewport;
        let plot_area = layout.plot_rect(viewport);
        let clip = layout.plot_region_rect(viewport);
        let ceiling = self.plot_ceiling();

        let mut out = RegionFrame::new(RedrawRegion::Plot);
        out.push(DrawCommand::ClearRect(clip));
        if ceiling.is_finite() && ceiling > 0.0 {
            out.push(DrawCommand::Save);
            out.push(DrawCommand::ClipRect(clip));
            self.push_gridlines(&mut out, palette, plot_area, ceiling);
            self.push_date_labels(&mut out, palette, plot_area, slice);
            self.push_plot_series(&mut out, plot_area, slice, ceiling);
            out.push(DrawCommand::Restore);
        }
        self.push_vignette(&mut out, palette);
        out
    }

    fn push_gridlines(
        &self,
        out: &mut RegionFrame,
        palette: &ResolvedPalette,
        plot_area: Rect,
        ceiling: f64,
    ) {
        let layout = self.config.layout;
        let rule = self.config.animation.grid;
        let max_y = self.data.max_y();
        let left = layout.padding_x;
        let right = plot_area.right() - layout.padding_x;

        for set in self.main_view.gridlines.sets() {
            if set.alpha <= 0.0 {
                continue;
            }
            let step = rule.step(max_y * set.target);
            let values = if step > 0.0 {
                rule.line_values(max_y * set.target)
            } else {
                vec![0.0]
            };

            let mut lines = Path::new();
            let mut labels = Vec::with_capacity(values.len());
            for value in values {
                let y = plot_area.y + screen_y(value, ceiling, plot_area.height);
                lines.move_to(left, y).line_to(right, y);
                labels.push(TextPrimitive::new(
                    format_axis_value(value),
                    left,
                    y - GRID_LABEL_RAISE_PX,
                    AXIS_FONT,
                    palette.axis_text,
                ));
            }

            out.push(DrawCommand::Save);
            out.push(DrawCommand::SetGlobalAlpha(set.alpha.clamp(0.0, 1.0)));
            out.push(DrawCommand::StrokePath {
                path: lines,
                color: palette.gridline,
                width: layout.gridline_width,
            });
            for label in labels {
                out.push(DrawCommand::Text(label));
            }
            out.push(DrawCommand::Restore);
        }
    }

    fn push_date_labels(
        &self,
        out: &mut RegionFrame,
        palette: &ResolvedPalette,
        plot_area: Rect,
        slice: VisibleSlice,
    ) {
        let timestamps = self.data.timestamps();
        let Some(last) = timestamps.len().checked_sub(1) else {
            return;
        };
        let first = slice.start_index.saturating_sub(1);
        let last = (slice.end_index + 1).min(last);
        let y = plot_area.bottom() + DATE_LABEL_DROP_PX;
        let unit = self.config.timestamp_unit;

        for (level, &alpha) in self.main_view.labels.levels().iter().enumerate() {
            if alpha <= 0.0 {
                continue;
            }
            let mut texts = LabelDensity::level_indices(level, first, last)
                .filter_map(|index| {
                    let timestamp = timestamps[index];
                    let text = format_timestamp(timestamp, unit, DateLabelPattern::AxisDay)?;
                    let x = screen_x(timestamp, slice.min_x, slice.max_x, plot_area.width);
                    Some(
                        TextPrimitive::new(text, x, y, AXIS_FONT, palette.axis_text)
                            .aligned(TextHAlign::Center, TextBaseline::Top),
                    )
                })
                .peekable();
            if texts.peek().is_none() {
                continue;
            }
            out.push(DrawCommand::Save);
            out.push(DrawCommand::SetGlobalAlpha(alpha));
            for text in texts {
                out.push(DrawCommand::Text(text));
            }
            out.push(DrawCommand::Restore);
        }
    }

    fn push_plot_series(
        &self,
        out: &mut RegionFrame,
        plot_area: Rect,
        slice: VisibleSlice,
        ceiling: f64,
    ) {
        let timestamps = self.data.timestamps();
        let width = self.config.layout.series_line_width;
        for (series, visibility) in self.data.series().iter().zip(self.data.visibility()) {
            if !visibility.is_drawn() {
                continue;
            }
            let points = project_series(timestamps, &series.values, slice, plot_area, ceiling);
            out.push(DrawCommand::Save);
            out.push(DrawCommand::SetGlobalAlpha(visibility.opacity));
            out.push(DrawCommand::StrokePath {
                path: Path::polyline(&points),
                color: series.color,
                width,
            });
            out.push(DrawCommand::Restore);
        }
    }

    /// Dimmed strip outside the window, the two handles and the top and
    /// bottom bars joining them. Positions follow the window targets.
    fn push_vignette(&self, out: &mut RegionFrame, palette: &ResolvedPalette) {
        let layout = self.config.layout;
        let viewport = self.config.viewport;
        let (start, end) = self.window.target();
        let start_x = layout.vignette_x(viewport, start);
        let end_x = layout.vignette_x(viewport, end);
        let handle = layout.vignette_handle_width;
        let bar = layout.vignette_bar_height;
        let top = layout.preview_y;
        let height = layout.preview_height;
        let strip_right = layout.padding_x + layout.preview_width(viewport);
        let inner_width = end_x - start_x - handle;

        out.push(DrawCommand::ClearRect(Rect::new(
            0.0,
            top,
            viewport.width_px(),
            height,
        )));
        let fills = [
            (
                Rect::new(layout.padding_x, top, start_x - layout.padding_x, height),
                palette.preview_dim,
            ),
            (
                Rect::new(end_x + handle, top, strip_right - end_x - handle, height),
                palette.preview_dim,
            ),
            (Rect::new(start_x, top, handle, height), palette.vignette),
            (Rect::new(end_x, top, handle, height), palette.vignette),
            (Rect::new(start_x + handle, top, inner_width, bar), palette.vignette),
            (
                Rect::new(start_x + handle, top + height - bar, inner_width, bar),
                palette.vignette,
            ),
        ];
        for (rect, color) in fills {
            out.push(DrawCommand::FillRect { rect, color });
        }
    }
}

/// Projects one series over `slice` into `area` under `ceiling`, starting and
/// ending on the values interpolated at the slice bounds.
pub(super) fn project_series(
    timestamps: &[f64],
    values: &[f64],
    slice: VisibleSlice,
    area: Rect,
    ceiling: f64,
) -> Vec<(f64, f64)> {
    let project = |x: f64, y: f64| {
        (
            area.x + screen_x(x, slice.min_x, slice.max_x, area.width),
            area.y + screen_y(y, ceiling, area.height),
        )
    };
    let (start_y, end_y) = slice.boundary_values(timestamps, values);
    let mut points = Vec::with_capacity(slice.visible_interval_count() + 3);
    points.push(project(slice.min_x, start_y));
    if slice.start_index <= slice.end_index {
        for index in slice.start_index..=slice.end_index {
            points.push(project(timestamps[index], values[index]));
        }
    }
    points.push(project(slice.max_x, end_y));
    points
}
