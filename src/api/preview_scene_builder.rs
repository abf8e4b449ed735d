use crate::core::{Rect, VisibleSlice};
use crate::render::{DrawCommand, Path, RedrawRegion, RegionFrame, Renderer, ResolvedPalette};

use super::ChartEngine;
use super::render_frame_builder::project_series;

impl<R: Renderer> ChartEngine<R> {
    /// Background fill plus the whole-timeline polylines of the preview strip.
    pub(super) fn build_preview_region(&self, palette: &ResolvedPalette) -> RegionFrame {
        let layout = self.config.layout;
        let viewport = self.config.viewport;

        let mut out = RegionFrame::new(RedrawRegion::Preview);
        out.push(DrawCommand::FillRect {
            rect: Rect::new(0.0, 0.0, viewport.width_px(), viewport.height_px()),
            color: palette.background,
        });

        let timestamps = self.data.timestamps();
        let Some(slice) = VisibleSlice::resolve(timestamps, 0.0, 1.0) else {
            return out;
        };
        let ceiling = self.data.max_y() * self.preview_view.y_scale.current();
        if !ceiling.is_finite() || ceiling <= 0.0 {
            return out;
        }

        let area = layout.preview_rect(viewport);
        for (series, visibility) in self.data.series().iter().zip(self.data.visibility()) {
            if !visibility.is_drawn() {
                continue;
            }
            let points = project_series(timestamps, &series.values, slice, area, ceiling);
            out.push(DrawCommand::Save);
            out.push(DrawCommand::SetGlobalAlpha(visibility.opacity));
            out.push(DrawCommand::StrokePath {
                path: Path::polyline(&points),
                color: series.color,
                width: layout.series_line_width,
            });
            out.push(DrawCommand::Restore);
        }
        out
    }
}
