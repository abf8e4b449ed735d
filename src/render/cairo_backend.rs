use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasLayerKind, Color, DrawCommand, Path, PathElement, RenderFrame, Renderer, TextBaseline,
    TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub regions_drawn: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Keeps one image surface per `CanvasLayerKind` so a region repaint never
/// touches content owned by another layer, then composites the layers into
/// `output_surface()` after every frame.
#[derive(Debug)]
pub struct CairoRenderer {
    layers: Vec<(CanvasLayerKind, ImageSurface)>,
    output: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let layers = CanvasLayerKind::ALL
            .into_iter()
            .map(|kind| create_surface(width, height).map(|surface| (kind, surface)))
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self {
            layers,
            output: create_surface(width, height)?,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    /// Composited result of the most recent frame.
    #[must_use]
    pub fn output_surface(&self) -> &ImageSurface {
        &self.output
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn layer_surface(&self, kind: CanvasLayerKind) -> ChartResult<&ImageSurface> {
        self.layers
            .iter()
            .find(|(layer, _)| *layer == kind)
            .map(|(_, surface)| surface)
            .ok_or_else(|| ChartError::InvalidData(format!("missing cairo layer {kind:?}")))
    }

    fn composite(&self) -> ChartResult<()> {
        let context = Context::new(&self.output)
            .map_err(|err| map_backend_error("failed to create output context", err))?;
        context.set_operator(Operator::Clear);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear output", err))?;
        context.set_operator(Operator::Over);
        for (_, surface) in &self.layers {
            context
                .set_source_surface(surface, 0.0, 0.0)
                .map_err(|err| map_backend_error("failed to select layer", err))?;
            context
                .paint()
                .map_err(|err| map_backend_error("failed to composite layer", err))?;
        }
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut stats = CairoRenderStats::default();
        for region in &frame.regions {
            let surface = self.layer_surface(region.layer)?;
            let context = Context::new(surface)
                .map_err(|err| map_backend_error("failed to create cairo context", err))?;
            execute_commands(&context, &region.commands, &mut stats)?;
            stats.regions_drawn += 1;
        }
        self.composite()?;
        self.last_stats = stats;
        Ok(())
    }
}

fn execute_commands(
    context: &Context,
    commands: &[DrawCommand],
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    let mut alpha = 1.0;
    let mut saved_alpha = Vec::new();

    for command in commands {
        match command {
            DrawCommand::Save => {
                context
                    .save()
                    .map_err(|err| map_backend_error("failed to save state", err))?;
                saved_alpha.push(alpha);
            }
            DrawCommand::Restore => {
                context
                    .restore()
                    .map_err(|err| map_backend_error("failed to restore state", err))?;
                alpha = saved_alpha.pop().unwrap_or(1.0);
            }
            DrawCommand::SetGlobalAlpha(value) => alpha = *value,
            DrawCommand::ClipRect(rect) => {
                context.new_path();
                context.rectangle(rect.x, rect.y, rect.width, rect.height);
                context.clip();
            }
            DrawCommand::ClearRect(rect) => {
                context.save().map_err(|err| map_backend_error("failed to save state", err))?;
                context.set_operator(Operator::Clear);
                context.new_path();
                context.rectangle(rect.x, rect.y, rect.width, rect.height);
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to clear rectangle", err))?;
                context
                    .restore()
                    .map_err(|err| map_backend_error("failed to restore state", err))?;
            }
            DrawCommand::FillRect { rect, color } => {
                context.new_path();
                context.rectangle(rect.x, rect.y, rect.width, rect.height);
                apply_color(context, *color, alpha);
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                stats.rects_drawn += 1;
            }
            DrawCommand::StrokePath { path, color, width } => {
                append_path(context, path);
                apply_color(context, *color, alpha);
                context.set_line_width(*width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke path", err))?;
                stats.paths_drawn += 1;
            }
            DrawCommand::FillPath { path, color } => {
                append_path(context, path);
                apply_color(context, *color, alpha);
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill path", err))?;
                stats.paths_drawn += 1;
            }
            DrawCommand::Text(text) => {
                draw_text(context, text, alpha);
                stats.texts_drawn += 1;
            }
        }
    }
    Ok(())
}

fn draw_text(context: &Context, text: &TextPrimitive, alpha: f64) {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::from_string("Sans");
    font_description.set_absolute_size(text.font.size_px * f64::from(pango::SCALE));
    if text.font.bold {
        font_description.set_weight(pango::Weight::Bold);
    }
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };
    let y = match text.baseline {
        TextBaseline::Top => text.y,
        TextBaseline::Middle => text.y - f64::from(text_height) / 2.0,
        TextBaseline::Alphabetic => text.y - f64::from(layout.baseline() / pango::SCALE),
    };

    apply_color(context, text.color, alpha);
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
}

fn append_path(context: &Context, path: &Path) {
    context.new_path();
    for element in &path.elements {
        match *element {
            PathElement::MoveTo { x, y } => context.move_to(x, y),
            PathElement::LineTo { x, y } => context.line_to(x, y),
            PathElement::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
            } => context.arc(cx, cy, radius, start_angle, end_angle),
            PathElement::ClosePath => context.close_path(),
        }
    }
}

fn apply_color(context: &Context, color: Color, alpha: f64) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha * alpha);
}

fn create_surface(width: i32, height: i32) -> ChartResult<ImageSurface> {
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
