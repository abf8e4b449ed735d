mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;
mod theme;

pub use frame::{RegionFrame, RenderFrame};
pub use layer_stack::{CanvasLayerKind, RedrawRegion};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, DrawCommand, FontSpec, Path, PathElement, TextBaseline, TextHAlign, TextPrimitive,
    Transform2D,
};
pub use theme::{ResolvedPalette, ThemePalette, ThemedColor};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive the regions repainted this tick, already ordered and
/// assigned to their layer, so drawing code stays isolated from chart state
/// and gesture handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
