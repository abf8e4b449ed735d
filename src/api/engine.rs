use crate::core::{ChartData, PreviewWindow, ViewAnimation, Viewport};
use crate::interaction::{GestureState, MarkState, PointerState};
use crate::render::Renderer;

use super::{ChartConfig, DirtyRegions};

/// Main orchestration facade consumed by host applications.
///
/// One engine owns one chart: its data, preview window, per-view animation
/// state, gesture state and dirty-region timers. The host feeds pointer and
/// resize events between ticks and calls [`ChartEngine::tick`] once per
/// display refresh.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartConfig,
    pub(super) data: ChartData,
    pub(super) window: PreviewWindow,
    pub(super) main_view: ViewAnimation,
    pub(super) preview_view: ViewAnimation,
    pub(super) gesture: GestureState,
    pub(super) mark: MarkState,
    pub(super) pointer: PointerState,
    pub(super) dirty: DirtyRegions,
    pub(super) frame_index: u64,
    pub(super) last_theme_mix: Option<f64>,
    pub(super) holding_plot: bool,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    #[must_use]
    pub fn window(&self) -> PreviewWindow {
        self.window
    }

    /// Animation state of the main plot.
    #[must_use]
    pub fn main_view(&self) -> &ViewAnimation {
        &self.main_view
    }

    /// Animation state of the preview strip.
    #[must_use]
    pub fn preview_view(&self) -> &ViewAnimation {
        &self.preview_view
    }

    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    #[must_use]
    pub fn mark(&self) -> MarkState {
        self.mark
    }

    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Ticks completed so far.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
