use crate::error::ChartResult;
use crate::render::{DrawCommand, RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests catch invalid geometry without
/// a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_region_count: usize,
    pub last_command_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_region_count = frame.regions.len();
        self.last_command_count = frame.commands().count();
        self.last_text_count = frame
            .commands()
            .filter(|command| matches!(command, DrawCommand::Text(_)))
            .count();
        Ok(())
    }
}
