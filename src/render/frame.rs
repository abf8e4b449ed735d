use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

use super::{CanvasLayerKind, DrawCommand, RedrawRegion};

/// Ordered commands repainting one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFrame {
    pub region: RedrawRegion,
    pub layer: CanvasLayerKind,
    pub commands: Vec<DrawCommand>,
}

impl RegionFrame {
    #[must_use]
    pub fn new(region: RedrawRegion) -> Self {
        Self {
            region,
            layer: region.layer(),
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Checks every command and that `Save`/`Restore` pairs balance.
    pub fn validate(&self) -> ChartResult<()> {
        let mut depth = 0usize;
        for command in &self.commands {
            command.validate()?;
            match command {
                DrawCommand::Save => depth += 1,
                DrawCommand::Restore => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        ChartError::InvalidData(format!(
                            "unbalanced restore in {:?} region",
                            self.region
                        ))
                    })?;
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(ChartError::InvalidData(format!(
                "unbalanced save in {:?} region",
                self.region
            )));
        }
        Ok(())
    }
}

/// Backend-agnostic output of one tick: only the regions that were dirty.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub regions: Vec<RegionFrame>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            regions: Vec::new(),
        }
    }

    #[must_use]
    pub fn region(&self, region: RedrawRegion) -> Option<&RegionFrame> {
        self.regions.iter().find(|frame| frame.region == region)
    }

    #[must_use]
    pub fn contains_region(&self, region: RedrawRegion) -> bool {
        self.region(region).is_some()
    }

    /// Commands of every region in paint order.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.regions.iter().flat_map(|frame| frame.commands.iter())
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for region in &self.regions {
            region.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
