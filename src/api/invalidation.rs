use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::render::{RedrawRegion, Renderer};

use super::ChartEngine;

/// Per-region countdown of frames that still need repainting.
///
/// A region repaints on every tick while its counter is non-negative, so an
/// animation armed once keeps painting for a few more frames even when no
/// further input arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirtyRegions {
    remaining: IndexMap<RedrawRegion, i32>,
}

impl Default for DirtyRegions {
    fn default() -> Self {
        Self {
            remaining: RedrawRegion::ALL
                .into_iter()
                .map(|region| (region, -1))
                .collect(),
        }
    }
}

impl DirtyRegions {
    /// Keeps `region` dirty for at least `frames` more ticks.
    pub fn arm(&mut self, region: RedrawRegion, frames: i32) {
        let counter = self.remaining.entry(region).or_insert(-1);
        *counter = (*counter).max(frames);
    }

    pub fn arm_all(&mut self, frames: i32) {
        for region in RedrawRegion::ALL {
            self.arm(region, frames);
        }
    }

    #[must_use]
    pub fn should_redraw(&self, region: RedrawRegion) -> bool {
        self.remaining(region) >= 0
    }

    #[must_use]
    pub fn remaining(&self, region: RedrawRegion) -> i32 {
        self.remaining.get(&region).copied().unwrap_or(-1)
    }

    /// Regions to repaint this tick, in paint order.
    pub fn pending(&self) -> impl Iterator<Item = RedrawRegion> + '_ {
        RedrawRegion::ALL
            .into_iter()
            .filter(|region| self.should_redraw(*region))
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.pending().next().is_none()
    }

    /// Counts one tick off every armed region.
    pub fn decrement(&mut self) {
        for counter in self.remaining.values_mut() {
            if *counter >= 0 {
                *counter -= 1;
            }
        }
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Keeps `region` repainting for the configured trigger window.
    pub fn invalidate(&mut self, region: RedrawRegion) {
        self.dirty.arm(region, self.config.redraw.trigger_frames);
    }

    pub fn invalidate_all(&mut self) {
        self.dirty.arm_all(self.config.redraw.trigger_frames);
    }

    #[must_use]
    pub fn dirty_regions(&self) -> &DirtyRegions {
        &self.dirty
    }

    #[must_use]
    pub fn is_region_dirty(&self, region: RedrawRegion) -> bool {
        self.dirty.should_redraw(region)
    }
}

#[cfg(test)]
mod tests {
    use super::DirtyRegions;
    use crate::render::RedrawRegion;

    #[test]
    fn armed_region_repaints_until_counter_goes_negative() {
        let mut dirty = DirtyRegions::default();
        assert!(dirty.is_clean());
        dirty.arm(RedrawRegion::Mark, 2);
        let mut repaints = 0;
        while dirty.should_redraw(RedrawRegion::Mark) {
            repaints += 1;
            dirty.decrement();
        }
        assert_eq!(repaints, 3);
        assert_eq!(dirty.remaining(RedrawRegion::Mark), -1);
    }

    #[test]
    fn arming_never_shortens_a_running_countdown() {
        let mut dirty = DirtyRegions::default();
        dirty.arm(RedrawRegion::Plot, 15);
        dirty.arm(RedrawRegion::Plot, 3);
        assert_eq!(dirty.remaining(RedrawRegion::Plot), 15);
    }

    #[test]
    fn pending_follows_paint_order() {
        let mut dirty = DirtyRegions::default();
        dirty.arm(RedrawRegion::Mark, 1);
        dirty.arm(RedrawRegion::Preview, 1);
        let pending: Vec<RedrawRegion> = dirty.pending().collect();
        assert_eq!(pending, vec![RedrawRegion::Preview, RedrawRegion::Mark]);
    }
}
