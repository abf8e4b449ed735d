use serde::{Deserialize, Serialize};

use crate::core::Rect;

/// Latest pointer sample plus the button edges seen since the last tick.
///
/// Coordinates are drawing-surface pixels with the device pixel ratio
/// already applied. Edges stay set until the engine consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub is_down: bool,
    pub went_down: bool,
    pub went_up: bool,
}

impl PointerState {
    pub fn on_move(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn on_down(&mut self, x: f64, y: f64) {
        self.on_move(x, y);
        if !self.is_down {
            self.went_down = true;
        }
        self.is_down = true;
    }

    pub fn on_up(&mut self) {
        if self.is_down {
            self.went_up = true;
        }
        self.is_down = false;
    }

    pub fn clear_edges(&mut self) {
        self.went_down = false;
        self.went_up = false;
    }
}

/// Which preview feature the pointer is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    None,
    LeftHandle,
    RightHandle,
    Center,
}

/// Which zone wins where the handle zones and the center body overlap,
/// which happens when the window is narrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandlePriority {
    /// Left handle, then right handle, then center.
    #[default]
    HandlesFirst,
    /// Center, then right handle, then left handle.
    CenterFirst,
}

/// Hit zones of the preview window for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewHitZones {
    pub left_handle: Rect,
    pub right_handle: Rect,
    pub center: Rect,
}

impl PreviewHitZones {
    #[must_use]
    pub fn classify(&self, x: f64, y: f64, priority: HandlePriority) -> DragState {
        let zones = [
            (self.left_handle, DragState::LeftHandle),
            (self.right_handle, DragState::RightHandle),
            (self.center, DragState::Center),
        ];
        let hit = |&(rect, state): &(Rect, DragState)| rect.contains(x, y).then_some(state);
        let found = match priority {
            HandlePriority::HandlesFirst => zones.iter().find_map(hit),
            HandlePriority::CenterFirst => zones.iter().rev().find_map(hit),
        };
        found.unwrap_or(DragState::None)
    }
}

/// Active drag plus the pointer's offset from the dragged feature, captured
/// when the drag started so the feature does not jump under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureState {
    drag: DragState,
    offset_fraction: f64,
}

impl GestureState {
    #[must_use]
    pub fn drag(self) -> DragState {
        self.drag
    }

    #[must_use]
    pub fn offset_fraction(self) -> f64 {
        self.offset_fraction
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.drag != DragState::None
    }

    /// Starts `drag`; `pointer_fraction - reference_fraction` is kept as the
    /// offset.
    pub fn begin(&mut self, drag: DragState, pointer_fraction: f64, reference_fraction: f64) {
        self.drag = drag;
        self.offset_fraction = pointer_fraction - reference_fraction;
    }

    /// Fraction the dragged feature should move to for this pointer position.
    #[must_use]
    pub fn feature_fraction(self, pointer_fraction: f64) -> f64 {
        pointer_fraction - self.offset_fraction
    }

    pub fn end(&mut self) {
        self.drag = DragState::None;
    }
}

/// Point-inspection tooltip: the hovered sample and its fade.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkState {
    pub index: usize,
    pub alpha: f64,
}

impl MarkState {
    pub fn fade_in(&mut self, step: f64) {
        if self.alpha < 1.0 {
            self.alpha = (self.alpha + step).min(1.0);
        }
    }

    pub fn fade_out(&mut self, step: f64) {
        if self.alpha >= step {
            self.alpha -= step;
        } else {
            self.alpha = 0.0;
        }
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        self.alpha > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{DragState, HandlePriority, MarkState, PointerState, PreviewHitZones};
    use crate::core::Rect;

    fn overlapping_zones() -> PreviewHitZones {
        PreviewHitZones {
            left_handle: Rect::new(90.0, 0.0, 40.0, 70.0),
            right_handle: Rect::new(140.0, 0.0, 40.0, 70.0),
            center: Rect::new(110.0, 0.0, 40.0, 70.0),
        }
    }

    #[test]
    fn handles_first_prefers_left_handle_in_overlap() {
        let zones = overlapping_zones();
        assert_eq!(
            zones.classify(115.0, 10.0, HandlePriority::HandlesFirst),
            DragState::LeftHandle
        );
        assert_eq!(
            zones.classify(115.0, 10.0, HandlePriority::CenterFirst),
            DragState::Center
        );
        assert_eq!(
            zones.classify(400.0, 10.0, HandlePriority::HandlesFirst),
            DragState::None
        );
    }

    #[test]
    fn press_and_release_between_ticks_keep_both_edges() {
        let mut pointer = PointerState::default();
        pointer.on_down(5.0, 6.0);
        pointer.on_up();
        assert!(pointer.went_down && pointer.went_up && !pointer.is_down);
        pointer.clear_edges();
        assert!(!pointer.went_down && !pointer.went_up);
    }

    #[test]
    fn mark_alpha_stays_in_unit_range() {
        let mut mark = MarkState::default();
        for _ in 0..15 {
            mark.fade_in(0.1);
        }
        assert_eq!(mark.alpha, 1.0);
        for _ in 0..15 {
            mark.fade_out(0.1);
        }
        assert_eq!(mark.alpha, 0.0);
    }
}
