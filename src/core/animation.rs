//! Per-view animation state: the eased Y ceiling, the gridline crossfade
//! queue and the per-density label opacities.
//!
//! All values are fractions or opacities advanced a bounded amount per frame;
//! there is no clock, an animation is simply retargeted when its input moves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::math::GridStepRule;

/// Eased Y ceiling expressed as a fraction of the chart's global `max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YScaleAnimation {
    current: f64,
    target: f64,
    change_rate: f64,
    frames_with_same_target: u32,
    steps: f64,
}

impl YScaleAnimation {
    /// Starts settled at `initial`; each retarget is covered in `steps` frames.
    #[must_use]
    pub fn new(initial: f64, steps: f64) -> Self {
        Self {
            current: initial,
            target: initial,
            change_rate: 0.0,
            frames_with_same_target: 0,
            steps: steps.max(1.0),
        }
    }

    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn change_rate(&self) -> f64 {
        self.change_rate
    }

    #[must_use]
    pub fn frames_with_same_target(&self) -> u32 {
        self.frames_with_same_target
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Moves `current` by one `change_rate`, landing exactly on `target`
    /// instead of crossing it.
    pub fn step(&mut self) {
        let next = self.current + self.change_rate;
        let overshoots = (self.change_rate > 0.0 && next > self.target)
            || (self.change_rate < 0.0 && next < self.target);
        self.current = if overshoots { self.target } else { next };
    }

    /// Adopts `new_target` and restarts the ease when it differs from the
    /// current target. Non-finite targets are ignored so the last good ceiling
    /// is held.
    ///
    /// Returns `true` when the target changed.
    pub fn retarget(&mut self, new_target: f64) -> bool {
        if !new_target.is_finite() || new_target <= 0.0 {
            return false;
        }
        if new_target == self.target {
            self.frames_with_same_target = self.frames_with_same_target.saturating_add(1);
            return false;
        }
        self.target = new_target;
        self.change_rate = (new_target - self.current) / self.steps;
        self.frames_with_same_target = 0;
        true
    }
}

/// One complete set of horizontal gridlines faded as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridlineSet {
    /// Y ceiling fraction the set's step was derived from.
    pub target: f64,
    pub alpha: f64,
}

/// Gridline sets, live set first, outgoing sets behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridlineFadeQueue {
    sets: SmallVec<[GridlineSet; 4]>,
    fade_step: f64,
}

impl GridlineFadeQueue {
    #[must_use]
    pub fn new(initial_target: f64, fade_step: f64) -> Self {
        let mut sets = SmallVec::new();
        sets.push(GridlineSet {
            target: initial_target,
            alpha: 1.0,
        });
        Self { sets, fade_step }
    }

    #[must_use]
    pub fn live(&self) -> GridlineSet {
        self.sets[0]
    }

    #[must_use]
    pub fn sets(&self) -> &[GridlineSet] {
        &self.sets
    }

    #[must_use]
    pub fn fade_step(&self) -> f64 {
        self.fade_step
    }

    /// Raises the live set toward 1, lowers the others and drops each outgoing
    /// set once its alpha is at or below the fade step.
    pub fn step(&mut self) {
        let fade_step = self.fade_step;
        let live = &mut self.sets[0];
        live.alpha = (live.alpha + fade_step).min(1.0);

        let mut index = 1;
        while index < self.sets.len() {
            let set = &mut self.sets[index];
            set.alpha -= fade_step;
            if set.alpha <= fade_step {
                self.sets.remove(index);
            } else {
                index += 1;
            }
        }
    }

    /// Makes a new invisible set live; the previous live set starts fading.
    pub fn push_live(&mut self, target: f64) {
        self.sets.insert(0, GridlineSet { target, alpha: 0.0 });
    }
}

/// Conditions under which a changed ceiling may start a new gridline set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridlineCadence {
    /// A new set may be pushed on every frame index divisible by this.
    pub frame_interval: u64,
    /// ... or once the ceiling has held for more than this many frames.
    pub same_target_frames: u32,
}

impl Default for GridlineCadence {
    fn default() -> Self {
        Self {
            frame_interval: 10,
            same_target_frames: 5,
        }
    }
}

/// Opacity per label density level. Level `p` labels every sample index
/// `2^p * k` with odd `k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDensity {
    levels: Vec<f64>,
    fade_step: f64,
    target_labels: f64,
}

impl LabelDensity {
    /// All levels start hidden so labels fade in on the first frames.
    #[must_use]
    pub fn new(level_count: usize, fade_step: f64, target_labels: f64) -> Self {
        Self {
            levels: vec![0.0; level_count],
            fade_step,
            target_labels,
        }
    }

    /// Smallest level whose spacing keeps roughly `target_labels` labels over
    /// `visible_intervals` sample intervals.
    #[must_use]
    pub fn desired_level(&self, visible_intervals: usize) -> usize {
        let desired_interval = visible_intervals as f64 / self.target_labels;
        // log2(0) is -inf and NaN.max(0) is 0, both collapse to level 0.
        desired_interval.log2().ceil().max(0.0) as usize
    }

    /// Fades levels at or above `desired_level` in and the finer ones out.
    pub fn step(&mut self, desired_level: usize) {
        let fade_step = self.fade_step;
        for (level, alpha) in self.levels.iter_mut().enumerate() {
            let delta = if level < desired_level {
                -fade_step
            } else {
                fade_step
            };
            *alpha = (*alpha + delta).clamp(0.0, 1.0);
        }
    }

    #[must_use]
    pub fn alpha(&self, level: usize) -> f64 {
        self.levels.get(level).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Sample indices labelled by `level` within `[first, last]`.
    ///
    /// Levels whose stride does not fit in `usize` label nothing.
    pub fn level_indices(level: usize, first: usize, last: usize) -> impl Iterator<Item = usize> {
        let offset = u32::try_from(level)
            .ok()
            .and_then(|shift| 1usize.checked_shl(shift));
        let stride = offset.and_then(|offset| offset.checked_mul(2));
        let (Some(offset), Some(stride)) = (offset, stride) else {
            return (1..=0).step_by(1);
        };
        let start = if first <= offset {
            offset
        } else {
            offset.saturating_add((first - offset).div_ceil(stride).saturating_mul(stride))
        };
        (start..=last).step_by(stride)
    }
}

/// Animation state owned by one chart view.
///
/// The main plot and the preview strip each own one; the preview only uses
/// the Y ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewAnimation {
    pub y_scale: YScaleAnimation,
    pub gridlines: GridlineFadeQueue,
    pub labels: LabelDensity,
}

impl ViewAnimation {
    #[must_use]
    pub fn new(
        y_scale_steps: f64,
        gridline_fade_step: f64,
        label_levels: usize,
        label_fade_step: f64,
        target_labels: f64,
    ) -> Self {
        Self {
            y_scale: YScaleAnimation::new(1.0, y_scale_steps),
            gridlines: GridlineFadeQueue::new(1.0, gridline_fade_step),
            labels: LabelDensity::new(label_levels, label_fade_step, target_labels),
        }
    }

    /// Pushes a new live gridline set when the eased ceiling has moved away
    /// from the live set, the cadence allows it and the rounded step differs.
    ///
    /// Returns `true` when a set was pushed.
    pub fn maybe_push_gridlines(
        &mut self,
        chart_max_y: f64,
        rule: GridStepRule,
        cadence: GridlineCadence,
        frame_index: u64,
        pointer_released: bool,
    ) -> bool {
        let live_target = self.gridlines.live().target;
        let target = self.y_scale.target();
        if target == live_target {
            return false;
        }

        let due = (cadence.frame_interval > 0 && frame_index % cadence.frame_interval == 0)
            || pointer_released
            || self.y_scale.frames_with_same_target() > cadence.same_target_frames;
        if !due {
            return false;
        }

        let next_step = rule.step(chart_max_y * target);
        let live_step = rule.step(chart_max_y * live_target);
        if next_step == live_step {
            return false;
        }

        trace!(target, next_step, live_step, "push gridline set");
        self.gridlines.push_live(target);
        true
    }
}
