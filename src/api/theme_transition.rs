use serde::{Deserialize, Serialize};

/// Light/dark blend shared by every chart of a deck.
///
/// The mix walks a fixed step per tick toward `0` (light) or `1` (dark);
/// engines only ever see the resulting scalar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeTransition {
    mix: f64,
    target: f64,
    step: f64,
}

impl Default for ThemeTransition {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ThemeTransition {
    pub const DEFAULT_STEP: f64 = 0.02;

    /// Starts settled on the requested theme.
    #[must_use]
    pub fn new(dark: bool) -> Self {
        let mix = if dark { 1.0 } else { 0.0 };
        Self {
            mix,
            target: mix,
            step: Self::DEFAULT_STEP,
        }
    }

    /// Overrides the per-tick step; non-positive or non-finite steps are
    /// ignored.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 0.0 {
            self.step = step;
        }
        self
    }

    #[must_use]
    pub fn mix(self) -> f64 {
        self.mix
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self.target == 1.0
    }

    #[must_use]
    pub fn is_settled(self) -> bool {
        self.mix == self.target
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.target = if dark { 1.0 } else { 0.0 };
    }

    pub fn toggle(&mut self) {
        self.set_dark(!self.is_dark());
    }

    /// Moves the mix one step toward the target and returns it.
    pub fn step(&mut self) -> f64 {
        self.mix = if self.mix < self.target {
            (self.mix + self.step).min(self.target)
        } else {
            (self.mix - self.step).max(self.target)
        };
        self.mix
    }
}

#[cfg(test)]
mod tests {
    use super::ThemeTransition;

    #[test]
    fn toggling_reaches_dark_in_fifty_ticks() {
        let mut theme = ThemeTransition::default();
        theme.toggle();
        let mut ticks = 0;
        while !theme.is_settled() {
            theme.step();
            ticks += 1;
            assert!(ticks <= 51, "mix must settle");
        }
        assert!((50..=51).contains(&ticks));
        assert_eq!(theme.mix(), 1.0);
    }

    #[test]
    fn settled_theme_does_not_move() {
        let mut theme = ThemeTransition::new(true);
        assert_eq!(theme.step(), 1.0);
        assert!(theme.is_dark());
    }
}
