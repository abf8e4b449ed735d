use tracing::debug;

use crate::core::load_columnar_charts;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartConfig, ChartEngine, ThemeTransition, TickReport};

/// Independent charts driven by one shared theme.
///
/// Charts never share mutable state, so a deck may tick them in any order;
/// with the `parallel-ticks` feature they run on the rayon pool.
pub struct ChartDeck<R: Renderer> {
    charts: Vec<ChartEngine<R>>,
    theme: ThemeTransition,
}

impl<R: Renderer> Default for ChartDeck<R> {
    fn default() -> Self {
        Self::new(ThemeTransition::default())
    }
}

impl<R: Renderer> ChartDeck<R> {
    #[must_use]
    pub fn new(theme: ThemeTransition) -> Self {
        Self {
            charts: Vec::new(),
            theme,
        }
    }

    /// Builds one engine per chart found in a columnar JSON array, all
    /// sharing `config`.
    pub fn from_columnar_json<F>(
        input: &str,
        config: ChartConfig,
        mut make_renderer: F,
    ) -> ChartResult<Self>
    where
        F: FnMut() -> R,
    {
        let mut deck = Self::default();
        for data in load_columnar_charts(input)? {
            deck.push(ChartEngine::new(make_renderer(), config, data)?);
        }
        debug!(charts = deck.len(), "chart deck loaded");
        Ok(deck)
    }

    /// Adds a chart and returns its index.
    pub fn push(&mut self, chart: ChartEngine<R>) -> usize {
        self.charts.push(chart);
        self.charts.len() - 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    #[must_use]
    pub fn charts(&self) -> &[ChartEngine<R>] {
        &self.charts
    }

    #[must_use]
    pub fn chart(&self, index: usize) -> Option<&ChartEngine<R>> {
        self.charts.get(index)
    }

    pub fn chart_mut(&mut self, index: usize) -> Option<&mut ChartEngine<R>> {
        self.charts.get_mut(index)
    }

    #[must_use]
    pub fn theme(&self) -> ThemeTransition {
        self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeTransition {
        &mut self.theme
    }
}

#[cfg(not(feature = "parallel-ticks"))]
impl<R: Renderer> ChartDeck<R> {
    /// Steps the shared theme, then ticks every chart with the new mix.
    pub fn tick_all(&mut self) -> ChartResult<Vec<TickReport>> {
        let mix = self.theme.step();
        self.charts.iter_mut().map(|chart| chart.tick(mix)).collect()
    }
}

#[cfg(feature = "parallel-ticks")]
impl<R: Renderer + Send> ChartDeck<R> {
    /// Steps the shared theme, then ticks every chart with the new mix on
    /// the rayon pool. Reports keep chart order.
    pub fn tick_all(&mut self) -> ChartResult<Vec<TickReport>> {
        use rayon::prelude::*;

        let mix = self.theme.step();
        self.charts
            .par_iter_mut()
            .map(|chart| chart.tick(mix))
            .collect()
    }
}
