use serde::{Deserialize, Serialize};

/// Stacked surfaces a frame paints into, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    /// Page background and the preview strip polylines.
    Background,
    /// Plot gridlines, labels, series, preview vignette and toggle buttons.
    Middle,
    /// Point-inspection overlay.
    Foreground,
}

impl CanvasLayerKind {
    pub const ALL: [Self; 3] = [Self::Background, Self::Middle, Self::Foreground];
}

/// Independently repainted part of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RedrawRegion {
    Plot,
    Preview,
    Buttons,
    Mark,
}

impl RedrawRegion {
    /// Paint order inside one frame.
    pub const ALL: [Self; 4] = [Self::Preview, Self::Plot, Self::Buttons, Self::Mark];

    #[must_use]
    pub const fn layer(self) -> CanvasLayerKind {
        match self {
            Self::Preview => CanvasLayerKind::Background,
            Self::Plot | Self::Buttons => CanvasLayerKind::Middle,
            Self::Mark => CanvasLayerKind::Foreground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasLayerKind, RedrawRegion};

    #[test]
    fn regions_map_onto_three_layers() {
        let layers: Vec<CanvasLayerKind> =
            RedrawRegion::ALL.iter().map(|region| region.layer()).collect();
        assert_eq!(
            layers,
            vec![
                CanvasLayerKind::Background,
                CanvasLayerKind::Middle,
                CanvasLayerKind::Middle,
                CanvasLayerKind::Foreground,
            ]
        );
    }
}
