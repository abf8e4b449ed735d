pub mod animation;
pub mod data_source;
pub mod math;
pub mod series;
pub mod types;
pub mod visible_range;
pub mod window;

pub use animation::{
    GridlineCadence, GridlineFadeQueue, GridlineSet, LabelDensity, ViewAnimation,
    YScaleAnimation,
};
pub use data_source::{ColumnarChart, load_columnar_charts};
pub use math::{GridStepRule, format_axis_value, nice_step};
pub use series::{ChartData, Series, SeriesVisibility};
pub use types::{Rect, Viewport};
pub use visible_range::{VisibleSlice, sample_index_at};
pub use window::PreviewWindow;
