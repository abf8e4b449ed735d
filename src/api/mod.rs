mod axis_label_format;
mod button_scene_builder;
mod chart_deck;
mod engine;
mod engine_config;
mod engine_init;
mod frame_advance;
mod interaction_controller;
mod invalidation;
mod mark_scene_builder;
mod preview_scene_builder;
mod render_frame_builder;
mod theme_transition;

pub use axis_label_format::{DateLabelPattern, format_timestamp};
pub use chart_deck::ChartDeck;
pub use engine::ChartEngine;
pub use engine_config::{
    AnimationTuning, ChartConfig, ChartLayout, GestureConfig, MAX_LABEL_LEVELS, RedrawConfig,
    TimestampUnit, WindowRange,
};
pub use frame_advance::TickReport;
pub use invalidation::DirtyRegions;
pub use theme_transition::ThemeTransition;
