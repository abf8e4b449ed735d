use chrono::{DateTime, Utc};

use super::TimestampUnit;

/// Date layouts used by the plot axis and the mark tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLabelPattern {
    /// `Mar 7`
    AxisDay,
    /// `Thu, Mar 7`
    TooltipDay,
}

impl DateLabelPattern {
    const fn format_str(self) -> &'static str {
        match self {
            Self::AxisDay => "%b %-d",
            Self::TooltipDay => "%a, %b %-d",
        }
    }
}

/// Formats a sample timestamp as a UTC date.
///
/// Returns `None` for timestamps chrono cannot represent; callers skip the
/// label instead of failing the frame.
#[must_use]
pub fn format_timestamp(
    timestamp: f64,
    unit: TimestampUnit,
    pattern: DateLabelPattern,
) -> Option<String> {
    let millis = quantize_millis(unit.to_millis(timestamp))?;
    let dt = DateTime::<Utc>::from_timestamp_millis(millis)?;
    Some(dt.format(pattern.format_str()).to_string())
}

fn quantize_millis(millis: f64) -> Option<i64> {
    if !millis.is_finite() {
        return None;
    }
    let millis = millis.round();
    if millis > (i64::MAX as f64) || millis < (i64::MIN as f64) {
        return None;
    }
    Some(millis as i64)
}
