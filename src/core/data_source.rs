//! Columnar chart payloads: every column is an array whose first element is
//! the column id, and side tables map ids to kind, display name and color.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

use super::series::{ChartData, Series};

const X_COLUMN_KIND: &str = "x";
const LINE_COLUMN_KIND: &str = "line";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnarChart {
    pub columns: Vec<Vec<Value>>,
    pub types: IndexMap<String, String>,
    #[serde(default)]
    pub names: IndexMap<String, String>,
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}

impl ColumnarChart {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart payload: {e}")))
    }

    /// Builds chart data from the `x` column and every `line` column, in
    /// column order.
    pub fn into_chart_data(self) -> ChartResult<ChartData> {
        let mut timestamps = None;
        let mut series = Vec::new();

        for column in &self.columns {
            let (id, values) = split_column(column)?;
            let kind = self.types.get(id).map(String::as_str).unwrap_or(id);
            match kind {
                X_COLUMN_KIND => timestamps = Some(values),
                LINE_COLUMN_KIND => {
                    let label = self.names.get(id).cloned().unwrap_or_else(|| id.to_owned());
                    let color = self.colors.get(id).ok_or_else(|| {
                        ChartError::InvalidData(format!("column `{id}` has no color"))
                    })?;
                    series.push(Series::with_hex_color(label, color, values)?);
                }
                other => {
                    warn!(column = id, kind = other, "skipping unsupported column kind");
                }
            }
        }

        let timestamps = timestamps.ok_or_else(|| {
            ChartError::InvalidData("chart payload has no `x` column".to_owned())
        })?;
        debug!(
            samples = timestamps.len(),
            series = series.len(),
            "loaded columnar chart"
        );
        ChartData::new(timestamps, series)
    }
}

/// Parses a JSON array of columnar charts.
pub fn load_columnar_charts(input: &str) -> ChartResult<Vec<ChartData>> {
    let charts: Vec<ColumnarChart> = serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse chart list: {e}")))?;
    charts
        .into_iter()
        .map(ColumnarChart::into_chart_data)
        .collect()
}

fn split_column(column: &[Value]) -> ChartResult<(&str, Vec<f64>)> {
    let Some((head, rest)) = column.split_first() else {
        return Err(ChartError::InvalidData("empty column".to_owned()));
    };
    let id = head
        .as_str()
        .ok_or_else(|| ChartError::InvalidData("column id must be a string".to_owned()))?;
    let values = rest
        .iter()
        .map(|value| {
            value.as_f64().ok_or_else(|| {
                ChartError::InvalidData(format!("column `{id}` holds a non-numeric value"))
            })
        })
        .collect::<ChartResult<Vec<f64>>>()?;
    Ok((id, values))
}

#[cfg(test)]
mod tests {
    use super::ColumnarChart;

    const PAYLOAD: &str = r##"{
        "columns": [["x", 1000, 2000, 3000], ["y0", 1, 5, 3], ["y1", 7, 2, 9]],
        "types": {"x": "x", "y0": "line", "y1": "line"},
        "names": {"y0": "Joined", "y1": "Left"},
        "colors": {"y0": "#3DC23F", "y1": "#F34C44"}
    }"##;

    #[test]
    fn builds_series_in_column_order() {
        let data = ColumnarChart::from_json_str(PAYLOAD)
            .and_then(ColumnarChart::into_chart_data)
            .expect("valid payload");
        assert_eq!(data.count(), 3);
        assert_eq!(data.series()[0].label, "Joined");
        assert_eq!(data.series()[1].values, vec![7.0, 2.0, 9.0]);
        assert_eq!(data.max_y(), 9.0);
    }

    #[test]
    fn missing_x_column_is_rejected() {
        let payload = r##"{"columns": [["y0", 1]], "types": {"y0": "line"}, "colors": {"y0": "#000000"}}"##;
        let result = ColumnarChart::from_json_str(payload).and_then(ColumnarChart::into_chart_data);
        assert!(result.is_err());
    }
}
