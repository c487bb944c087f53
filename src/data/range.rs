use serde::{Deserialize, Serialize};

use super::model::{AxisColumns, Dataset};

// ---------------------------------------------------------------------------
// AxisRange – observed bounds of one numeric axis
// ---------------------------------------------------------------------------

/// Closed interval `[min, max]` with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl Default for AxisRange {
    /// Used when an axis has no numeric values at all.
    fn default() -> Self {
        Self { min: 0.0, max: 10.0 }
    }
}

impl AxisRange {
    /// Bounds of the finite values in `values`, `None` if there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(AxisRange { min: v, max: v }),
                Some(r) => Some(AxisRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }
}

/// Ranges for both plotted axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisRanges {
    pub x: AxisRange,
    pub y: AxisRange,
}

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Min/max of the numeric values of `column`, ignoring `Text` and `Missing`
/// cells. Falls back to `default` when no numeric value exists.
pub fn estimate_axis(dataset: &Dataset, column: &str, default: AxisRange) -> AxisRange {
    AxisRange::from_values(dataset.records.iter().filter_map(|r| r.number(column)))
        .unwrap_or(default)
}

/// Range of each axis, computed independently: a record with a numeric x but
/// a text y still contributes to the x range.
pub fn estimate(dataset: &Dataset, axes: &AxisColumns, default: AxisRange) -> AxisRanges {
    AxisRanges {
        x: estimate_axis(dataset, &axes.x, default),
        y: estimate_axis(dataset, &axes.y, default),
    }
}
