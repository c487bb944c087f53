use serde::{Deserialize, Serialize};

use super::polygon::{Edge, Vertex};
use crate::data::model::{AxisColumns, Dataset, Record};
use crate::error::{CoreError, Result};

// ---------------------------------------------------------------------------
// SquareRegion
// ---------------------------------------------------------------------------

/// Axis-aligned square given by its centre and half side length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SquareRegion {
    pub center_x: f64,
    pub center_y: f64,
    pub half_size: f64,
}

impl Default for SquareRegion {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            half_size: 1.0,
        }
    }
}

impl SquareRegion {
    pub fn validate(&self) -> Result<()> {
        if !self.half_size.is_finite() || self.half_size <= 0.0 {
            return Err(CoreError::invalid(
                "halfSize",
                format!("must be a positive number, got {}", self.half_size),
            ));
        }
        if !self.center_x.is_finite() {
            return Err(CoreError::invalid(
                "centerX",
                format!("must be finite, got {}", self.center_x),
            ));
        }
        if !self.center_y.is_finite() {
            return Err(CoreError::invalid(
                "centerY",
                format!("must be finite, got {}", self.center_y),
            ));
        }
        Ok(())
    }

    /// Boundary-inclusive containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.center_x - self.half_size <= x
            && x <= self.center_x + self.half_size
            && self.center_y - self.half_size <= y
            && y <= self.center_y + self.half_size
    }

    /// The four sides in bottom, top, left, right order.
    pub fn outline(&self) -> [Edge; 4] {
        let (x0, x1) = (self.center_x - self.half_size, self.center_x + self.half_size);
        let (y0, y1) = (self.center_y - self.half_size, self.center_y + self.half_size);
        let edge = |ax, ay, bx, by| Edge {
            from: Vertex::new(ax, ay),
            to: Vertex::new(bx, by),
        };
        [
            edge(x0, y0, x1, y0),
            edge(x0, y1, x1, y1),
            edge(x0, y0, x0, y1),
            edge(x1, y0, x1, y1),
        ]
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Partition of a dataset's plottable records against a [`SquareRegion`].
///
/// Every entry is a record's `row`. `inside` and `outside` are disjoint, keep
/// input order, and together cover exactly the records whose x and y are both
/// numbers; the others are listed in `excluded`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassifiedSet {
    pub inside: Vec<usize>,
    pub outside: Vec<usize>,
    pub excluded: Vec<usize>,
}

impl ClassifiedSet {
    /// Number of records that took part in the classification.
    pub fn plotted(&self) -> usize {
        self.inside.len() + self.outside.len()
    }

    pub fn inside_records<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a Record> {
        self.inside.iter().filter_map(move |&row| dataset.record(row))
    }

    pub fn outside_records<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a Record> {
        self.outside.iter().filter_map(move |&row| dataset.record(row))
    }
}

/// Split `dataset` into records inside / outside `region`.
///
/// Records whose x or y cell is not a `Number` are not coerced; they go to
/// `excluded` and appear in neither partition.
pub fn classify(dataset: &Dataset, region: &SquareRegion, axes: &AxisColumns) -> ClassifiedSet {
    let mut set = ClassifiedSet::default();
    for record in &dataset.records {
        match axes.point_of(record) {
            Some((x, y)) if region.contains(x, y) => set.inside.push(record.row),
            Some(_) => set.outside.push(record.row),
            None => set.excluded.push(record.row),
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;
    use proptest::prelude::*;

    fn unit() -> SquareRegion {
        SquareRegion::default()
    }

    #[test]
    fn splits_near_and_far_points() {
        let ds = parse_csv("x,y\n0,0\n5,5").unwrap();
        let set = classify(&ds, &unit(), &AxisColumns::default());
        assert_eq!(set.inside, vec![0]);
        assert_eq!(set.outside, vec![1]);
        assert!(set.excluded.is_empty());
        let inside: Vec<_> = set
            .inside_records(&ds)
            .map(|r| r.point("x", "y"))
            .collect();
        assert_eq!(inside, vec![Some((0.0, 0.0))]);
        let outside: Vec<_> = set
            .outside_records(&ds)
            .map(|r| r.point("x", "y"))
            .collect();
        assert_eq!(outside, vec![Some((5.0, 5.0))]);
    }

    #[test]
    fn boundary_is_inside() {
        let r = unit();
        assert!(r.contains(1.0, 0.0));
        assert!(r.contains(-1.0, -1.0));
        assert!(r.contains(1.0, 1.0));
        assert!(!r.contains(1.0 + 1e-9, 0.0));
    }

    #[test]
    fn non_numeric_coordinates_are_excluded() {
        let ds = parse_csv("x,y\n0,0\nabc,0\n0,\n3,3").unwrap();
        let set = classify(&ds, &unit(), &AxisColumns::default());
        assert_eq!(set.inside, vec![0]);
        assert_eq!(set.outside, vec![3]);
        assert_eq!(set.excluded, vec![1, 2]);
        assert_eq!(set.plotted(), 2);
    }

    #[test]
    fn uses_configured_axis_columns() {
        let ds = parse_csv("lon,lat\n10,20\n0,0").unwrap();
        let axes = AxisColumns {
            x: "lon".into(),
            y: "lat".into(),
        };
        let region = SquareRegion {
            center_x: 10.0,
            center_y: 20.0,
            half_size: 0.5,
        };
        let set = classify(&ds, &region, &axes);
        assert_eq!(set.inside, vec![0]);
        assert_eq!(set.outside, vec![1]);
    }

    #[test]
    fn outline_has_four_sides_on_the_boundary() {
        let r = SquareRegion {
            center_x: 2.0,
            center_y: 3.0,
            half_size: 1.0,
        };
        let sides = r.outline();
        assert_eq!(sides[0].from, Vertex::new(1.0, 2.0));
        assert_eq!(sides[0].to, Vertex::new(3.0, 2.0));
        assert_eq!(sides[1].from, Vertex::new(1.0, 4.0));
        assert_eq!(sides[3].to, Vertex::new(3.0, 4.0));
        for e in sides {
            assert!(r.contains(e.from.x, e.from.y) && r.contains(e.to.x, e.to.y));
        }
    }

    #[test]
    fn rejects_non_positive_half_size() {
        let mut r = unit();
        r.half_size = 0.0;
        assert!(matches!(
            r.validate(),
            Err(CoreError::InvalidParameter { name: "halfSize", .. })
        ));
        r.half_size = 1.0;
        r.center_y = f64::NAN;
        assert!(r.validate().is_err());
    }

    proptest! {
        #[test]
        fn partition_is_total_and_disjoint(
            cells in prop::collection::vec((prop::option::of(-10i32..10), prop::option::of(-10i32..10)), 1..50),
            cx in -5.0f64..5.0,
            cy in -5.0f64..5.0,
            half in 0.1f64..5.0,
        ) {
            let body: String = cells
                .iter()
                .map(|(x, y)| {
                    let fmt = |v: &Option<i32>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
                    format!("{},{}\n", fmt(x), fmt(y))
                })
                .collect();
            let ds = parse_csv(&format!("x,y\n{body}")).unwrap();
            let region = SquareRegion { center_x: cx, center_y: cy, half_size: half };
            let set = classify(&ds, &region, &AxisColumns::default());

            let numeric = cells.iter().filter(|(x, y)| x.is_some() && y.is_some()).count();
            prop_assert_eq!(set.plotted(), numeric);
            prop_assert_eq!(set.plotted() + set.excluded.len(), ds.len());
            prop_assert!(set.inside.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(set.outside.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(set.inside.iter().all(|r| !set.outside.contains(r)));
        }
    }
}
