use serde::{Deserialize, Serialize};

use crate::data::range::AxisRange;

/// Slider domain for one interactive parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlDomain {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub const NUM_POINTS: ControlDomain = ControlDomain::new(3.0, 12.0, 1.0);
pub const RADIUS: ControlDomain = ControlDomain::new(0.5, 5.0, 0.1);
pub const CENTER: ControlDomain = ControlDomain::new(-5.0, 5.0, 0.1);
pub const ROTATION: ControlDomain = ControlDomain::new(0.0, 360.0, 1.0);

/// Step of the region centre sliders.
pub const REGION_STEP: f64 = 0.1;

impl ControlDomain {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Domain spanning an observed data range.
    pub fn from_range(range: AxisRange, step: f64) -> Self {
        Self::new(range.min, range.max, step)
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }

    /// Round to the nearest step counted from `min`, then clamp.
    pub fn snap(&self, v: f64) -> f64 {
        if self.step <= 0.0 {
            return self.clamp(v);
        }
        let steps = ((v - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }
}

/// Domains of the two region-centre sliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionDomains {
    pub center_x: ControlDomain,
    pub center_y: ControlDomain,
}

impl RegionDomains {
    pub fn from_ranges(x: AxisRange, y: AxisRange) -> Self {
        Self {
            center_x: ControlDomain::from_range(x, REGION_STEP),
            center_y: ControlDomain::from_range(y, REGION_STEP),
        }
    }
}
