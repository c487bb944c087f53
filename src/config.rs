use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::data::model::AxisColumns;
use crate::data::range::AxisRange;
use crate::error::{CoreError, Result};
use crate::geometry::polygon::PolygonParams;
use crate::geometry::region::SquareRegion;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "POLYSCATTER_CONFIG";

// ---------------------------------------------------------------------------
// ViewerConfig
// ---------------------------------------------------------------------------

/// Start-up settings. Every field is optional in the JSON file:
///
/// ```json
/// {
///   "axes": { "x": "lon", "y": "lat" },
///   "default_range": { "min": 0.0, "max": 10.0 },
///   "polygon": { "numPoints": 6, "radius": 1.5, "centerX": 0, "centerY": 0, "rotationDegrees": 0 },
///   "region": { "centerX": 0, "centerY": 0, "halfSize": 1 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub axes: AxisColumns,
    /// Range reported for an axis with no numeric values.
    pub default_range: AxisRange,
    pub polygon: PolygonParams,
    pub region: SquareRegion,
}

impl ViewerConfig {
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let config: ViewerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config from `$POLYSCATTER_CONFIG`, or defaults when unset or unusable.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::from_file(Path::new(&path)) {
            Ok(config) => {
                info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_axes()?;
        self.validate_default_range()?;
        self.polygon.validate()?;
        self.region.validate()
    }

    pub fn validate_axes(&self) -> Result<()> {
        if self.axes.x.trim().is_empty() || self.axes.y.trim().is_empty() {
            return Err(CoreError::invalid("axes", "column names must not be empty"));
        }
        Ok(())
    }

    pub fn validate_default_range(&self) -> Result<()> {
        let r = self.default_range;
        if !(r.min.is_finite() && r.max.is_finite() && r.min <= r.max) {
            return Err(CoreError::invalid(
                "default_range",
                format!("needs finite min <= max, got {}..{}", r.min, r.max),
            ));
        }
        Ok(())
    }
}
