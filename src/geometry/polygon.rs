use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

// ---------------------------------------------------------------------------
// Vertex / Edge
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Directed segment `from → to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
}

// ---------------------------------------------------------------------------
// PolygonParams
// ---------------------------------------------------------------------------

/// Largest vertex count accepted; the sliders stop well below it.
pub const MAX_POINTS: usize = 1024;

/// The five scalars describing a regular polygon inscribed in a circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolygonParams {
    pub num_points: usize,
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub rotation_degrees: f64,
}

impl Default for PolygonParams {
    fn default() -> Self {
        Self {
            num_points: 5,
            radius: 2.0,
            center_x: 3.0,
            center_y: 3.0,
            rotation_degrees: 0.0,
        }
    }
}

impl PolygonParams {
    pub fn validate(&self) -> Result<()> {
        if !(3..=MAX_POINTS).contains(&self.num_points) {
            return Err(CoreError::invalid(
                "numPoints",
                format!("must be in 3..={MAX_POINTS}, got {}", self.num_points),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(CoreError::invalid(
                "radius",
                format!("must be a positive number, got {}", self.radius),
            ));
        }
        for (name, v) in [
            ("centerX", self.center_x),
            ("centerY", self.center_y),
            ("rotationDegrees", self.rotation_degrees),
        ] {
            if !v.is_finite() {
                return Err(CoreError::invalid(name, format!("must be finite, got {v}")));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Polygon generation
// ---------------------------------------------------------------------------

/// Vertices in generation order and the closed loop of edges through them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    /// `edges[i]` runs from vertex `i` to vertex `(i + 1) % n`.
    pub edges: Vec<Edge>,
}

impl Polygon {
    /// Whether the edges form one cycle visiting every vertex exactly once.
    pub fn is_closed_cycle(&self) -> bool {
        let n = self.vertices.len();
        self.edges.len() == n
            && self.edges.iter().enumerate().all(|(i, e)| {
                e.from == self.vertices[i] && e.to == self.vertices[(i + 1) % n]
            })
    }
}

/// Vertex `i` sits at angle `i·2π/n + rotation` on the circle of `radius`
/// around the centre.
pub fn generate(params: &PolygonParams) -> Result<Polygon> {
    params.validate()?;

    let n = params.num_points;
    let rotation = params.rotation_degrees * PI / 180.0;

    let vertices: Vec<Vertex> = (0..n)
        .map(|i| {
            let angle = i as f64 * 2.0 * PI / n as f64 + rotation;
            Vertex::new(
                params.center_x + params.radius * angle.cos(),
                params.center_y + params.radius * angle.sin(),
            )
        })
        .collect();

    let edges = (0..n)
        .map(|i| Edge {
            from: vertices[i],
            to: vertices[(i + 1) % n],
        })
        .collect();

    Ok(Polygon { vertices, edges })
}
