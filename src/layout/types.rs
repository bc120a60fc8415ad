use serde::Serialize;

/// A placed node. `z` is a synthetic depth in `[0, 1)`; larger reads as nearer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub size: f64,
    pub opacity: f64,
}

/// A connection between two points, `source < target`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub key: String,
    pub source: usize,
    pub target: usize,
    /// Quadratic control point; the curve passes through the offset midpoint.
    pub control: (f64, f64),
    pub curve_offset: f64,
    pub strength: f64,
    /// Mean endpoint depth, the draw-order key.
    pub depth: f64,
    pub opacity: f64,
    pub width: f64,
}

impl Edge {
    pub fn pair_key(source: usize, target: usize) -> String {
        format!("{source}-{target}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// The immutable result of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkLayout {
    pub seed: u64,
    pub bounds: Bounds,
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
}

impl NetworkLayout {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, id: usize) -> Option<&Point> {
        // Ids are assigned sequentially at acceptance.
        self.points.get(id).filter(|p| p.id == id)
    }
}
