use crate::config::NetworkConfig;
use crate::sampler::{CURVE_STREAM, pair_index, sample};

use super::{Edge, Point};

/// Distance used for connectivity. `depth_weight` makes depth separation
/// dominate, so points far apart in depth rarely connect.
pub fn weighted_distance(a: &Point, b: &Point, depth_weight: f64) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    (dx * dx + dy * dy + dz * dz * depth_weight).sqrt()
}

/// Connects every unordered pair whose weighted distance is strictly below
/// `max_distance`. Quadratic in the point count.
pub(super) fn build_edges(points: &[Point], config: &NetworkConfig) -> Vec<Edge> {
    let n = points.len();
    let mut edges = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let a = &points[i];
            let b = &points[j];
            let d = weighted_distance(a, b, config.depth_weight);
            if d >= config.max_distance {
                continue;
            }

            let strength = 1.0 - d / config.max_distance;
            let depth = (a.z + b.z) * 0.5;
            let opacity = (config.edge_opacity_base + strength * config.edge_opacity_scale)
                * (0.5 + depth * 0.5);
            let width = config.edge_width_base + depth * config.edge_width_scale;

            let stream = CURVE_STREAM.wrapping_add(pair_index(a.id, b.id));
            let jitter = sample(config.seed, stream) - 0.5;
            let curve_offset = (a.z - b.z).abs() * config.curve_scale * jitter;

            edges.push(Edge {
                key: Edge::pair_key(a.id, b.id),
                source: a.id,
                target: b.id,
                control: control_point(a, b, curve_offset),
                curve_offset,
                strength,
                depth,
                opacity,
                width,
            });
        }
    }

    edges
}

/// Quadratic control point whose curve passes through the chord midpoint
/// shifted by `offset` along the chord's unit normal.
fn control_point(a: &Point, b: &Point, offset: f64) -> (f64, f64) {
    let mid_x = (a.x + b.x) * 0.5;
    let mid_y = (a.y + b.y) * 0.5;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return (mid_x, mid_y);
    }
    let nx = -dy / len;
    let ny = dx / len;
    (mid_x + nx * offset * 2.0, mid_y + ny * offset * 2.0)
}
