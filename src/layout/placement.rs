use crate::config::NetworkConfig;
use crate::sampler::{DRAWS_PER_CANDIDATE, sample};

use super::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementStats {
    pub requested: usize,
    pub accepted: usize,
    pub attempts: usize,
    pub rejected: usize,
}

/// Jittered-grid rejection sampling.
///
/// Candidates cycle through a `ceil(sqrt(n))`-square grid in row-major order,
/// each offset by up to half a cell (times `jitter`) in both axes. A candidate
/// closer than `min_distance` to any accepted point is discarded. Stops once
/// `target_count` points are accepted or the attempt budget runs out, so an
/// infeasible spacing just yields fewer points.
pub(super) fn place_points(config: &NetworkConfig) -> (Vec<Point>, PlacementStats) {
    let target = config.target_count;
    let max_attempts = config.max_attempts();
    let mut stats = PlacementStats {
        requested: target,
        accepted: 0,
        attempts: 0,
        rejected: 0,
    };
    if target == 0 {
        return (Vec::new(), stats);
    }

    let cells = grid_cells(target);
    let cell_count = cells.saturating_mul(cells);
    let cell = (config.bounds_max - config.bounds_min) / cells as f64;
    let mut points: Vec<Point> = Vec::with_capacity(target.min(1024));

    for attempt in 0..max_attempts {
        if points.len() >= target {
            break;
        }
        stats.attempts += 1;

        let slot = attempt % cell_count;
        let col = slot % cells;
        let row = slot / cells;
        let base = attempt as u64 * DRAWS_PER_CANDIDATE;

        let center_x = config.bounds_min + (col as f64 + 0.5) * cell;
        let center_y = config.bounds_min + (row as f64 + 0.5) * cell;
        let x = center_x + (sample(config.seed, base) - 0.5) * cell * config.jitter;
        let y = center_y + (sample(config.seed, base + 1) - 0.5) * cell * config.jitter;
        let z = sample(config.seed, base + 2);

        if too_close(&points, x, y, config.min_distance) {
            stats.rejected += 1;
            continue;
        }

        points.push(Point {
            id: points.len(),
            x,
            y,
            z,
            size: config.node_size_base + z * config.node_size_scale,
            opacity: config.node_opacity_base + z * config.node_opacity_scale,
        });
    }

    stats.accepted = points.len();
    (points, stats)
}

/// Cells per axis, `ceil(sqrt(target))` and never zero.
pub(crate) fn grid_cells(target: usize) -> usize {
    ((target as f64).sqrt().ceil() as usize).max(1)
}

pub fn planar_distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

fn too_close(points: &[Point], x: f64, y: f64, min_distance: f64) -> bool {
    points
        .iter()
        .any(|p| planar_distance(p.x, p.y, x, y) < min_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(target_count: usize, min_distance: f64) -> NetworkConfig {
        NetworkConfig {
            target_count,
            min_distance,
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn grid_is_ceil_sqrt() {
        assert_eq!(grid_cells(0), 1);
        assert_eq!(grid_cells(1), 1);
        assert_eq!(grid_cells(40), 7);
        assert_eq!(grid_cells(49), 7);
        assert_eq!(grid_cells(50), 8);
    }

    #[test]
    fn zero_target_is_empty() {
        let (points, stats) = place_points(&config(0, 18.0));
        assert!(points.is_empty());
        assert_eq!(stats.attempts, 0);
    }

    #[test]
    fn keeps_min_distance_and_bounds() {
        let cfg = config(60, 18.0);
        let (points, stats) = place_points(&cfg);
        assert!(!points.is_empty());
        assert!(points.len() <= 60);
        assert!(stats.attempts <= cfg.max_attempts());
        assert_eq!(stats.accepted + stats.rejected, stats.attempts);
        for (i, a) in points.iter().enumerate() {
            assert_eq!(a.id, i);
            assert!(a.x >= cfg.bounds_min && a.x <= cfg.bounds_max);
            assert!(a.y >= cfg.bounds_min && a.y <= cfg.bounds_max);
            assert!((0.0..1.0).contains(&a.z));
            for b in &points[i + 1..] {
                assert!(planar_distance(a.x, a.y, b.x, b.y) >= cfg.min_distance);
            }
        }
    }

    #[test]
    fn infeasible_spacing_stops_at_budget() {
        let cfg = config(10, 1000.0);
        let (points, stats) = place_points(&cfg);
        assert!(points.len() <= 1);
        assert_eq!(stats.attempts, cfg.max_attempts());
    }

    #[test]
    fn zero_spacing_fills_on_first_pass() {
        let (points, stats) = place_points(&config(25, 0.0));
        assert_eq!(points.len(), 25);
        assert_eq!(stats.attempts, 25);
    }

    #[test]
    fn zero_jitter_lands_on_cell_centres() {
        let cfg = NetworkConfig {
            target_count: 4,
            min_distance: 0.0,
            jitter: 0.0,
            bounds_min: 0.0,
            bounds_max: 100.0,
            ..NetworkConfig::default()
        };
        let (points, _) = place_points(&cfg);
        let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            coords,
            vec![(25.0, 25.0), (75.0, 25.0), (25.0, 75.0), (75.0, 75.0)]
        );
    }
}
