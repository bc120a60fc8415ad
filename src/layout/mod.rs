mod cache;
mod placement;
mod proximity;
pub(crate) mod types;
pub use cache::LayoutCache;
pub use placement::PlacementStats;
pub use types::*;

pub use placement::planar_distance;
pub use proximity::weighted_distance;

use crate::config::NetworkConfig;
use tracing::debug;

/// Runs placement then the proximity scan for `config`.
///
/// Total for any parameters: an under-filled point set or an empty edge set
/// is a normal result.
pub fn compute_layout(config: &NetworkConfig) -> NetworkLayout {
    compute_layout_with_stats(config).0
}

pub fn compute_layout_with_stats(config: &NetworkConfig) -> (NetworkLayout, PlacementStats) {
    let (points, stats) = placement::place_points(config);
    debug!(
        seed = config.seed,
        requested = stats.requested,
        accepted = stats.accepted,
        attempts = stats.attempts,
        rejected = stats.rejected,
        "placed network points"
    );

    let edges = proximity::build_edges(&points, config);
    debug!(
        points = points.len(),
        edges = edges.len(),
        max_distance = config.max_distance,
        "built proximity edges"
    );

    let layout = NetworkLayout {
        seed: config.seed,
        bounds: Bounds {
            min: config.bounds_min,
            max: config.bounds_max,
        },
        points,
        edges,
    };
    (layout, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_deterministic() {
        let config = NetworkConfig::default();
        assert_eq!(compute_layout(&config), compute_layout(&config));
    }

    #[test]
    fn edges_reference_placed_points() {
        let layout = compute_layout(&NetworkConfig::default());
        assert!(!layout.points.is_empty());
        for edge in &layout.edges {
            assert!(edge.source < edge.target);
            assert!(layout.point(edge.source).is_some());
            assert!(layout.point(edge.target).is_some());
        }
    }

    #[test]
    fn seed_changes_layout() {
        let a = compute_layout(&NetworkConfig::default());
        let b = compute_layout(&NetworkConfig {
            seed: 7,
            ..NetworkConfig::default()
        });
        assert_ne!(a.points, b.points);
    }

    #[test]
    fn stats_match_layout() {
        let (layout, stats) = compute_layout_with_stats(&NetworkConfig::default());
        assert_eq!(stats.accepted, layout.points.len());
        assert_eq!(stats.requested, 40);
    }
}
