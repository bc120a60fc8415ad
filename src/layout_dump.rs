use crate::layout::NetworkLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub seed: u64,
    pub bounds: [f64; 2],
    pub fingerprint: String,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub size: f64,
    pub opacity: f64,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub key: String,
    pub from: usize,
    pub to: usize,
    pub control: [f64; 2],
    pub opacity: f64,
    pub width: f64,
}

impl LayoutDump {
    pub fn from_layout(layout: &NetworkLayout) -> Self {
        let nodes = layout
            .points
            .iter()
            .map(|p| NodeDump {
                id: p.id,
                x: p.x,
                y: p.y,
                z: p.z,
                size: p.size,
                opacity: p.opacity,
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|e| EdgeDump {
                key: e.key.clone(),
                from: e.source,
                to: e.target,
                control: [e.control.0, e.control.1],
                opacity: e.opacity,
                width: e.width,
            })
            .collect();

        LayoutDump {
            seed: layout.seed,
            bounds: [layout.bounds.min, layout.bounds.max],
            fingerprint: format!("{:016x}", fingerprint(layout)),
            nodes,
            edges,
        }
    }
}

/// FNV-1a over the exact bit patterns of every point and edge, in order.
///
/// Any change to placement, derived attributes or edge geometry changes the
/// value, which makes it usable as a golden regression check.
pub fn fingerprint(layout: &NetworkLayout) -> u64 {
    let mut hash = FNV_OFFSET;
    let mut feed = |word: u64| {
        for byte in word.to_le_bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    };

    for p in &layout.points {
        feed(p.id as u64);
        for v in [p.x, p.y, p.z, p.size, p.opacity] {
            feed(v.to_bits());
        }
    }
    for e in &layout.edges {
        feed(e.source as u64);
        feed(e.target as u64);
        for v in [e.control.0, e.control.1, e.opacity, e.width] {
            feed(v.to_bits());
        }
    }
    hash
}

pub fn write_layout_dump(path: &Path, layout: &NetworkLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::layout::compute_layout;

    #[test]
    fn empty_layout_hashes_to_offset() {
        let layout = compute_layout(&NetworkConfig {
            target_count: 0,
            ..NetworkConfig::default()
        });
        assert_eq!(fingerprint(&layout), FNV_OFFSET);
    }

    #[test]
    fn fingerprint_tracks_geometry() {
        let layout = compute_layout(&NetworkConfig::default());
        let mut nudged = layout.clone();
        nudged.points[0].x += 1e-9;
        assert_ne!(fingerprint(&layout), fingerprint(&nudged));
    }

    #[test]
    fn dump_serializes_all_entities() {
        let layout = compute_layout(&NetworkConfig::default());
        let dump = LayoutDump::from_layout(&layout);
        let value = serde_json::to_value(&dump).unwrap();
        assert_eq!(value["nodes"].as_array().unwrap().len(), layout.points.len());
        assert_eq!(value["edges"].as_array().unwrap().len(), layout.edges.len());
        assert_eq!(value["fingerprint"].as_str().unwrap().len(), 16);
    }
}
