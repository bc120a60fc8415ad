use crate::config::RenderConfig;
use crate::layout::{Edge, NetworkLayout, Point};
use crate::theme::Theme;
use crate::viewport::Viewport;
use anyhow::Result;
use std::path::Path;

const GLOW_ID: &str = "backdrop-glow";
const GLOW_OPACITY: f64 = 0.3;
const GLOW_RADIUS_RATIO: f64 = 0.375;

/// Draws the layout back to front: edges by ascending mean depth, then points
/// by ascending depth on top. Occlusion comes from draw order alone.
///
/// An empty layout yields a bare `<svg>` element with no background or glow.
pub fn render_svg(layout: &NetworkLayout, theme: &Theme, config: &RenderConfig) -> String {
    let viewport = Viewport::from_config(config);
    let width = config.width;
    let height = config.height;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" aria-hidden=\"true\">",
    ));
    if layout.is_empty() {
        svg.push_str("</svg>");
        return svg;
    }

    if config.glow {
        svg.push_str(&format!(
            "<defs><radialGradient id=\"{GLOW_ID}\"><stop offset=\"0\" stop-color=\"{color}\" stop-opacity=\"{GLOW_OPACITY}\"/><stop offset=\"1\" stop-color=\"{color}\" stop-opacity=\"0\"/></radialGradient></defs>",
            color = escape_xml(&theme.glow_color),
        ));
    }

    if config.background {
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(&theme.background)
        ));
    }

    if config.glow {
        let radius = width.min(height) * GLOW_RADIUS_RATIO;
        svg.push_str(&format!(
            "<circle class=\"{GLOW_ID}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{radius:.2}\" fill=\"url(#{GLOW_ID})\"/>",
            width / 2.0,
            height / 2.0,
        ));
    }

    let edges = edge_draw_order(layout);
    if !edges.is_empty() {
        svg.push_str(&format!(
            "<g class=\"network-edges\" fill=\"none\" stroke=\"{}\" stroke-linecap=\"round\">",
            escape_xml(&theme.edge_color)
        ));
        for edge in edges {
            let (Some(a), Some(b)) = (layout.point(edge.source), layout.point(edge.target)) else {
                continue;
            };
            svg.push_str(&edge_svg(edge, a, b, &viewport));
        }
        svg.push_str("</g>");
    }

    let points = point_draw_order(layout);
    if !points.is_empty() {
        svg.push_str(&format!(
            "<g class=\"network-nodes\" fill=\"{}\">",
            escape_xml(&theme.node_color)
        ));
        for point in points {
            let (cx, cy) = viewport.map(point.x, point.y);
            svg.push_str(&format!(
                "<circle class=\"network-node\" cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill-opacity=\"{:.3}\"/>",
                viewport.length(point.size),
                point.opacity.clamp(0.0, 1.0)
            ));
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

/// Edges farthest first; ties fall back to the numeric `(source, target)` pair.
pub fn edge_draw_order(layout: &NetworkLayout) -> Vec<&Edge> {
    let mut edges: Vec<&Edge> = layout.edges.iter().collect();
    edges.sort_by(|a, b| {
        a.depth
            .total_cmp(&b.depth)
            .then_with(|| (a.source, a.target).cmp(&(b.source, b.target)))
    });
    edges
}

/// Points farthest first; ties fall back to the id.
pub fn point_draw_order(layout: &NetworkLayout) -> Vec<&Point> {
    let mut points: Vec<&Point> = layout.points.iter().collect();
    points.sort_by(|a, b| a.z.total_cmp(&b.z).then_with(|| a.id.cmp(&b.id)));
    points
}

fn edge_svg(edge: &Edge, a: &Point, b: &Point, viewport: &Viewport) -> String {
    let (x1, y1) = viewport.map(a.x, a.y);
    let (x2, y2) = viewport.map(b.x, b.y);
    let (cx, cy) = viewport.map(edge.control.0, edge.control.1);
    format!(
        "<path class=\"network-edge\" d=\"M {x1:.2} {y1:.2} Q {cx:.2} {cy:.2} {x2:.2} {y2:.2}\" stroke-width=\"{:.2}\" stroke-opacity=\"{:.3}\"/>",
        viewport.length(edge.width),
        edge.opacity.clamp(0.0, 1.0)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(size) = usvg::Size::from_wh(render_cfg.width as f32, render_cfg.height as f32) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::layout::compute_layout;

    #[test]
    fn render_svg_basic() {
        let layout = compute_layout(&NetworkConfig::default());
        let svg = render_svg(&layout, &Theme::light(), &RenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("class=\"network-node\"").count(), layout.points.len());
        assert_eq!(svg.matches("class=\"network-edge\"").count(), layout.edges.len());
    }

    #[test]
    fn edges_are_drawn_beneath_nodes() {
        let layout = compute_layout(&NetworkConfig::default());
        assert!(!layout.edges.is_empty());
        let svg = render_svg(&layout, &Theme::dark(), &RenderConfig::default());
        let last_edge = svg.rfind("network-edge\"").unwrap();
        let first_node = svg.find("network-node\"").unwrap();
        assert!(last_edge < first_node);
    }

    #[test]
    fn draw_order_is_back_to_front() {
        let layout = compute_layout(&NetworkConfig::default());
        let points = point_draw_order(&layout);
        assert!(points.windows(2).all(|w| w[0].z <= w[1].z));
        let edges = edge_draw_order(&layout);
        assert!(edges.windows(2).all(|w| w[0].depth <= w[1].depth));
    }

    #[test]
    fn theme_only_changes_colours() {
        let layout = compute_layout(&NetworkConfig::default());
        let config = RenderConfig::default();
        let light = render_svg(&layout, &Theme::light(), &config);
        let dark = render_svg(&layout, &Theme::dark(), &config);
        assert_ne!(light, dark);
        let light_geometry = light.replace(&Theme::light().background, "")
            .replace(&Theme::light().node_color, "")
            .replace(&Theme::light().edge_color, "");
        let dark_geometry = dark.replace(&Theme::dark().background, "")
            .replace(&Theme::dark().node_color, "")
            .replace(&Theme::dark().edge_color, "");
        assert_eq!(light_geometry, dark_geometry);
    }

    #[test]
    fn glow_and_background_are_optional() {
        let layout = compute_layout(&NetworkConfig::default());
        let bare = RenderConfig {
            background: false,
            ..RenderConfig::default()
        };
        let svg = render_svg(&layout, &Theme::light(), &bare);
        assert!(!svg.contains("<rect"));
        assert!(!svg.contains(GLOW_ID));

        let glowing = RenderConfig {
            glow: true,
            ..RenderConfig::default()
        };
        let svg = render_svg(&layout, &Theme::light(), &glowing);
        assert!(svg.contains("radialGradient"));
        assert!(svg.contains("url(#backdrop-glow)"));
    }

    #[test]
    fn empty_layout_draws_nothing() {
        let layout = compute_layout(&NetworkConfig {
            target_count: 0,
            ..NetworkConfig::default()
        });
        let glowing = RenderConfig {
            glow: true,
            ..RenderConfig::default()
        };
        let svg = render_svg(&layout, &Theme::dark(), &glowing);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        for element in ["<rect", "<circle", "<path", "<defs", "<g"] {
            assert!(!svg.contains(element), "unexpected {element}");
        }
    }

    #[test]
    fn equal_depth_edges_tie_on_numeric_endpoints() {
        let mut layout = compute_layout(&NetworkConfig {
            target_count: 0,
            ..NetworkConfig::default()
        });
        let edge = |source: usize, target: usize| Edge {
            key: Edge::pair_key(source, target),
            source,
            target,
            control: (0.0, 0.0),
            curve_offset: 0.0,
            strength: 0.5,
            depth: 0.5,
            opacity: 0.2,
            width: 0.2,
        };
        // "10-2" sorts before "2-3" as a string.
        layout.edges = vec![edge(10, 2), edge(2, 3), edge(1, 10)];
        let order: Vec<&str> = edge_draw_order(&layout)
            .iter()
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(order, ["1-10", "2-3", "10-2"]);
    }

    #[test]
    fn escapes_theme_strings() {
        let layout = compute_layout(&NetworkConfig::default());
        let mut theme = Theme::light();
        theme.background = "\"><script>".to_string();
        let svg = render_svg(&layout, &theme, &RenderConfig::default());
        assert!(!svg.contains("<script>"));
    }
}
