use std::cell::RefCell;

use network_backdrop::{LayoutCache, RenderOptions, ThemeMode, render_cached};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

thread_local! {
    static CACHE: RefCell<LayoutCache> = RefCell::new(LayoutCache::new());
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackdropOptions {
    theme: Option<String>,
    seed: Option<u64>,
    count: Option<usize>,
    width: Option<f64>,
    height: Option<f64>,
    glow: Option<bool>,
    transparent: Option<bool>,
}

fn build_render_options(options: BackdropOptions) -> RenderOptions {
    let mode = options
        .theme
        .as_deref()
        .and_then(ThemeMode::from_token)
        .unwrap_or_default();
    let mut render_options = RenderOptions::for_mode(mode);

    if let Some(seed) = options.seed {
        render_options.network.seed = seed;
    }
    if let Some(count) = options.count {
        render_options.network.target_count = count;
    }
    if let Some(width) = options.width.filter(|w| w.is_finite() && *w > 0.0) {
        render_options.render.width = width;
    }
    if let Some(height) = options.height.filter(|h| h.is_finite() && *h > 0.0) {
        render_options.render.height = height;
    }
    if let Some(glow) = options.glow {
        render_options.render.glow = glow;
    }
    if let Some(transparent) = options.transparent {
        render_options.render.background = !transparent;
    }

    render_options
}

fn render_backdrop(options: BackdropOptions) -> String {
    let render_options = build_render_options(options);
    CACHE.with(|cache| render_cached(&mut cache.borrow_mut(), &render_options))
}

#[wasm_bindgen]
pub fn render_network_svg(options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<BackdropOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        BackdropOptions::default()
    };

    Ok(render_backdrop(options))
}

#[cfg(test)]
mod tests {
    use crate::{BackdropOptions, build_render_options, render_backdrop};

    #[test]
    fn renders_with_no_options() {
        let svg = render_backdrop(BackdropOptions::default());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("network-node"));
    }

    #[test]
    fn theme_flag_only_recolours() {
        let light = build_render_options(BackdropOptions::default());
        let dark = build_render_options(BackdropOptions {
            theme: Some("dark".to_string()),
            ..BackdropOptions::default()
        });
        assert_eq!(light.network, dark.network);
        assert_ne!(light.theme, dark.theme);
    }

    #[test]
    fn ignores_bad_surface_size() {
        let options = build_render_options(BackdropOptions {
            width: Some(-5.0),
            height: Some(f64::NAN),
            ..BackdropOptions::default()
        });
        assert_eq!(options.render.width, 1200.0);
        assert_eq!(options.render.height, 800.0);
    }
}
