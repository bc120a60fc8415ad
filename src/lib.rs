#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod sampler;
pub mod theme;
pub mod viewport;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{AspectMode, Config, NetworkConfig, RenderConfig, load_config, parse_config};
pub use error::ConfigError;
pub use layout::{Edge, LayoutCache, NetworkLayout, Point, compute_layout};
pub use layout_dump::fingerprint;
pub use render::render_svg;
pub use theme::{Theme, ThemeMode};

/// Everything needed to produce the backdrop in one call.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub network: NetworkConfig,
    pub render: RenderConfig,
}

impl RenderOptions {
    pub fn light() -> Self {
        Self::default()
    }

    pub fn dark() -> Self {
        Self {
            theme: Theme::dark(),
            ..Self::default()
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        Self {
            theme: Theme::for_mode(mode),
            ..Self::default()
        }
    }
}

impl From<Config> for RenderOptions {
    fn from(config: Config) -> Self {
        Self {
            theme: config.theme,
            network: config.network,
            render: config.render,
        }
    }
}

/// Generates the layout for `options.network` and renders it.
pub fn render(options: &RenderOptions) -> String {
    let layout = compute_layout(&options.network);
    render_svg(&layout, &options.theme, &options.render)
}

/// Like [`render`], but reuses the cached layout when the generation
/// parameters are unchanged, so a theme switch does not regenerate.
pub fn render_cached(cache: &mut LayoutCache, options: &RenderOptions) -> String {
    let layout = cache.get_or_compute(&options.network);
    render_svg(&layout, &options.theme, &options.render)
}
