use crate::error::ConfigError;
use crate::theme::{Theme, ThemeMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Generation parameters. Two layouts built from equal configs are identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub seed: u64,
    pub target_count: usize,
    pub bounds_min: f64,
    pub bounds_max: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub attempts_per_point: usize,
    /// Jitter amplitude in cell widths, centred on the cell.
    pub jitter: f64,
    pub depth_weight: f64,
    pub node_size_base: f64,
    pub node_size_scale: f64,
    pub node_opacity_base: f64,
    pub node_opacity_scale: f64,
    pub edge_opacity_base: f64,
    pub edge_opacity_scale: f64,
    pub edge_width_base: f64,
    pub edge_width_scale: f64,
    pub curve_scale: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            target_count: 40,
            bounds_min: -35.0,
            bounds_max: 135.0,
            min_distance: 18.0,
            max_distance: 38.0,
            attempts_per_point: 10,
            jitter: 1.0,
            depth_weight: 100.0,
            node_size_base: 0.6,
            node_size_scale: 1.2,
            node_opacity_base: 0.3,
            node_opacity_scale: 0.5,
            edge_opacity_base: 0.1,
            edge_opacity_scale: 0.3,
            edge_width_base: 0.12,
            edge_width_scale: 0.2,
            curve_scale: 12.0,
        }
    }
}

impl NetworkConfig {
    pub fn max_attempts(&self) -> usize {
        self.target_count.saturating_mul(self.attempts_per_point)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let reals = [
            ("boundsMin", self.bounds_min),
            ("boundsMax", self.bounds_max),
            ("minDistance", self.min_distance),
            ("maxDistance", self.max_distance),
            ("jitter", self.jitter),
            ("depthWeight", self.depth_weight),
            ("nodeSizeBase", self.node_size_base),
            ("nodeSizeScale", self.node_size_scale),
            ("nodeOpacityBase", self.node_opacity_base),
            ("nodeOpacityScale", self.node_opacity_scale),
            ("edgeOpacityBase", self.edge_opacity_base),
            ("edgeOpacityScale", self.edge_opacity_scale),
            ("edgeWidthBase", self.edge_width_base),
            ("edgeWidthScale", self.edge_width_scale),
            ("curveScale", self.curve_scale),
        ];
        for (field, value) in reals {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if self.bounds_min >= self.bounds_max {
            return Err(ConfigError::InvalidBounds {
                min: self.bounds_min,
                max: self.bounds_max,
            });
        }
        // Bounds may sit anywhere on the plane; everything else is a magnitude.
        for (field, value) in reals.into_iter().skip(2) {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    /// Uniform scale covering the whole surface; overflow is cropped.
    #[default]
    Slice,
    /// Uniform scale fitting the whole view window; letterboxed.
    Meet,
    Stretch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    /// Visible plane window on both axes. Points outside it bleed off the edge.
    pub view_min: f64,
    pub view_max: f64,
    pub aspect: AspectMode,
    pub background: bool,
    pub glow: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            view_min: 0.0,
            view_max: 100.0,
            aspect: AspectMode::Slice,
            background: true,
            glow: false,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [self.width, self.height, self.view_min, self.view_max];
        if values.iter().any(|v| !v.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
            || self.view_min >= self.view_max
        {
            return Err(ConfigError::InvalidView);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub network: NetworkConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    background: Option<String>,
    node_color: Option<String>,
    edge_color: Option<String>,
    glow_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct NetworkConfigFile {
    seed: Option<u64>,
    target_count: Option<usize>,
    bounds_min: Option<f64>,
    bounds_max: Option<f64>,
    min_distance: Option<f64>,
    max_distance: Option<f64>,
    attempts_per_point: Option<usize>,
    jitter: Option<f64>,
    depth_weight: Option<f64>,
    node_size_base: Option<f64>,
    node_size_scale: Option<f64>,
    node_opacity_base: Option<f64>,
    node_opacity_scale: Option<f64>,
    edge_opacity_base: Option<f64>,
    edge_opacity_scale: Option<f64>,
    edge_width_base: Option<f64>,
    edge_width_scale: Option<f64>,
    curve_scale: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    view_min: Option<f64>,
    view_max: Option<f64>,
    aspect: Option<AspectMode>,
    background: Option<bool>,
    glow: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    network: Option<NetworkConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json5 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    parse_config(&contents, is_json5)
}

/// Parses a config document and merges it over the defaults.
pub fn parse_config(contents: &str, is_json5: bool) -> Result<Config, ConfigError> {
    let parsed: ConfigFile = if is_json5 {
        json5::from_str(contents)?
    } else {
        serde_json::from_str(contents)?
    };

    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        let mode = ThemeMode::from_token(theme_name)
            .ok_or_else(|| ConfigError::UnknownTheme(theme_name.to_string()))?;
        config.theme = Theme::for_mode(mode);
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.node_color {
            config.theme.node_color = v;
        }
        if let Some(v) = vars.edge_color {
            config.theme.edge_color = v;
        }
        if let Some(v) = vars.glow_color {
            config.theme.glow_color = v;
        }
    }

    if let Some(file) = parsed.network {
        let net = &mut config.network;
        if let Some(v) = file.seed {
            net.seed = v;
        }
        if let Some(v) = file.target_count {
            net.target_count = v;
        }
        if let Some(v) = file.bounds_min {
            net.bounds_min = v;
        }
        if let Some(v) = file.bounds_max {
            net.bounds_max = v;
        }
        if let Some(v) = file.min_distance {
            net.min_distance = v;
        }
        if let Some(v) = file.max_distance {
            net.max_distance = v;
        }
        if let Some(v) = file.attempts_per_point {
            net.attempts_per_point = v;
        }
        if let Some(v) = file.jitter {
            net.jitter = v;
        }
        if let Some(v) = file.depth_weight {
            net.depth_weight = v;
        }
        if let Some(v) = file.node_size_base {
            net.node_size_base = v;
        }
        if let Some(v) = file.node_size_scale {
            net.node_size_scale = v;
        }
        if let Some(v) = file.node_opacity_base {
            net.node_opacity_base = v;
        }
        if let Some(v) = file.node_opacity_scale {
            net.node_opacity_scale = v;
        }
        if let Some(v) = file.edge_opacity_base {
            net.edge_opacity_base = v;
        }
        if let Some(v) = file.edge_opacity_scale {
            net.edge_opacity_scale = v;
        }
        if let Some(v) = file.edge_width_base {
            net.edge_width_base = v;
        }
        if let Some(v) = file.edge_width_scale {
            net.edge_width_scale = v;
        }
        if let Some(v) = file.curve_scale {
            net.curve_scale = v;
        }
    }

    if let Some(file) = parsed.render {
        let render = &mut config.render;
        if let Some(v) = file.width {
            render.width = v;
        }
        if let Some(v) = file.height {
            render.height = v;
        }
        if let Some(v) = file.view_min {
            render.view_min = v;
        }
        if let Some(v) = file.view_max {
            render.view_max = v;
        }
        if let Some(v) = file.aspect {
            render.aspect = v;
        }
        if let Some(v) = file.background {
            render.background = v;
        }
        if let Some(v) = file.glow {
            render.glow = v;
        }
    }

    config.network.validate()?;
    config.render.validate()?;
    Ok(config)
}
