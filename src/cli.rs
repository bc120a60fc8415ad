use crate::config::{AspectMode, Config, load_config};
use crate::layout::compute_layout_with_stats;
use crate::layout_dump::{fingerprint, write_layout_dump};
use crate::render::{render_svg, write_output_svg};
use crate::theme::{Theme, ThemeMode};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "netbg", version, about = "Procedural network backdrop renderer")]
pub struct Args {
    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (.json or .json5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Colour scheme; overrides the config file
    #[arg(short = 't', long = "theme", value_enum)]
    pub theme: Option<ThemeMode>,

    /// Layout seed
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Requested node count
    #[arg(short = 'n', long = "count")]
    pub count: Option<usize>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// How the view window is fitted to the surface
    #[arg(long = "aspect", value_enum)]
    pub aspect: Option<AspectMode>,

    /// Draw the accent glow beneath the network
    #[arg(long = "glow")]
    pub glow: bool,

    /// Skip the background fill (transparent output)
    #[arg(long = "transparent")]
    pub transparent: bool,

    /// Write the generated points and edges as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let (layout, stats) = compute_layout_with_stats(&config.network);
    info!(
        seed = layout.seed,
        points = layout.points.len(),
        requested = stats.requested,
        edges = layout.edges.len(),
        fingerprint = %format!("{:016x}", fingerprint(&layout)),
        "generated network layout"
    );

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)
            .with_context(|| format!("writing layout dump to {}", path.display()))?;
        debug!(path = %path.display(), "wrote layout dump");
    }

    let svg = render_svg(&layout, &config.theme, &config.render);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &config)?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,network_backdrop=info"));
    // Stdout may carry the SVG stream.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())
        .with_context(|| match args.config.as_deref() {
            Some(path) => format!("loading config {}", path.display()),
            None => "loading default config".to_string(),
        })?;
    apply_overrides(&mut config, args);
    config.network.validate()?;
    config.render.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(mode) = args.theme {
        // A palette switch discards themeVariables from the file.
        if config.theme.mode != mode {
            config.theme = Theme::for_mode(mode);
        }
    }
    if let Some(seed) = args.seed {
        config.network.seed = seed;
    }
    if let Some(count) = args.count {
        config.network.target_count = count;
    }
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(aspect) = args.aspect {
        config.render.aspect = aspect;
    }
    if args.glow {
        config.render.glow = true;
    }
    if args.transparent {
        config.render.background = false;
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}
