//! sentcloud - render a sentence cloud to PNG
//!
//! Usage:
//!   sentcloud "You are amazing!" "Eres increíble!" -o cloud.png
//!   sentcloud --text speech.txt --colormap plasma --scale 2 -o cloud.png
//!   sentcloud --json fragments.json --config cloud.json -o cloud.png

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use sentcloud::{CloudConfig, Color, ColorScheme, FontTable, Fragment, SentenceCloud, sentences};

/// Render weighted multilingual sentences as a PNG cloud.
#[derive(Parser, Debug)]
#[command(name = "sentcloud", version)]
#[command(about = "Render weighted multilingual sentences as a PNG cloud")]
struct Args {
    /// Sentences, each with weight 1 per occurrence
    sentences: Vec<String>,

    /// Free text file to split into sentences
    #[arg(long, conflicts_with_all = ["json", "sentences"])]
    text: Option<PathBuf>,

    /// JSON file of fragments: [{"text": "...", "weight": 3}, ...]
    #[arg(long, conflicts_with = "sentences")]
    json: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "sentcloud.png")]
    output: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON font table (script -> candidate font paths)
    #[arg(long)]
    fonts: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Seed for reproducible layouts
    #[arg(long)]
    seed: Option<u64>,

    /// Background color (#rrggbb, rgb(r, g, b) or a name)
    #[arg(long)]
    background: Option<Color>,

    /// Colormap for the sentences
    #[arg(long)]
    colormap: Option<ColorScheme>,

    /// Output resolution multiplier
    #[arg(long)]
    scale: Option<f32>,

    /// Shape image; sentences go on white pixels, everything else stays empty
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Config file first, then command-line overrides
    fn cloud_config(&self) -> Result<CloudConfig> {
        let mut config = match &self.config {
            Some(path) => CloudConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CloudConfig::default(),
        };

        if let Some(path) = &self.fonts {
            config.fonts = FontTable::from_json_file(path)
                .with_context(|| format!("loading font table {}", path.display()))?;
        }
        if let Some(width) = self.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.height {
            config.canvas.height = height;
        }
        if let Some(scale) = self.scale {
            config.canvas.scale = scale;
        }
        if let Some(background) = self.background {
            config.canvas.background = background;
        }
        if let Some(colormap) = self.colormap {
            config.layout.color_scheme = colormap;
        }
        if self.seed.is_some() {
            config.layout.seed = self.seed;
        }
        if self.mask.is_some() {
            config.mask = self.mask.clone();
        }
        Ok(config)
    }

    fn fragments(&self) -> Result<Vec<Fragment>> {
        if let Some(path) = &self.text {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            return Ok(sentences::fragments_from_text(&text));
        }
        if let Some(path) = &self.json {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            return serde_json::from_str(&data)
                .with_context(|| format!("parsing fragments in {}", path.display()));
        }
        if self.sentences.is_empty() {
            bail!("no input: pass sentences, --text or --json");
        }
        Ok(Fragment::count_all(self.sentences.iter().cloned()))
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.cloud_config()?;
    let fragments = args.fragments()?;
    tracing::info!("Rendering {} fragments", fragments.len());

    let cloud = SentenceCloud::new(config).context("invalid configuration")?;
    let output = cloud.render(&fragments).context("rendering sentence cloud")?;
    output
        .save_png(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "{}: {} placed, {} skipped, {} dropped ({}x{})",
        args.output.display(),
        output.layout.len(),
        output.layout.skipped.len(),
        output.report.dropped,
        output.canvas.width(),
        output.canvas.height()
    );
    Ok(())
}
