use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "acrylic", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an acrylic material PNG from a background image.
    Generate(GenerateArgs),
    /// Write the bundled default noise texture as a PNG.
    Noise(NoiseArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Background image (any format the `image` crate decodes).
    #[arg(long)]
    background: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Start from the default preset (scale 0.85, stack blur 80, saturation 2, bundled noise).
    #[arg(long)]
    defaults: bool,

    /// Material parameters JSON; flags given on the command line override it.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Pre-blur scale factor in (0, 1].
    #[arg(long)]
    scale: Option<f32>,

    /// Blur algorithm.
    #[arg(long, value_enum)]
    blur: Option<BlurChoice>,

    /// Blur radius. Gaussian: (0, 25]. Stack: whole number >= 1.
    #[arg(long)]
    radius: Option<f32>,

    /// Saturation (0 = grayscale, 1 = identity).
    #[arg(long)]
    saturation: Option<f32>,

    /// Tint colour as #AARRGGBB.
    #[arg(long)]
    tint: Option<acrylic::ArgbColor>,

    /// Noise overlay image. Unreadable files are skipped with a warning.
    #[arg(long)]
    noise: Option<PathBuf>,

    /// Fail instead of stretching or tiling overlays whose size differs from the blurred background.
    #[arg(long)]
    strict_layers: bool,
}

#[derive(Parser, Debug)]
struct NoiseArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlurChoice {
    Gaussian,
    Stack,
}

impl From<BlurChoice> for acrylic::BlurKind {
    fn from(choice: BlurChoice) -> Self {
        match choice {
            BlurChoice::Gaussian => Self::Gaussian,
            BlurChoice::Stack => Self::Stack,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Noise(args) => cmd_noise(args),
    }
}

fn read_params_json(path: &Path) -> anyhow::Result<acrylic::MaterialParams> {
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let r = BufReader::new(f);
    let params: acrylic::MaterialParams =
        serde_json::from_reader(r).with_context(|| "parse material params JSON")?;
    Ok(params)
}

fn build_config(args: &GenerateArgs) -> anyhow::Result<acrylic::Configuration> {
    let background = acrylic::load_image(&args.background)?;

    let mut builder = acrylic::Configuration::builder().background(background);
    if args.defaults {
        builder = builder.use_defaults();
    }

    let mut params = match &args.params {
        Some(path) => read_params_json(path)?,
        None => builder.clone().build().params().clone(),
    };
    if let Some(scale) = args.scale {
        params.scale_factor = scale;
    }
    if let Some(saturation) = args.saturation {
        params.saturation = saturation;
    }
    if let Some(tint) = args.tint {
        params.tint = Some(tint);
    }
    if args.strict_layers {
        params.alignment = acrylic::LayerAlignment::Strict;
    }
    params.blur = match (args.blur, args.radius, params.blur) {
        (Some(kind), Some(radius), _) => Some(acrylic::BlurConfig {
            kind: kind.into(),
            radius,
        }),
        (Some(kind), None, prev) => {
            let kind = acrylic::BlurKind::from(kind);
            let radius = match prev {
                Some(prev) if prev.kind == kind => prev.radius,
                _ => default_radius(kind),
            };
            Some(acrylic::BlurConfig { kind, radius })
        }
        (None, Some(radius), Some(prev)) => Some(acrylic::BlurConfig { radius, ..prev }),
        (None, Some(_), None) => {
            anyhow::bail!("--radius needs a blur algorithm (--blur, --defaults or --params)")
        }
        (None, None, prev) => prev,
    };

    builder = builder.params(params);
    if let Some(noise) = &args.noise {
        builder = builder.noise_file(noise);
    }
    Ok(builder.build())
}

/// Radius used when `--blur` switches algorithm without `--radius`.
fn default_radius(kind: acrylic::BlurKind) -> f32 {
    match kind {
        acrylic::BlurKind::Gaussian => acrylic::MAX_GAUSSIAN_RADIUS,
        acrylic::BlurKind::Stack => acrylic::DEFAULT_STACK_RADIUS as f32,
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let out = acrylic::generate(&config)?;
    acrylic::encode_png(&out, &args.out)?;

    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        out.width(),
        out.height()
    );
    Ok(())
}

fn cmd_noise(args: NoiseArgs) -> anyhow::Result<()> {
    let noise = acrylic::default_noise_texture();
    acrylic::encode_png(&noise, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
