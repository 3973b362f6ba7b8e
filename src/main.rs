use anyhow::Context;
use clap::Parser;
use imagehue::{ColorImage, Config, Flag, PaletteMatcher};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "imagehue")]
#[command(about = "Rank the dominant named colors of an image")]
struct Cli {
    /// Image to analyse (png, bmp, gif, jpg or jpeg)
    path: PathBuf,

    /// Number of colors to print, 0 for all of them
    #[arg(short = 'n', long, default_value_t = 0)]
    count: usize,

    /// Percent of pixels to sample (0-100)
    #[arg(short, long, default_value_t = imagehue::DEFAULT_PRECISION)]
    precision: u8,

    /// Largest Lab distance for a pixel to count as a reference color
    #[arg(short, long, default_value_t = imagehue::DEFAULT_THRESHOLD)]
    threshold: f32,

    /// Print whether the image is dark, black, light or white instead of its colors
    #[arg(long = "is", value_name = "FLAG")]
    flag: Option<Flag>,

    /// Seed the pixel sampling for repeatable results
    #[arg(long)]
    seed: Option<u64>,

    /// Print the colors as JSON
    #[cfg(feature = "serde")]
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "imagehue=warn".into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::default().precision(cli.precision).threshold(cli.threshold);
    let mut image = ColorImage::load_with(cli.path.as_path(), config)
        .with_context(|| format!("failed to load {}", cli.path.display()))?;

    if let Some(seed) = cli.seed {
        let matcher = PaletteMatcher::new(image.config().get_palette().clone());
        image.histogram_with(&matcher, &mut StdRng::seed_from_u64(seed));
    }

    if let Some(flag) = cli.flag {
        println!("{}", image.is(flag)?);
        return Ok(());
    }

    let swatches = image.primary_colors(cli.count)?;

    #[cfg(feature = "serde")]
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&swatches)?);
        return Ok(());
    }

    for swatch in swatches {
        println!("{} {}", swatch.name(), swatch.population());
    }

    Ok(())
}
