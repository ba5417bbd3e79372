//! qrstrip entrypoint

use clap::Parser;
use qrstrip::config::EccLevel;
use qrstrip::{Error, Result, StripConfig, StripGenerator, logging};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "qrstrip",
    version,
    about = "Render labeled QR codes for a set of links into one JPEG strip"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrstrip.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the strip image output path
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Override the manifest output path
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Override the QR side length in pixels
    #[arg(long, value_name = "PIXELS")]
    size: Option<u32>,

    /// Override the tile/strip padding in pixels
    #[arg(long, value_name = "PIXELS")]
    padding: Option<u32>,

    /// Override the caption band height in pixels
    #[arg(long, value_name = "PIXELS")]
    text_height: Option<u32>,

    /// Override the error correction level (low/medium/quartile/high)
    #[arg(long, value_name = "LEVEL")]
    ecc: Option<String>,

    /// Override the caption font file
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Override the caption size in pixels
    #[arg(long, value_name = "PIXELS")]
    font_size: Option<f32>,

    /// Override the JPEG quality (1-100)
    #[arg(long, value_name = "QUALITY")]
    quality: Option<u8>,

    /// Decode the written strip and check every tile against its URL
    #[arg(long)]
    verify: bool,

    /// Output the result summary as formatted JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = StripConfig::load(cli.config.as_deref())?;

    if let Some(ref output) = cli.output {
        config.output.image = output.clone();
    }

    if let Some(ref manifest) = cli.manifest {
        config.output.manifest = Some(manifest.clone());
    }

    if let Some(size) = cli.size {
        config.layout.qr_size = size;
    }

    if let Some(padding) = cli.padding {
        config.layout.padding = padding;
    }

    if let Some(text_height) = cli.text_height {
        config.layout.text_height = text_height;
    }

    if let Some(ref ecc) = cli.ecc {
        config.layout.error_correction = ecc.parse::<EccLevel>().map_err(Error::Config)?;
    }

    if let Some(ref font) = cli.font {
        config.font.path = Some(font.clone());
    }

    if let Some(font_size) = cli.font_size {
        config.font.size = font_size;
    }

    if let Some(quality) = cli.quality {
        config.output.jpeg_quality = quality;
    }

    if cli.print_config {
        let rendered = toml::to_string_pretty(&config)
            .map_err(|e| Error::Config(format!("Failed to render configuration: {e}")))?;
        print!("{rendered}");
        return Ok(());
    }

    logging::init(&config.logging)?;

    let generator = StripGenerator::new(config)?;
    let artifacts = generator.run()?;

    if cli.verify {
        generator.verify_written(&artifacts)?;
    }

    if cli.json {
        let summary = json!({
            "image": artifacts.image,
            "manifest": artifacts.manifest,
            "verified": cli.verify,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("QR codes saved to: {}", artifacts.image.display());
        println!("Configuration saved to: {}", artifacts.manifest.display());
    }

    Ok(())
}
