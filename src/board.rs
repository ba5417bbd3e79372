//! High-level strip generation pipeline

use crate::config::StripConfig;
use crate::error::{Error, Result};
use crate::font::CaptionFont;
use crate::manifest::Manifest;
use crate::qr::{QrDecoder, QrEncoder};
use crate::render::{build_tile, concat_horizontal};
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// In-memory result of rendering all tiles into one strip
#[derive(Debug)]
pub struct RenderedStrip {
    /// The composite image, ready to encode
    pub image: RgbImage,
    /// Width of each tile in pixels
    pub tile_width: u32,
    /// Height of each tile in pixels
    pub tile_height: u32,
}

/// Paths of the files written by a generator run
#[derive(Debug, Clone)]
pub struct StripArtifacts {
    /// The written JPEG strip
    pub image: PathBuf,
    /// The written JSON manifest
    pub manifest: PathBuf,
}

/// Renders a configured set of labeled links into a JPEG strip plus
/// a JSON manifest.
pub struct StripGenerator {
    config: StripConfig,
}

impl StripGenerator {
    /// Create a generator for a validated configuration.
    pub fn new(config: StripConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this generator renders.
    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Render every link into a tile and composite the tiles into one strip.
    pub fn render(&self) -> Result<RenderedStrip> {
        let layout = &self.config.layout;
        let encoder = QrEncoder::with_ec_level(layout.error_correction);
        let caption = CaptionFont::load(&self.config.font);

        let mut tiles = Vec::with_capacity(self.config.links.len());
        for entry in &self.config.links {
            tracing::debug!(label = %entry.label, url = %entry.url, "Rendering tile");
            let qr = encoder.encode_to_size(&entry.url, layout.qr_size)?;
            tiles.push(build_tile(&qr, &entry.label, layout, &caption)?);
        }

        let image = concat_horizontal(&tiles, layout.padding);
        tracing::info!(
            width = image.width(),
            height = image.height(),
            tiles = tiles.len(),
            "Composited strip"
        );

        Ok(RenderedStrip {
            image,
            tile_width: layout.tile_width(),
            tile_height: layout.tile_height(),
        })
    }

    /// Persist the strip as a JPEG and write the manifest beside it.
    ///
    /// Parent directories are created as needed; existing files are
    /// overwritten.
    pub fn write(&self, strip: &RenderedStrip) -> Result<StripArtifacts> {
        let image_path = &self.config.output.image;
        create_parent_dirs(image_path)?;

        let file = File::create(image_path)?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, self.config.output.jpeg_quality);
        strip.image.write_with_encoder(encoder)?;

        let manifest_path = self.config.output.manifest_path();
        create_parent_dirs(&manifest_path)?;
        Manifest::from_config(&self.config).write(&manifest_path)?;

        tracing::info!(
            image = %image_path.display(),
            manifest = %manifest_path.display(),
            "Strip artifacts written"
        );

        Ok(StripArtifacts {
            image: image_path.clone(),
            manifest: manifest_path,
        })
    }

    /// Render and persist in one step.
    pub fn run(&self) -> Result<StripArtifacts> {
        let strip = self.render()?;
        self.write(&strip)
    }

    /// Decode every tile of the written strip and require each to
    /// yield its configured URL exactly.
    pub fn verify_written(&self, artifacts: &StripArtifacts) -> Result<()> {
        let composite = image::open(&artifacts.image)?;
        let decoder = QrDecoder::new();
        let layout = &self.config.layout;

        for (index, entry) in self.config.links.iter().enumerate() {
            let x = layout.padding + index as u32 * layout.tile_width();
            // The QR sub-tile plus its surrounding white padding.
            let region = composite.crop_imm(
                x,
                0,
                layout.tile_width(),
                layout.qr_size + 2 * layout.padding,
            );
            let decoded = decoder.decode(&region).map_err(|e| {
                Error::Verify(format!("tile '{}' did not decode: {e}", entry.label))
            })?;
            if decoded != entry.url {
                return Err(Error::Verify(format!(
                    "tile '{}' decoded to '{}', expected '{}'",
                    entry.label, decoded, entry.url
                )));
            }
            tracing::debug!(label = %entry.label, "Tile verified");
        }

        Ok(())
    }
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
