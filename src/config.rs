//! qrstrip runtime configuration handling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Ordered list of labeled links to render, left to right
    pub links: Vec<LinkEntry>,
    /// Tile and strip layout parameters
    pub layout: LayoutOptions,
    /// Caption font selection
    pub font: FontOptions,
    /// Output file locations and encoding parameters
    pub output: OutputOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            links: vec![
                LinkEntry::new(
                    "Study Notes",
                    "https://567-labs.github.io/systematically-improving-rag/",
                ),
                LinkEntry::new(
                    "Talks",
                    "https://567-labs.github.io/systematically-improving-rag/talks/",
                ),
                LinkEntry::new(
                    "Slack",
                    "https://join.slack.com/t/improvingrag/shared_invite/zt-3dkinqb3q-vknvaBLoTx5tBj4PpGOVjw",
                ),
            ],
            layout: LayoutOptions::default(),
            font: FontOptions::default(),
            output: OutputOptions::default(),
            logging: LoggingOptions::default(),
        }
    }
}

impl StripConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrstrip.toml / qrstrip.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrstrip.toml", "qrstrip.yaml", "qrstrip.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrstrip");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.layout.apply_env_overrides();
        self.font.apply_env_overrides();
        self.output.apply_env_overrides();
        self.logging.apply_env_overrides();
    }

    /// Reject configurations the renderer cannot produce sensible output for.
    pub fn validate(&self) -> Result<()> {
        if self.links.is_empty() {
            return Err(Error::Config("At least one link is required".to_string()));
        }
        for entry in &self.links {
            if entry.url.trim().is_empty() {
                return Err(Error::Config(format!(
                    "Link '{}' has an empty URL",
                    entry.label
                )));
            }
        }
        self.layout.validate()?;
        self.output.validate()
    }
}

/// A single labeled URL rendered as one tile of the strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Caption drawn beneath the QR code
    pub label: String,
    /// URL encoded into the QR code
    pub url: String,
}

impl LinkEntry {
    /// Convenience constructor used by defaults and tests
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Pixel layout constants for individual tiles and the combined strip
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Side length of each rendered QR code in pixels
    pub qr_size: u32,
    /// Inner tile padding and outer strip padding in pixels
    pub padding: u32,
    /// Height of the caption band beneath each QR code
    pub text_height: u32,
    /// QR error correction level
    pub error_correction: EccLevel,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            qr_size: 400,
            padding: 20,
            text_height: 60,
            error_correction: EccLevel::High,
        }
    }
}

impl LayoutOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(size) = env::var("QRSTRIP_QR_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.qr_size = parsed;
            }
        }
        if let Ok(padding) = env::var("QRSTRIP_PADDING") {
            if let Ok(parsed) = padding.parse::<u32>() {
                self.padding = parsed;
            }
        }
        if let Ok(height) = env::var("QRSTRIP_TEXT_HEIGHT") {
            if let Ok(parsed) = height.parse::<u32>() {
                self.text_height = parsed;
            }
        }
        if let Ok(ecc) = env::var("QRSTRIP_ECC") {
            if let Some(parsed) = EccLevel::parse(&ecc) {
                self.error_correction = parsed;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.qr_size == 0 {
            return Err(Error::Config("qr_size must be nonzero".to_string()));
        }
        if self.text_height == 0 {
            return Err(Error::Config("text_height must be nonzero".to_string()));
        }
        Ok(())
    }

    /// Width of a single tile: QR plus padding on both sides.
    pub fn tile_width(&self) -> u32 {
        self.qr_size + 2 * self.padding
    }

    /// Height of a single tile: QR, top padding, and the caption band.
    pub fn tile_height(&self) -> u32 {
        self.qr_size + self.text_height + self.padding
    }
}

/// Caption font selection with fallback to the embedded face
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    /// Preferred TrueType font file; embedded DejaVu Sans is used when
    /// unset or unreadable
    pub path: Option<PathBuf>,
    /// Caption size in pixels
    pub size: f32,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            path: None,
            size: 32.0,
        }
    }
}

impl FontOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(path) = env::var("QRSTRIP_FONT") {
            if path.trim().is_empty() {
                self.path = None;
            } else {
                self.path = Some(PathBuf::from(path));
            }
        }
        if let Ok(size) = env::var("QRSTRIP_FONT_SIZE") {
            if let Ok(parsed) = size.parse::<f32>() {
                self.size = parsed;
            }
        }
    }
}

/// Output file locations and JPEG encoding parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Path of the combined strip image
    pub image: PathBuf,
    /// Path of the JSON manifest; defaults to config.json next to the image
    pub manifest: Option<PathBuf>,
    /// JPEG quality in 1..=100
    pub jpeg_quality: u8,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            image: PathBuf::from("assets/images/codes.jpeg"),
            manifest: None,
            jpeg_quality: 95,
        }
    }
}

impl OutputOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(image) = env::var("QRSTRIP_OUTPUT") {
            self.image = PathBuf::from(image);
        }
        if let Ok(manifest) = env::var("QRSTRIP_MANIFEST") {
            if manifest.trim().is_empty() {
                self.manifest = None;
            } else {
                self.manifest = Some(PathBuf::from(manifest));
            }
        }
        if let Ok(quality) = env::var("QRSTRIP_JPEG_QUALITY") {
            if let Ok(parsed) = quality.parse::<u8>() {
                self.jpeg_quality = parsed;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(Error::Config(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Resolve the manifest path, defaulting to config.json beside the image.
    pub fn manifest_path(&self) -> PathBuf {
        match &self.manifest {
            Some(path) => path.clone(),
            None => {
                let mut path = self.image.clone();
                path.set_file_name("config.json");
                path
            }
        }
    }
}

/// QR error correction level, ordered from least to most redundant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EccLevel {
    /// ~7% of codewords recoverable
    Low,
    /// ~15% of codewords recoverable
    Medium,
    /// ~25% of codewords recoverable
    Quartile,
    /// ~30% of codewords recoverable
    High,
}

impl EccLevel {
    /// Parse a level identifier (case-insensitive) from a string slice.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "low" | "l" => Some(Self::Low),
            "medium" | "m" => Some(Self::Medium),
            "quartile" | "q" => Some(Self::Quartile),
            "high" | "h" => Some(Self::High),
            _ => None,
        }
    }

    /// Uppercase level name as recorded in the manifest.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::Quartile => "QUARTILE",
            Self::High => "HIGH",
        }
    }

    /// Map onto the encoder crate's level type.
    pub fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            Self::Low => qrcode::EcLevel::L,
            Self::Medium => qrcode::EcLevel::M,
            Self::Quartile => qrcode::EcLevel::Q,
            Self::High => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for EccLevel {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unsupported error correction level '{value}', expected low/medium/quartile/high")
        })
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRSTRIP_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRSTRIP_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRSTRIP_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRSTRIP_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRSTRIP_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_carries_three_links() {
        let config = StripConfig::default();
        assert_eq!(config.links.len(), 3);
        assert_eq!(config.links[0].label, "Study Notes");
        assert_eq!(config.links[1].label, "Talks");
        assert_eq!(config.links[2].label, "Slack");
        config.validate().expect("default config must validate");
    }

    #[test]
    fn tile_dimensions_follow_layout_constants() {
        let layout = LayoutOptions::default();
        assert_eq!(layout.tile_width(), 440);
        assert_eq!(layout.tile_height(), 480);
    }

    #[test]
    fn ecc_level_parses_case_insensitively() {
        assert_eq!(EccLevel::parse("HIGH"), Some(EccLevel::High));
        assert_eq!(EccLevel::parse("q"), Some(EccLevel::Quartile));
        assert_eq!(EccLevel::parse("bogus"), None);
        assert_eq!(EccLevel::High.label(), "HIGH");
    }

    #[test]
    fn toml_config_overrides_defaults() {
        let toml_src = r#"
            [[links]]
            label = "Docs"
            url = "https://example.com/docs"

            [layout]
            qr_size = 200
            error_correction = "medium"

            [output]
            image = "out/strip.jpeg"
            jpeg_quality = 80
        "#;
        let config: StripConfig = toml::from_str(toml_src).expect("parse toml");
        assert_eq!(config.links.len(), 1);
        assert_eq!(config.layout.qr_size, 200);
        assert_eq!(config.layout.error_correction, EccLevel::Medium);
        // Unspecified sections keep their defaults
        assert_eq!(config.layout.padding, 20);
        assert_eq!(config.output.jpeg_quality, 80);
        assert_eq!(config.font.size, 32.0);
    }

    #[test]
    fn empty_links_rejected() {
        let config = StripConfig {
            links: Vec::new(),
            ..StripConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_quality_rejected() {
        let mut config = StripConfig::default();
        config.output.jpeg_quality = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn manifest_path_defaults_beside_image() {
        let output = OutputOptions::default();
        assert_eq!(
            output.manifest_path(),
            PathBuf::from("assets/images/config.json")
        );
    }
}
