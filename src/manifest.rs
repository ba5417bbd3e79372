//! JSON manifest describing a generated strip

use crate::config::StripConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Sidecar record of the links, layout parameters, and output path
/// of one generator run.
///
/// Serialization is deterministic: the `links` map preserves the
/// configured order, so an unchanged configuration produces
/// byte-identical JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Label to URL mapping, in configuration order
    pub links: Map<String, Value>,
    /// Layout parameters the strip was rendered with
    pub qr_code_settings: QrCodeSettings,
    /// Path of the written strip image
    pub output: String,
}

/// Layout parameters echoed into the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeSettings {
    /// QR side length in pixels
    pub size: u32,
    /// Tile and strip padding in pixels
    pub padding: u32,
    /// Caption band height in pixels
    pub text_height: u32,
    /// Uppercase error correction level name
    pub error_correction: String,
}

impl Manifest {
    /// Build the manifest for a configuration.
    pub fn from_config(config: &StripConfig) -> Self {
        let mut links = Map::new();
        for entry in &config.links {
            links.insert(entry.label.clone(), Value::String(entry.url.clone()));
        }

        Self {
            links,
            qr_code_settings: QrCodeSettings {
                size: config.layout.qr_size,
                padding: config.layout.padding,
                text_height: config.layout.text_height,
                error_correction: config.layout.error_correction.label().to_string(),
            },
            output: config.output.image.display().to_string(),
        }
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest to disk, overwriting any existing file.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LinkEntry, StripConfig};

    fn sample_config() -> StripConfig {
        StripConfig {
            links: vec![
                LinkEntry::new("Zeta", "https://example.com/z"),
                LinkEntry::new("Alpha", "https://example.com/a"),
            ],
            ..StripConfig::default()
        }
    }

    #[test]
    fn links_preserve_configuration_order() {
        let manifest = Manifest::from_config(&sample_config());
        let keys: Vec<&String> = manifest.links.keys().collect();
        assert_eq!(keys, ["Zeta", "Alpha"]);
    }

    #[test]
    fn settings_echo_layout_constants() {
        let manifest = Manifest::from_config(&StripConfig::default());
        assert_eq!(manifest.qr_code_settings.size, 400);
        assert_eq!(manifest.qr_code_settings.padding, 20);
        assert_eq!(manifest.qr_code_settings.text_height, 60);
        assert_eq!(manifest.qr_code_settings.error_correction, "HIGH");
        assert_eq!(manifest.output, "assets/images/codes.jpeg");
    }

    #[test]
    fn serialization_is_deterministic() {
        let config = sample_config();
        let first = Manifest::from_config(&config).to_json_string().unwrap();
        let second = Manifest::from_config(&config).to_json_string().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn json_shape_matches_sidecar_format() {
        let manifest = Manifest::from_config(&StripConfig::default());
        let value: Value = serde_json::from_str(&manifest.to_json_string().unwrap()).unwrap();
        let object = value.as_object().unwrap();
        let fields: Vec<&String> = object.keys().collect();
        assert_eq!(fields, ["links", "qr_code_settings", "output"]);
        assert_eq!(
            value["links"]["Study Notes"],
            "https://567-labs.github.io/systematically-improving-rag/"
        );
        assert_eq!(value["qr_code_settings"]["error_correction"], "HIGH");
    }
}
