//! QRSTRIP - labeled QR code strip generator
//!
//! This library renders a set of labeled URLs into one horizontal JPEG
//! strip of captioned QR codes, plus a JSON manifest describing the
//! links, layout parameters, and output path.
//!
//! # Features
//!
//! - **Configurable**: links and layout come from a TOML/YAML file,
//!   environment overrides, or compiled-in defaults
//! - **Captioned tiles**: each QR code gets a centered label, with
//!   font fallback to an embedded face
//! - **Self-verifying**: the written strip can be decoded back and
//!   checked against the configured URLs
//!
//! # Example
//!
//! ```no_run
//! use qrstrip::{StripConfig, StripGenerator};
//!
//! fn main() -> anyhow::Result<()> {
//!     let generator = StripGenerator::new(StripConfig::default())?;
//!     let artifacts = generator.run()?;
//!
//!     println!("Strip written to {}", artifacts.image.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod board;
pub mod config;
pub mod error;
pub mod font;
pub mod logging;
pub mod manifest;
pub mod qr;
pub mod render;

// Re-exports for convenience
pub use error::{Error, Result};

pub use board::{RenderedStrip, StripArtifacts, StripGenerator};
pub use config::{
    EccLevel, FontOptions, LayoutOptions, LinkEntry, LogRotation, LoggingOptions, OutputOptions,
    StripConfig,
};
pub use font::{CaptionFont, FontSource};
pub use manifest::{Manifest, QrCodeSettings};
pub use qr::{QrDecoder, QrEncoder};
