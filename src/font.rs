//! Caption font loading with fallback
//!
//! Resolution order: the configured font file, then a short list of
//! common system faces, then the DejaVu Sans face embedded in the
//! binary. A missing or unparseable preferred font is never fatal.

use crate::config::FontOptions;
use crate::error::{Error, Result};
use ab_glyph::FontRef;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

const SYSTEM_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

/// Where the resolved caption font came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// The font file named in the configuration
    Preferred(PathBuf),
    /// A probed system font
    System(PathBuf),
    /// The DejaVu Sans face compiled into the binary
    Embedded,
}

/// A resolved caption font together with its backing bytes
pub struct CaptionFont {
    data: Cow<'static, [u8]>,
    source: FontSource,
    /// Caption size in pixels
    pub size: f32,
}

impl CaptionFont {
    /// Resolve a usable caption font. Always succeeds: the embedded
    /// face is the last resort.
    pub fn load(options: &FontOptions) -> Self {
        if let Some(path) = &options.path {
            match read_font(path) {
                Ok(data) => {
                    tracing::debug!(path = %path.display(), "Using configured caption font");
                    return Self {
                        data: Cow::Owned(data),
                        source: FontSource::Preferred(path.clone()),
                        size: options.size,
                    };
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Configured font unusable, falling back"
                    );
                }
            }
        } else {
            for candidate in SYSTEM_CANDIDATES {
                let path = Path::new(candidate);
                if let Ok(data) = read_font(path) {
                    tracing::debug!(path = %path.display(), "Using system caption font");
                    return Self {
                        data: Cow::Owned(data),
                        source: FontSource::System(path.to_path_buf()),
                        size: options.size,
                    };
                }
            }
        }

        tracing::debug!("Using embedded caption font");
        Self {
            data: Cow::Borrowed(EMBEDDED_FONT),
            source: FontSource::Embedded,
            size: options.size,
        }
    }

    /// Borrow the font for measurement and drawing.
    pub fn font(&self) -> Result<FontRef<'_>> {
        FontRef::try_from_slice(&self.data)
            .map_err(|e| Error::Font(format!("Failed to parse caption font: {e}")))
    }

    /// Where this font was resolved from.
    pub fn source(&self) -> &FontSource {
        &self.source
    }
}

// A candidate must parse before it is accepted; corrupt files fall
// through to the next source.
fn read_font(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path)?;
    FontRef::try_from_slice(&data).map_err(|e| Error::Font(format!("{e}")))?;
    Ok(data)
}
