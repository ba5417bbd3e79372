//! QR code encoder

use crate::config::EccLevel;
use crate::error::{Error, Result};
use image::imageops::FilterType;
use image::{GrayImage, Luma, imageops};
use qrcode::QrCode;

/// Number of pixels per QR module before resampling.
const MODULE_PIXELS: u32 = 10;

/// QR code encoder
pub struct QrEncoder {
    /// Error correction level
    ec_level: qrcode::EcLevel,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (High ECC)
    pub fn new() -> Self {
        Self {
            ec_level: qrcode::EcLevel::H,
        }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ec_level(level: EccLevel) -> Self {
        Self {
            ec_level: level.to_ec_level(),
        }
    }

    /// Encode data into a QR bitmap at the native module resolution.
    ///
    /// The rendered image includes the standard 4-module quiet zone.
    pub fn encode(&self, data: &str) -> Result<GrayImage> {
        let code = QrCode::with_error_correction_level(data, self.ec_level)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))?;

        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
            .quiet_zone(true)
            .build();

        Ok(image)
    }

    /// Encode data and resample the bitmap to an exact square size.
    pub fn encode_to_size(&self, data: &str, size: u32) -> Result<GrayImage> {
        let native = self.encode(data)?;
        if native.width() == size {
            return Ok(native);
        }
        Ok(imageops::resize(&native, size, size, FilterType::Lanczos3))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_produces_square_image() {
        let encoder = QrEncoder::new();
        let img = encoder.encode("https://example.com").unwrap();
        assert!(img.width() > 0);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn encode_to_size_matches_requested_dimensions() {
        let encoder = QrEncoder::with_ec_level(EccLevel::High);
        let img = encoder
            .encode_to_size("https://example.com/some/path", 400)
            .unwrap();
        assert_eq!(img.width(), 400);
        assert_eq!(img.height(), 400);
    }

    #[test]
    fn round_trip() {
        use crate::qr::QrDecoder;

        let encoder = QrEncoder::new();
        let decoder = QrDecoder::new();

        let original = "https://example.com/round-trip";
        let qr_image = encoder.encode_to_size(original, 400).unwrap();
        let decoded = decoder.decode_gray(&qr_image).unwrap();

        assert_eq!(decoded, original);
    }
}
