//! # Codec Module
//!
//! Questo modulo isola le due chiamate al codec immagine dietro trait iniettabili.
//!
//! ## Responsabilità:
//! - [`Decoder`]: Da byte JPEG a [`Bitmap`] RGBA in memoria, più l'hint di
//!   interpolazione applicato prima della codifica
//! - [`Encoder`]: Da [`Bitmap`] a byte WebP lossy con la qualità richiesta
//!
//! ## Implementazioni:
//! - [`JpegDecoder`]: Usa il crate `image` (solo feature `jpeg`)
//! - [`WebpEncoder`]: Usa libwebp tramite il crate `webp`
//!
//! Nei test si usano codec finti, così la pipeline gira senza immagini reali.

use crate::error::{ConvertError, Result};
use image::ImageFormat;
use tracing::debug;

/// Resampling filter recorded on a bitmap for later resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Nearest,
    Bilinear,
    Bicubic,
}

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    interpolation: Option<Interpolation>,
}

impl Bitmap {
    /// Wrap raw RGBA8 pixels. `rgba` must hold `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ConvertError::Decode(format!(
                "pixel buffer has {} bytes, expected {} for {}x{}",
                rgba.len(),
                expected,
                width,
                height
            )));
        }

        Ok(Self {
            width,
            height,
            rgba,
            interpolation: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn interpolation(&self) -> Option<Interpolation> {
        self.interpolation
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = Some(interpolation);
    }
}

/// Turns encoded image bytes into a [`Bitmap`].
pub trait Decoder {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap>;

    /// Apply a resampling hint to a decoded bitmap.
    ///
    /// An `Err` here is [`ConvertError::Interpolation`] and aborts the run.
    fn set_interpolation(&self, bitmap: &mut Bitmap, interpolation: Interpolation) -> Result<()> {
        bitmap.set_interpolation(interpolation);
        Ok(())
    }
}

/// Turns a [`Bitmap`] into encoded image bytes.
pub trait Encoder {
    fn encode(&self, bitmap: &Bitmap, quality: f32) -> Result<Vec<u8>>;
}

/// JPEG decoder backed by the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegDecoder;

impl Decoder for JpegDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
            .map_err(|e| ConvertError::Decode(e.to_string()))?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        debug!("Decoded JPEG {}x{}", width, height);

        Bitmap::from_rgba(width, height, rgba.into_raw())
    }
}

/// Lossy WebP encoder backed by libwebp
#[derive(Debug, Default, Clone, Copy)]
pub struct WebpEncoder;

impl Encoder for WebpEncoder {
    fn encode(&self, bitmap: &Bitmap, quality: f32) -> Result<Vec<u8>> {
        let encoder = webp::Encoder::from_rgba(bitmap.rgba(), bitmap.width(), bitmap.height());
        let memory = encoder
            .encode_simple(false, quality)
            .map_err(|e| ConvertError::Encode(format!("{:?}", e)))?;

        Ok(memory.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageOutputFormat::Jpeg(90))
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_bitmap_rejects_wrong_buffer_length() {
        assert!(Bitmap::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            Bitmap::from_rgba(2, 2, vec![0; 15]),
            Err(ConvertError::Decode(_))
        ));
    }

    #[test]
    fn test_default_set_interpolation_records_hint() {
        let mut bitmap = Bitmap::from_rgba(1, 1, vec![0; 4]).unwrap();
        assert_eq!(bitmap.interpolation(), None);

        JpegDecoder
            .set_interpolation(&mut bitmap, Interpolation::Bicubic)
            .unwrap();
        assert_eq!(bitmap.interpolation(), Some(Interpolation::Bicubic));
    }

    #[test]
    fn test_jpeg_decoder_reads_real_jpeg() {
        let bitmap = JpegDecoder.decode(&sample_jpeg(32, 24)).unwrap();
        assert_eq!(bitmap.width(), 32);
        assert_eq!(bitmap.height(), 24);
        assert_eq!(bitmap.rgba().len(), 32 * 24 * 4);
    }

    #[test]
    fn test_jpeg_decoder_rejects_garbage() {
        let err = JpegDecoder.decode(b"definitely not a jpeg").unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[test]
    fn test_webp_encoder_writes_riff_container() {
        let bitmap = JpegDecoder.decode(&sample_jpeg(64, 64)).unwrap();
        let webp = WebpEncoder.encode(&bitmap, 88.0).unwrap();

        assert!(webp.len() > 12);
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }
}
