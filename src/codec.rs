use crate::constants::{MAX_QUALITY, MIN_QUALITY};
use crate::error::{CompressionError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbImage};
use mozjpeg::{ColorSpace, Compress};

/// Anything that can re-encode one prepared source image at a given quality.
///
/// The quality search only depends on this trait, which keeps it independent
/// of the actual codec.
pub trait QualityEncoder {
    fn encode(&self, quality: u8) -> Result<Vec<u8>>;
}

/// JPEG re-encoder: decoding and resizing through `image`, encoding through
/// `mozjpeg` with 4:2:0 chroma subsampling.
///
/// The source buffer is decoded and resized once; every call to
/// [`QualityEncoder::encode`] starts again from that same pixel data.
#[derive(Debug, Clone)]
pub struct JpegCodec {
    pixels: RgbImage,
}

impl JpegCodec {
    /// Decodes a JPEG buffer and caps its long edge at `max_dimension`,
    /// keeping the aspect ratio. Smaller images are never enlarged.
    pub fn from_bytes(source: &[u8], max_dimension: u32) -> Result<Self> {
        let img = image::load_from_memory_with_format(source, ImageFormat::Jpeg)?;
        let img = cap_long_edge(img, max_dimension);

        Ok(Self {
            pixels: img.to_rgb8(),
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

impl QualityEncoder for JpegCodec {
    fn encode(&self, quality: u8) -> Result<Vec<u8>> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressionError::InvalidQuality(quality));
        }

        let mut comp = Compress::new(ColorSpace::JCS_RGB);
        comp.set_size(self.pixels.width() as usize, self.pixels.height() as usize);
        comp.set_quality(quality as f32);
        // One Cb and one Cr sample per 2x2 pixel block.
        comp.set_chroma_sampling_pixel_sizes((2, 2), (2, 2));

        let mut writer = comp.start_compress(Vec::new())?;
        writer.write_scanlines(self.pixels.as_raw())?;
        let buf = writer.finish()?;

        if buf.is_empty() {
            return Err(CompressionError::EmptyEncoding);
        }
        Ok(buf)
    }
}

fn cap_long_edge(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    if img.width().max(img.height()) <= max_dimension {
        return img;
    }
    img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
}
