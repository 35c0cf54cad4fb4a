//! PNG decoding into [`RgbImage`] and encoding of quantized output.
//!
//! Quantized images are written as indexed PNGs (color type 3) with a PLTE
//! chunk in palette order, at the smallest of 1/2/4/8 bits per pixel that
//! holds the palette, then re-compressed with oxipng.

use std::io::Cursor;
use std::path::Path;

use eink_quantize::{pack_nbits, QuantizedImage, RgbImage};

use crate::error::RenderError;

/// Decode PNG bytes to an opaque RGB image.
///
/// 16-bit and sub-byte formats are normalized to 8-bit. Alpha is flattened
/// onto white.
pub fn decode_png(bytes: &[u8]) -> Result<RgbImage, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let (width, height) = (info.width as usize, info.height as usize);
    let image = match info.color_type {
        png::ColorType::Rgb => RgbImage::from_rgb_bytes(width, height, &buf)?,
        png::ColorType::Rgba => RgbImage::from_rgba_bytes(width, height, &buf)?,
        png::ColorType::Grayscale => {
            let rgb: Vec<u8> = buf.iter().flat_map(|&v| [v, v, v]).collect();
            RgbImage::from_rgb_bytes(width, height, &rgb)?
        }
        png::ColorType::GrayscaleAlpha => {
            let rgba: Vec<u8> = buf
                .chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect();
            RgbImage::from_rgba_bytes(width, height, &rgba)?
        }
        other => return Err(RenderError::UnsupportedColorType(format!("{other:?}"))),
    };

    tracing::debug!(width, height, color_type = ?info.color_type, "Decoded PNG");
    Ok(image)
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<RgbImage, RenderError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}

/// Bit depth for an indexed PNG holding `colors` palette entries.
fn indexed_depth(colors: usize) -> (png::BitDepth, u8) {
    match colors {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    }
}

/// Encode a quantized image as an optimized indexed PNG.
pub fn encode_indexed_png(image: &QuantizedImage) -> Result<Vec<u8>, RenderError> {
    let (depth, bits) = indexed_depth(image.palette().len());
    let plte: Vec<u8> = image
        .palette()
        .iter()
        .flat_map(|e| {
            let rgb = e.rgb();
            [rgb.r, rgb.g, rgb.b]
        })
        .collect();
    let packed = pack_nbits(image.positions(), image.width(), bits)?;

    let png_bytes = encode_png(
        image.width(),
        image.height(),
        png::ColorType::Indexed,
        depth,
        Some(&plte),
        &packed,
    )?;
    Ok(optimize(png_bytes))
}

/// Encode an RGB image as an optimized truecolor PNG.
pub fn encode_rgb_png(image: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let png_bytes = encode_png(
        image.width(),
        image.height(),
        png::ColorType::Rgb,
        png::BitDepth::Eight,
        None,
        &image.to_rgb_bytes(),
    )?;
    Ok(optimize(png_bytes))
}

/// Encode packed pixel data as a PNG.
fn encode_png(
    width: usize,
    height: usize,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    packed: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(RenderError::UnsupportedDimensions {
                width: width.min(u32::MAX as usize) as u32,
                height: height.min(u32::MAX as usize) as u32,
            })
        }
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, w, h);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(packed)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress with oxipng, keeping the input if optimization fails.
fn optimize(png_bytes: Vec<u8>) -> Vec<u8> {
    let before = png_bytes.len();
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    tracing::debug!(before, after = optimized.len(), "Optimized PNG");
    optimized
}
