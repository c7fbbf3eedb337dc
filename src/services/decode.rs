use std::io::{BufReader, Read};
use std::path::Path;

use stitch_pattern::PixelBuffer;

use crate::error::AppError;

/// Decode a PNG stream into an RGBA8 buffer.
///
/// Palette, grayscale and 16-bit images are expanded to 8-bit channels;
/// images without an alpha channel come back fully opaque.
pub fn decode_png<R: Read>(reader: R) -> Result<PixelBuffer, AppError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];

    if info.bit_depth != png::BitDepth::Eight {
        return Err(AppError::UnsupportedPng {
            color_type: info.color_type,
            bit_depth: info.bit_depth,
        });
    }

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => bytes.to_vec(),
        png::ColorType::Rgb => bytes
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => bytes.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(AppError::UnsupportedPng {
                color_type: info.color_type,
                bit_depth: info.bit_depth,
            })
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );
    Ok(PixelBuffer::new(
        info.width as usize,
        info.height as usize,
        rgba,
    )?)
}

/// Decode a PNG file from disk.
pub fn decode_png_file(path: &Path) -> Result<PixelBuffer, AppError> {
    let file = std::fs::File::open(path)?;
    decode_png(BufReader::new(file))
}
