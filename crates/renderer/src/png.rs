//! PNG encoding for RGB canvases.
//!
//! Writes color type 2 (truecolor, 8 bits per channel). A scanline that
//! repeats the one above is written with the Up filter, which turns it into
//! zeros; every other scanline is left unfiltered.

use std::io::Write;

use crate::error::RenderError;

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const FILTER_NONE: u8 = 0;
const FILTER_UP: u8 = 2;

/// Encode RGB pixel data (3 bytes per pixel, row-major) as a PNG.
pub fn create_png_rgb(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, RenderError> {
    if width == 0 || height == 0 || pixels.len() != width * height * 3 {
        return Err(RenderError::InvalidDimensions {
            width: width as u32,
            height: height as u32,
        });
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(2); // color type (RGB)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    let idat_data = deflate_idat_rgb(pixels, width, height)
        .map_err(|e| RenderError::Encode(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Filter and deflate RGB scanlines for the IDAT chunk.
fn deflate_idat_rgb(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let stride = width * 3;
    let mut filtered = Vec::with_capacity(height * (1 + stride));

    for y in 0..height {
        let row = &pixels[y * stride..(y + 1) * stride];
        if y > 0 {
            let prev = &pixels[(y - 1) * stride..y * stride];
            if row == prev {
                // Up filter on a repeated row is all zeros
                filtered.push(FILTER_UP);
                filtered.resize(filtered.len() + stride, 0);
                continue;
            }
        }
        filtered.push(FILTER_NONE);
        filtered.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&filtered)?;
    encoder.finish()
}
