//! Assertion helpers for tests.

use palettator::models::Rgb;
use pretty_assertions::assert_eq;
use std::path::Path;

/// A decoded 8-bit RGB PNG.
pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl DecodedPng {
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let i = ((y * self.width + x) * 3) as usize;
        (self.data[i], self.data[i + 1], self.data[i + 2])
    }
}

/// Decode a PNG and assert it is 8-bit RGB without alpha.
pub fn decode_rgb_png(bytes: &[u8]) -> DecodedPng {
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );

    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let mut reader = decoder.read_info().unwrap();
    let mut data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data).unwrap();
    data.truncate(info.buffer_size());

    assert_eq!(info.color_type, png::ColorType::Rgb, "Expected RGB color type");
    assert_eq!(info.bit_depth, png::BitDepth::Eight, "Expected 8-bit depth");

    DecodedPng {
        width: info.width,
        height: info.height,
        data,
    }
}

pub fn decode_rgb_png_file(path: &Path) -> DecodedPng {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    decode_rgb_png(&bytes)
}

/// Assert the file exists and return its UTF-8 content.
pub fn read_text(path: &Path) -> String {
    assert!(path.is_file(), "Expected file {}", path.display());
    std::fs::read_to_string(path).unwrap()
}
