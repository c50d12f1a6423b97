//! Test fixtures and constants.

use palettator::error::ExtractError;
use palettator::models::{ColorRecord, Palette, PaletteConfig, Rgb};
use palettator::services::ColorExtractor;
use std::path::{Path, PathBuf};

/// White 40%, black 30%, red 20%, green 10%, in that order.
pub fn four_colors() -> Vec<ColorRecord> {
    vec![
        ColorRecord::new((255, 255, 255), 0.4),
        ColorRecord::new((0, 0, 0), 0.3),
        ColorRecord::new((255, 0, 0), 0.2),
        ColorRecord::new((0, 255, 0), 0.1),
    ]
}

pub fn four_color_palette() -> Palette {
    Palette::new(four_colors())
}

/// A palette of `n` distinct colors.
pub fn ramp(n: usize) -> Palette {
    (0..n)
        .map(|i| {
            let v = (i * 255 / n.max(2).saturating_sub(1)).min(255) as u8;
            ColorRecord::new((v, 255 - v, (i % 256) as u8), 1.0 / n as f64)
        })
        .collect()
}

/// Default layout with fonts that do not exist, so labels use the fallback.
pub fn config_in(save_path: &Path) -> PaletteConfig {
    PaletteConfig {
        title_font: PathBuf::from("/nonexistent/fonts/Title.ttf"),
        subtitle_font: PathBuf::from("/nonexistent/fonts/Subtitle.ttf"),
        save_path: save_path.to_path_buf(),
        ..Default::default()
    }
}

/// Write a 10x10 RGB image made of horizontal bands, `(color, rows)` top to bottom.
pub fn write_banded_image(path: &Path, bands: &[(Rgb, u32)]) {
    let mut rows: Vec<Rgb> = Vec::new();
    for &(rgb, n) in bands {
        rows.extend(std::iter::repeat(rgb).take(n as usize));
    }
    let image = image::RgbImage::from_fn(10, rows.len() as u32, |_, y| {
        let (r, g, b) = rows[y as usize];
        image::Rgb([r, g, b])
    });
    image.save(path).unwrap();
}

/// Extractor returning a fixed color list for any existing file.
///
/// Paths whose file name contains `broken` fail like an undecodable image.
pub struct FixedExtractor(pub Vec<ColorRecord>);

impl ColorExtractor for FixedExtractor {
    fn extract(
        &self,
        path: &Path,
        _palette_size: usize,
        _resize: bool,
    ) -> Result<Vec<ColorRecord>, ExtractError> {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        if name.contains("broken") {
            return Err(ExtractError::EmptyImage(path.to_path_buf()));
        }
        Ok(self.0.clone())
    }
}
