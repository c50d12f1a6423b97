use std::path::{Path, PathBuf};

use super::color::{rgb_to_hex, ColorRecord, Rgb};

/// Ordered colors as returned by extraction.
///
/// Order is never changed after construction: the renderer and every
/// exporter walk the colors in this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: Vec<ColorRecord>,
}

impl Palette {
    pub fn new(colors: Vec<ColorRecord>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[ColorRecord] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn rgb(&self) -> Vec<Rgb> {
        self.colors.iter().map(|c| c.rgb).collect()
    }

    pub fn hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| rgb_to_hex(c.rgb)).collect()
    }
}

impl FromIterator<ColorRecord> for Palette {
    fn from_iter<I: IntoIterator<Item = ColorRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One processed source image: where it came from, its colors, and its swatch PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteRecord {
    pub image_path: PathBuf,
    pub palette: Palette,
    pub palette_path: PathBuf,
}

impl PaletteRecord {
    pub fn new(image_path: PathBuf, palette: Palette, palette_path: PathBuf) -> Self {
        Self {
            image_path,
            palette,
            palette_path,
        }
    }

    /// Source file name with its extension, e.g. `beach.jpg`.
    pub fn file_name(&self) -> String {
        self.image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Palette name used in output files: the source file name up to its first `.`.
    pub fn name(&self) -> String {
        base_name(&self.image_path)
    }

    /// Human-readable summary: location, then one line per color.
    pub fn details(&self) -> String {
        let dir = self
            .image_path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let mut out = format!(
            "Directory : {dir}\nName : {}\nPalette path : {}\n\n",
            self.file_name(),
            self.palette_path.display()
        );
        for (i, color) in self.palette.colors().iter().enumerate() {
            let (r, g, b) = color.rgb;
            out.push_str(&format!(
                "{:2}.  ({r}, {g}, {b}) - {} - {}\n",
                i + 1,
                color.hex(),
                color.percent()
            ));
        }
        out
    }
}

/// File name up to the first `.`: `photo.final.jpg` -> `photo`.
pub fn base_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name,
    }
}
