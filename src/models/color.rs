//! Color records and the conversions used for labels and exports.

/// An 8-bit RGB triple.
pub type Rgb = (u8, u8, u8);

/// Luminance above which swatch labels are drawn in black instead of white.
pub const LABEL_LUMINANCE_THRESHOLD: f64 = 200.0;

/// One extracted color with its share of the source image.
///
/// `frequency` is in `0.0..=1.0`; the frequencies of a palette sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRecord {
    pub rgb: Rgb,
    pub frequency: f64,
}

impl ColorRecord {
    pub fn new(rgb: Rgb, frequency: f64) -> Self {
        Self { rgb, frequency }
    }

    /// Perceptual luma on a 0-255 scale (0.299 R + 0.587 G + 0.114 B).
    pub fn luminance(&self) -> f64 {
        luminance(self.rgb)
    }

    /// `#RRGGBB`, uppercase.
    pub fn hex(&self) -> String {
        rgb_to_hex(self.rgb)
    }

    pub fn percent(&self) -> String {
        frequency_to_percent(self.frequency)
    }

    /// Label color readable on top of this color.
    pub fn label_color(&self) -> Rgb {
        if self.luminance() > LABEL_LUMINANCE_THRESHOLD {
            (0, 0, 0)
        } else {
            (255, 255, 255)
        }
    }
}

pub fn luminance((r, g, b): Rgb) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Format an RGB triple as a 7-character `#RRGGBB` string with uppercase digits.
///
/// ```
/// use palettator::models::rgb_to_hex;
/// assert_eq!(rgb_to_hex((255, 8, 0)), "#FF0800");
/// ```
pub fn rgb_to_hex((r, g, b): Rgb) -> String {
    format!("#{}", hex::encode_upper([r, g, b]))
}

/// Parse `#RRGGBB` (hash optional, any case) back into a triple.
pub fn hex_to_rgb(s: &str) -> Option<Rgb> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let mut bytes = [0u8; 3];
    hex::decode_to_slice(s, &mut bytes).ok()?;
    Some((bytes[0], bytes[1], bytes[2]))
}

/// Format a frequency fraction as a percentage with two decimals (`0.1234` -> `12.34%`).
pub fn frequency_to_percent(frequency: f64) -> String {
    format!("{:.2}%", frequency * 100.0)
}
