use crate::error::ExtractError;
use crate::models::{luminance, ColorRecord, Rgb};
use std::path::Path;

/// Longest side images are reduced to when resizing before extraction.
pub const RESIZE_BOUND: u32 = 256;

/// Source of dominant colors for an image.
///
/// Implementations return colors in their final display order, with
/// frequencies summing to 1.0.
pub trait ColorExtractor {
    fn extract(
        &self,
        path: &Path,
        palette_size: usize,
        resize: bool,
    ) -> Result<Vec<ColorRecord>, ExtractError>;
}

/// Median-cut quantizer over the opaque pixels of an image.
///
/// Colors come back sorted by ascending luminance (dark to light).
#[derive(Debug, Default, Clone, Copy)]
pub struct MedianCutExtractor;

impl ColorExtractor for MedianCutExtractor {
    fn extract(
        &self,
        path: &Path,
        palette_size: usize,
        resize: bool,
    ) -> Result<Vec<ColorRecord>, ExtractError> {
        let image = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(source) => ExtractError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => ExtractError::Decode {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let image = if resize && (image.width() > RESIZE_BOUND || image.height() > RESIZE_BOUND) {
            image.thumbnail(RESIZE_BOUND, RESIZE_BOUND)
        } else {
            image
        };
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Sampling image"
        );

        let pixels: Vec<Rgb> = image
            .to_rgba8()
            .pixels()
            .filter_map(|p| {
                let [r, g, b, a] = p.0;
                (a > 0).then_some((r, g, b))
            })
            .collect();

        if pixels.is_empty() {
            return Err(ExtractError::EmptyImage(path.to_path_buf()));
        }

        Ok(median_cut(pixels, palette_size))
    }
}

/// Quantize `pixels` into at most `palette_size` colors.
///
/// The box with the widest channel range is split at the median of that
/// channel until enough boxes exist or none can be split further.
pub fn median_cut(pixels: Vec<Rgb>, palette_size: usize) -> Vec<ColorRecord> {
    let total = pixels.len();
    if total == 0 {
        return Vec::new();
    }

    let mut boxes = vec![ColorBox { pixels }];
    while boxes.len() < palette_size.max(1) {
        let candidate = boxes
            .iter()
            .enumerate()
            .map(|(i, b)| (i, b.widest_channel()))
            .filter(|(_, (_, range))| *range > 0)
            .fold(None, |best: Option<(usize, usize, u8)>, (i, (ch, range))| {
                match best {
                    Some((_, _, best_range)) if best_range >= range => best,
                    _ => Some((i, ch, range)),
                }
            });

        let Some((index, ch, _)) = candidate else {
            break;
        };
        let (low, high) = boxes.remove(index).split(ch);
        boxes.insert(index, high);
        boxes.insert(index, low);
    }

    let mut colors: Vec<ColorRecord> = boxes
        .iter()
        .map(|b| ColorRecord::new(b.average(), b.pixels.len() as f64 / total as f64))
        .collect();
    colors.sort_by(|a, b| luminance(a.rgb).total_cmp(&luminance(b.rgb)));
    colors
}

struct ColorBox {
    pixels: Vec<Rgb>,
}

fn channel((r, g, b): Rgb, channel: usize) -> u8 {
    match channel {
        0 => r,
        1 => g,
        _ => b,
    }
}

impl ColorBox {
    /// Channel index with the largest value spread, and that spread.
    fn widest_channel(&self) -> (usize, u8) {
        (0..3)
            .map(|c| {
                let (min, max) = self
                    .pixels
                    .iter()
                    .map(|&p| channel(p, c))
                    .fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
                (c, max.saturating_sub(min))
            })
            .fold((0, 0), |best, cur| if cur.1 > best.1 { cur } else { best })
    }

    /// Split at the median value so equal colors never straddle the cut.
    fn split(mut self, c: usize) -> (ColorBox, ColorBox) {
        self.pixels.sort_by_key(|&p| channel(p, c));
        let median = channel(self.pixels[self.pixels.len() / 2], c);

        let mut cut = self.pixels.partition_point(|&p| channel(p, c) < median);
        if cut == 0 {
            cut = self.pixels.partition_point(|&p| channel(p, c) <= median);
        }

        let high = self.pixels.split_off(cut);
        (self, ColorBox { pixels: high })
    }

    fn average(&self) -> Rgb {
        let n = self.pixels.len() as u64;
        let (r, g, b) = self.pixels.iter().fold((0u64, 0u64, 0u64), |acc, &(r, g, b)| {
            (acc.0 + r as u64, acc.1 + g as u64, acc.2 + b as u64)
        });
        let avg = |sum: u64| ((sum + n / 2) / n) as u8;
        (avg(r), avg(g), avg(b))
    }
}
