//! Swatch grid geometry.
//!
//! All positions are integer pixels. Swatch `i` sits at column `i % columns`,
//! row `i / columns`; labels are placed relative to the swatch origin.

use crate::error::RenderError;
use crate::models::PaletteConfig;

/// Outline thickness drawn inside every swatch.
pub const OUTLINE_WIDTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwatchLayout {
    pub square_x: u32,
    pub square_y: u32,
    pub columns: u32,
    pub title_size: u32,
    pub subtitle_size: u32,
}

/// Top-left corner of a swatch and the anchors of its two labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwatchCell {
    pub x: u32,
    pub y: u32,
    /// Horizontal center of both labels
    pub label_center_x: u32,
    /// Top edge of the hex label
    pub title_y: i64,
    /// Top edge of the percentage label
    pub subtitle_y: i64,
}

impl SwatchLayout {
    pub fn new(
        square_x: u32,
        square_y: u32,
        columns: u32,
        title_size: u32,
        subtitle_size: u32,
    ) -> Result<Self, RenderError> {
        if columns == 0 {
            return Err(RenderError::InvalidLayout(
                "columns must be at least 1".to_string(),
            ));
        }
        if square_x == 0 || square_y == 0 {
            return Err(RenderError::InvalidLayout(format!(
                "swatch size {square_x}x{square_y} must be non-zero"
            )));
        }
        if columns.checked_mul(square_x).is_none() {
            return Err(RenderError::InvalidLayout(format!(
                "{columns} columns of {square_x} px exceed the maximum canvas width"
            )));
        }
        Ok(Self {
            square_x,
            square_y,
            columns,
            title_size,
            subtitle_size,
        })
    }

    pub fn from_config(config: &PaletteConfig) -> Result<Self, RenderError> {
        Self::new(
            config.square_x,
            config.square_y,
            config.columns,
            config.title_size,
            config.subtitle_size,
        )
    }

    pub fn rows(&self, count: usize) -> u32 {
        let rows = count.div_ceil(self.columns as usize);
        u32::try_from(rows).unwrap_or(u32::MAX)
    }

    /// Canvas size for `count` swatches.
    pub fn canvas_size(&self, count: usize) -> Result<(u32, u32), RenderError> {
        let width = self.columns * self.square_x;
        let height = self
            .rows(count)
            .checked_mul(self.square_y)
            .ok_or_else(|| {
                RenderError::InvalidLayout(format!(
                    "{count} swatches of {} px exceed the maximum canvas height",
                    self.square_y
                ))
            })?;
        Ok((width, height))
    }

    pub fn cell(&self, index: usize) -> Result<SwatchCell, RenderError> {
        let column = (index % self.columns as usize) as u32;
        let row = u32::try_from(index / self.columns as usize).unwrap_or(u32::MAX);
        let x = column * self.square_x;
        let y = row.checked_mul(self.square_y).ok_or_else(|| {
            RenderError::InvalidLayout(format!("swatch {index} lies outside the canvas"))
        })?;

        let half_short_side = (self.square_x.min(self.square_y) / 2) as i64;
        let title_y = y as i64 + half_short_side - (self.title_size / 2) as i64;
        let subtitle_y = title_y + self.title_size as i64 + (self.subtitle_size / 2) as i64;

        Ok(SwatchCell {
            x,
            y,
            label_center_x: x + self.square_x / 2,
            title_y,
            subtitle_y,
        })
    }

    /// Rectangle `(x, y, w, h)` whose centered stroke of [`OUTLINE_WIDTH`]
    /// exactly covers the swatch edge without spilling into neighbours.
    pub fn outline_rect(&self, cell: &SwatchCell) -> (f32, f32, f32, f32) {
        let inset = OUTLINE_WIDTH as f32 / 2.0;
        (
            cell.x as f32 + inset,
            cell.y as f32 + inset,
            (self.square_x as f32 - OUTLINE_WIDTH as f32).max(0.0),
            (self.square_y as f32 - OUTLINE_WIDTH as f32).max(0.0),
        )
    }
}
