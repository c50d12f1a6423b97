use std::path::PathBuf;
use thiserror::Error;

/// Failure while pulling colors out of a source image.
///
/// Non-fatal to a batch: the collection logs it and skips the image.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image has no opaque pixels: {}", .0.display())]
    EmptyImage(PathBuf),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot render an empty palette")]
    EmptyPalette,

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Color list mismatch: {rgb} RGB values but {hex} hex values")]
    LengthMismatch { rgb: usize, hex: usize },

    #[error("Too many colors for a swatch file: {0}")]
    TooManyColors(usize),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Why one image of a batch produced no palette.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

/// A palette reference the user typed that does not name a palette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("No palettes have been generated yet")]
    Empty,

    #[error("Invalid palette index: {0}")]
    NotANumber(String),

    #[error("Palette index {index} out of range (1-{len})")]
    OutOfRange { index: usize, len: usize },

    #[error("\"all\" is not accepted here")]
    AllNotAllowed,
}
