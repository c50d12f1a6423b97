//! Palette file exporters.
//!
//! Every format implements [`Exporter`] over the same borrowed input: a
//! palette name plus the ordered RGB and hex lists of one palette. Encoding is
//! pure; [`Exporter::export`] adds directory creation and the single file write.

mod aco;
mod csv;
mod gpl;
mod json;

pub use aco::AcoExporter;
pub use csv::CsvExporter;
pub use gpl::GplExporter;
pub use json::JsonExporter;

use crate::error::ExportError;
use crate::models::Rgb;
use std::fmt;
use std::path::Path;

pub trait Exporter {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// Serialize one palette. `rgb` and `hex` have equal length and share order.
    fn encode(&self, name: &str, rgb: &[Rgb], hex: &[String]) -> Result<Vec<u8>, ExportError>;

    /// Encode and write to `path`, creating the parent directory if absent.
    fn export(
        &self,
        name: &str,
        path: &Path,
        rgb: &[Rgb],
        hex: &[String],
    ) -> Result<(), ExportError> {
        if rgb.len() != hex.len() {
            return Err(ExportError::LengthMismatch {
                rgb: rgb.len(),
                hex: hex.len(),
            });
        }

        let bytes = self.encode(name, rgb, hex)?;

        let io_err = |source: std::io::Error| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, bytes).map_err(io_err)?;

        tracing::debug!(path = %path.display(), colors = rgb.len(), "Wrote palette file");
        Ok(())
    }
}

/// The supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Gpl,
    Aco,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [Self::Csv, Self::Json, Self::Gpl, Self::Aco];

    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            Self::Csv => Box::new(CsvExporter),
            Self::Json => Box::new(JsonExporter),
            Self::Gpl => Box::new(GplExporter),
            Self::Aco => Box::new(AcoExporter),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Gpl => "gpl",
            Self::Aco => "aco",
        }
    }

    /// Case-insensitive lookup by extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}
