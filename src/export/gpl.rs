use super::Exporter;
use crate::error::ExportError;
use crate::models::Rgb;

/// GIMP palette text file.
pub struct GplExporter;

/// Number of header lines preceding the color entries.
pub const GPL_HEADER_LINES: usize = 6;

impl Exporter for GplExporter {
    fn extension(&self) -> &'static str {
        "gpl"
    }

    fn encode(&self, name: &str, rgb: &[Rgb], _hex: &[String]) -> Result<Vec<u8>, ExportError> {
        let mut out = String::new();
        out.push_str("GIMP Palette\n");
        out.push_str(&format!("Name: {name}\n"));
        out.push_str("Columns: 5\n");
        out.push_str("#\n");
        out.push_str(&format!("# Number : {}\n", rgb.len()));
        out.push_str("#\n");
        for (i, (r, g, b)) in rgb.iter().enumerate() {
            out.push_str(&format!("{r} {g} {b} Index {i}\n"));
        }
        Ok(out.into_bytes())
    }
}
