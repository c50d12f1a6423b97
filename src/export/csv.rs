use super::Exporter;
use crate::error::ExportError;
use crate::models::Rgb;

/// `R,G,B,HEX` table, one row per color. The palette name is not written.
pub struct CsvExporter;

const HEADER: [&str; 4] = ["R", "G", "B", "HEX"];

impl Exporter for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn encode(&self, _name: &str, rgb: &[Rgb], hex: &[String]) -> Result<Vec<u8>, ExportError> {
        let mut out = String::new();
        push_row(&mut out, HEADER);
        for (&(r, g, b), hex) in rgb.iter().zip(hex) {
            let (r, g, b) = (r.to_string(), g.to_string(), b.to_string());
            push_row(&mut out, [r.as_str(), g.as_str(), b.as_str(), hex.as_str()]);
        }
        Ok(out.into_bytes())
    }
}

/// Append one CRLF-terminated record, quoting only fields that need it.
fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\r', '\n']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}
