use super::Exporter;
use crate::error::ExportError;
use crate::models::Rgb;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// `{"name": ..., "rgb": [[r, g, b], ...], "hex": [...]}`
///
/// Written with `", "` / `": "` separators and ASCII-only strings, the layout
/// earlier palette files already use.
pub struct JsonExporter;

#[derive(Serialize)]
struct JsonPalette<'a> {
    name: &'a str,
    rgb: Vec<[u8; 3]>,
    hex: &'a [String],
}

/// Single-line output with a space after every separator and non-ASCII
/// characters escaped as `\uXXXX`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

impl Exporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, name: &str, rgb: &[Rgb], hex: &[String]) -> Result<Vec<u8>, ExportError> {
        let doc = JsonPalette {
            name,
            rgb: rgb.iter().map(|&(r, g, b)| [r, g, b]).collect(),
            hex,
        };

        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
        doc.serialize(&mut serializer)?;
        Ok(out)
    }
}
