use super::Exporter;
use crate::error::ExportError;
use crate::models::Rgb;

/// Adobe color swatch (version 1) binary.
///
/// The color count is written as `[count / 255, count % 255]`, which is what
/// existing files produced by this tool contain. It only matches the usual
/// big-endian u16 for counts below 255.
pub struct AcoExporter;

const VERSION: [u8; 2] = [0x00, 0x01];
const COLOR_SPACE_RGB: [u8; 2] = [0x00, 0x00];

/// Bytes per color entry: space tag, three 16-bit channels, reserved word.
pub const ACO_ENTRY_LEN: usize = 10;

impl Exporter for AcoExporter {
    fn extension(&self) -> &'static str {
        "aco"
    }

    fn encode(&self, _name: &str, rgb: &[Rgb], _hex: &[String]) -> Result<Vec<u8>, ExportError> {
        let count = rgb.len();
        let high = u8::try_from(count / 255).map_err(|_| ExportError::TooManyColors(count))?;
        let low = (count % 255) as u8;

        let mut out = Vec::with_capacity(4 + ACO_ENTRY_LEN * count);
        out.extend_from_slice(&VERSION);
        out.extend_from_slice(&[high, low]);
        for &(r, g, b) in rgb {
            out.extend_from_slice(&COLOR_SPACE_RGB);
            // Each 8-bit channel fills its 16-bit slot as 0xVVVV
            out.extend_from_slice(&[r, r, g, g, b, b]);
            out.extend_from_slice(&[0x00, 0x00]);
        }
        Ok(out)
    }
}
