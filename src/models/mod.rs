pub mod color;
pub mod config;
pub mod palette;

pub use color::{
    frequency_to_percent, hex_to_rgb, luminance, rgb_to_hex, ColorRecord, Rgb,
    LABEL_LUMINANCE_THRESHOLD,
};
pub use config::{AppConfig, PaletteConfig};
pub use palette::{base_name, Palette, PaletteRecord};
