pub mod layout;
pub mod swatch;

pub use layout::{SwatchCell, SwatchLayout, OUTLINE_WIDTH};
pub use swatch::{SwatchRenderer, DEFAULT_FONT_FAMILY};
