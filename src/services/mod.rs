pub mod collection;
pub mod extractor;

pub use collection::{IndexSelection, PaletteCollection};
pub use extractor::{median_cut, ColorExtractor, MedianCutExtractor};
