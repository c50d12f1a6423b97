//! Palettator - dominant color palettes from images
//!
//! Extracts a palette per image, renders it as a labelled swatch grid and
//! exports it as CSV, JSON, GIMP palette or Adobe swatch files.
//! This library exposes modules for integration testing.

pub mod error;
pub mod export;
pub mod models;
pub mod rendering;
pub mod services;
