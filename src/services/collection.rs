use std::path::{Path, PathBuf};

use crate::error::{ExportError, IndexError, ProcessError};
use crate::export::Exporter;
use crate::models::{Palette, PaletteConfig, PaletteRecord};
use crate::rendering::SwatchRenderer;
use crate::services::ColorExtractor;

/// Which palettes a user reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSelection {
    /// 1-based position in the collection
    One(usize),
    All,
}

/// The palettes generated by the most recent extraction batch.
///
/// Indices are 1-based and only stable until the next [`extract`] call,
/// which replaces the whole collection at once.
///
/// [`extract`]: PaletteCollection::extract
#[derive(Debug, Default)]
pub struct PaletteCollection {
    records: Vec<PaletteRecord>,
}

impl PaletteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PaletteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at a 1-based index.
    pub fn get(&self, index: usize) -> Option<&PaletteRecord> {
        index.checked_sub(1).and_then(|i| self.records.get(i))
    }

    pub fn replace(&mut self, records: Vec<PaletteRecord>) {
        self.records = records;
    }

    /// Extract, render and save a palette for every image, in input order.
    ///
    /// Images that fail are logged and skipped. The previous contents are
    /// replaced once the whole batch is done. Returns the number of records.
    pub fn extract(
        &mut self,
        image_paths: &[PathBuf],
        extractor: &dyn ColorExtractor,
        renderer: &SwatchRenderer,
        config: &PaletteConfig,
    ) -> usize {
        let mut records = Vec::with_capacity(image_paths.len());

        for (i, path) in image_paths.iter().enumerate() {
            tracing::info!(
                path = %path.display(),
                progress = %format!("{}/{}", i + 1, image_paths.len()),
                "Processing image"
            );
            match process_image(path, extractor, renderer, config) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), %e, "Skipping image");
                }
            }
        }

        self.replace(records);
        self.len()
    }

    /// Resolve a user palette reference.
    ///
    /// A missing or flag-like token (starting with `-`) means the first
    /// palette. With `allow_all`, `all` in any case selects every palette.
    pub fn resolve(&self, token: Option<&str>, allow_all: bool) -> Result<IndexSelection, IndexError> {
        if self.is_empty() {
            return Err(IndexError::Empty);
        }
        let token = token.map(str::trim).unwrap_or_default();

        let index = if token.is_empty() || token.starts_with('-') {
            1
        } else if token.eq_ignore_ascii_case("all") {
            return if allow_all {
                Ok(IndexSelection::All)
            } else {
                Err(IndexError::AllNotAllowed)
            };
        } else {
            token
                .parse::<usize>()
                .map_err(|_| IndexError::NotANumber(token.to_string()))?
        };

        if index < 1 || index > self.len() {
            return Err(IndexError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(IndexSelection::One(index))
    }

    pub fn selected(&self, selection: IndexSelection) -> Result<&[PaletteRecord], IndexError> {
        match selection {
            IndexSelection::All => Ok(&self.records),
            IndexSelection::One(index) => index
                .checked_sub(1)
                .and_then(|i| self.records.get(i..=i))
                .ok_or(IndexError::OutOfRange {
                    index,
                    len: self.len(),
                }),
        }
    }

    /// Export the selected palettes to `{name}_palette.{ext}` files in `save_dir`.
    ///
    /// Stops at the first failure.
    pub fn export_all(
        &self,
        exporter: &dyn Exporter,
        selection: IndexSelection,
        save_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let records = self.selected(selection)?;
        let mut written = Vec::with_capacity(records.len());

        for (i, record) in records.iter().enumerate() {
            let name = record.name();
            let file_name = format!("{name}_palette.{}", exporter.extension());
            let path = save_dir.join(&file_name);

            exporter.export(&name, &path, &record.palette.rgb(), &record.palette.hex())?;
            tracing::info!("{:2} >  Palette exported to {file_name}", i + 1);
            written.push(path);
        }

        Ok(written)
    }

    /// One line per palette: ` 1 >  beach.jpg`.
    pub fn listing(&self) -> String {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{:2} >  {}\n", i + 1, record.file_name()))
            .collect()
    }
}

fn process_image(
    path: &Path,
    extractor: &dyn ColorExtractor,
    renderer: &SwatchRenderer,
    config: &PaletteConfig,
) -> Result<PaletteRecord, ProcessError> {
    let colors = extractor.extract(path, config.palette_size, config.resize)?;
    let palette = Palette::new(colors);
    let palette_path = renderer.save(&palette, path, &config.save_path)?;
    Ok(PaletteRecord::new(path.to_path_buf(), palette, palette_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::CsvExporter;
    use crate::models::ColorRecord;
    use pretty_assertions::assert_eq;

    fn record(name: &str) -> PaletteRecord {
        PaletteRecord::new(
            PathBuf::from(format!("/pics/{name}.jpg")),
            Palette::new(vec![ColorRecord::new((1, 2, 3), 1.0)]),
            PathBuf::from(format!("/out/{name}_palette.png")),
        )
    }

    fn collection(n: usize) -> PaletteCollection {
        let mut c = PaletteCollection::new();
        c.replace((1..=n).map(|i| record(&format!("img{i}"))).collect());
        c
    }

    #[test]
    fn test_resolve_all_any_case() {
        let c = collection(5);
        for token in ["all", "ALL", "All", " aLL "] {
            assert_eq!(c.resolve(Some(token), true), Ok(IndexSelection::All));
        }
        assert_eq!(c.resolve(Some("all"), false), Err(IndexError::AllNotAllowed));
    }

    #[test]
    fn test_resolve_numeric_bounds() {
        let c = collection(5);
        assert_eq!(c.resolve(Some("1"), true), Ok(IndexSelection::One(1)));
        assert_eq!(c.resolve(Some("5"), true), Ok(IndexSelection::One(5)));
        assert_eq!(
            c.resolve(Some("6"), true),
            Err(IndexError::OutOfRange { index: 6, len: 5 })
        );
        assert_eq!(
            c.resolve(Some("0"), true),
            Err(IndexError::OutOfRange { index: 0, len: 5 })
        );
        assert_eq!(
            c.resolve(Some("two"), true),
            Err(IndexError::NotANumber("two".to_string()))
        );
    }

    #[test]
    fn test_resolve_defaults_to_first() {
        let c = collection(5);
        assert_eq!(c.resolve(None, true), Ok(IndexSelection::One(1)));
        assert_eq!(c.resolve(Some(""), false), Ok(IndexSelection::One(1)));
        assert_eq!(c.resolve(Some("--display"), false), Ok(IndexSelection::One(1)));
    }

    #[test]
    fn test_resolve_on_empty_collection() {
        let c = PaletteCollection::new();
        assert_eq!(c.resolve(None, true), Err(IndexError::Empty));
        assert_eq!(c.resolve(Some("all"), true), Err(IndexError::Empty));
    }

    #[test]
    fn test_get_is_one_based() {
        let c = collection(2);
        assert!(c.get(0).is_none());
        assert_eq!(c.get(1).unwrap().name(), "img1");
        assert_eq!(c.get(2).unwrap().name(), "img2");
        assert!(c.get(3).is_none());
    }

    #[test]
    fn test_export_all_writes_one_file_per_selected_record() {
        let dir = tempfile::tempdir().unwrap();
        let c = collection(3);

        let written = c
            .export_all(&CsvExporter, IndexSelection::All, dir.path())
            .unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("img1_palette.csv"),
                dir.path().join("img2_palette.csv"),
                dir.path().join("img3_palette.csv"),
            ]
        );

        let written = c
            .export_all(&CsvExporter, IndexSelection::One(2), dir.path())
            .unwrap();
        assert_eq!(written, vec![dir.path().join("img2_palette.csv")]);
    }

    #[test]
    fn test_export_all_rejects_stale_index() {
        let dir = tempfile::tempdir().unwrap();
        let result = collection(1).export_all(&CsvExporter, IndexSelection::One(4), dir.path());
        assert!(matches!(result, Err(ExportError::Index(_))));
    }

    #[test]
    fn test_listing() {
        assert_eq!(collection(2).listing(), " 1 >  img1.jpg\n 2 >  img2.jpg\n");
    }
}
