use crate::error::RenderError;
use crate::models::{base_name, rgb_to_hex, Palette, PaletteConfig};
use crate::rendering::layout::{SwatchLayout, OUTLINE_WIDTH};
use resvg::usvg::{self, Transform};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Family used whenever a configured font file cannot be loaded.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Installed families tried, in order, to back [`DEFAULT_FONT_FAMILY`] when
/// fontdb's own sans-serif choice is not installed.
const FALLBACK_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Verdana",
];

/// Renders a palette as a grid of labelled swatches and encodes it as PNG.
///
/// The grid is built as an SVG document and rasterized with resvg, so text
/// shaping and centering are handled by usvg (`text-anchor="middle"` centers
/// each label on its measured width).
pub struct SwatchRenderer {
    layout: SwatchLayout,
    /// Font database for text rendering
    fontdb: Arc<fontdb::Database>,
    title_family: String,
    subtitle_family: String,
    /// Whether any face can draw labels
    labels_available: bool,
}

impl SwatchRenderer {
    /// Create a renderer for the configured layout and label fonts.
    ///
    /// Font loading never fails the renderer: a missing or unreadable font
    /// file is logged and the label falls back to [`DEFAULT_FONT_FAMILY`].
    pub fn new(config: &PaletteConfig) -> Result<Self, RenderError> {
        let layout = SwatchLayout::from_config(config)?;

        let mut fontdb = fontdb::Database::new();
        // System fonts back the default family
        fontdb.load_system_fonts();
        let labels_available = resolve_default_family(&mut fontdb);

        let title_family = load_font_family(&mut fontdb, &config.title_font);
        let subtitle_family = load_font_family(&mut fontdb, &config.subtitle_font);

        tracing::debug!(
            font_count = fontdb.len(),
            title = %title_family,
            subtitle = %subtitle_family,
            "Loaded fonts for swatch labels"
        );

        Ok(Self {
            layout,
            fontdb: Arc::new(fontdb),
            title_family,
            subtitle_family,
            labels_available,
        })
    }

    pub fn layout(&self) -> &SwatchLayout {
        &self.layout
    }

    pub fn title_family(&self) -> &str {
        &self.title_family
    }

    pub fn subtitle_family(&self) -> &str {
        &self.subtitle_family
    }

    /// False only when no font at all could be found; swatches are still
    /// drawn, without labels.
    pub fn labels_available(&self) -> bool {
        self.labels_available
    }

    /// Build the SVG document describing the swatch grid.
    pub fn to_svg(&self, palette: &Palette) -> Result<String, RenderError> {
        if palette.is_empty() {
            return Err(RenderError::EmptyPalette);
        }

        let layout = &self.layout;
        let (width, height) = layout.canvas_size(palette.len())?;
        let title_family = font_family_attr(&self.title_family);
        let subtitle_family = font_family_attr(&self.subtitle_family);

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        svg.push_str(&format!(
            r##"<rect width="{width}" height="{height}" fill="#FFFFFF"/>"##
        ));

        for (i, color) in palette.colors().iter().enumerate() {
            let cell = layout.cell(i)?;
            let hex = color.hex();
            let (rx, ry, rw, rh) = layout.outline_rect(&cell);
            svg.push_str(&format!(
                r#"<rect x="{rx}" y="{ry}" width="{rw}" height="{rh}" fill="{hex}" stroke="{hex}" stroke-width="{OUTLINE_WIDTH}"/>"#
            ));

            let text_fill = rgb_to_hex(color.label_color());
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="{title_family}" font-size="{}" fill="{text_fill}" text-anchor="middle" dominant-baseline="text-before-edge">{hex}</text>"#,
                cell.label_center_x, cell.title_y, layout.title_size
            ));
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="{subtitle_family}" font-size="{}" fill="{text_fill}" text-anchor="middle" dominant-baseline="text-before-edge">{}</text>"#,
                cell.label_center_x,
                cell.subtitle_y,
                layout.subtitle_size,
                color.percent()
            ));
        }

        svg.push_str("</svg>");
        Ok(svg)
    }

    /// Rasterize the swatch grid to an RGBA pixmap.
    pub fn render(&self, palette: &Palette) -> Result<Pixmap, RenderError> {
        let svg = self.to_svg(palette)?;

        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let (width, height) = self.layout.canvas_size(palette.len())?;
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

        Ok(pixmap)
    }

    /// Render and encode as an 8-bit RGB PNG (no alpha channel).
    pub fn render_png(&self, palette: &Palette) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.render(palette)?;
        let png_bytes = encode_rgb_png(&pixmap)?;

        // Re-compress losslessly, keeping the RGB color type
        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                color_type_reduction: false,
                bit_depth_reduction: false,
                palette_reduction: false,
                grayscale_reduction: false,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);
        Ok(optimized)
    }

    /// Render the palette for `source_image` and write `{name}_palette.png`
    /// into `save_dir`, creating the directory if needed.
    pub fn save(
        &self,
        palette: &Palette,
        source_image: &Path,
        save_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        let png = self.render_png(palette)?;

        std::fs::create_dir_all(save_dir)?;
        let path = save_dir.join(format!("{}_palette.png", base_name(source_image)));
        std::fs::write(&path, &png)?;

        tracing::info!(
            path = %path.display(),
            colors = palette.len(),
            bytes = png.len(),
            "Saved palette image"
        );
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Make sure the generic sans-serif family maps to an installed face.
///
/// Returns false when the database holds no faces at all.
fn resolve_default_family(fontdb: &mut fontdb::Database) -> bool {
    let sans_serif = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..Default::default()
    };
    if fontdb.query(&sans_serif).is_some() {
        return true;
    }

    let installed = FALLBACK_FAMILIES
        .iter()
        .find(|&&name| {
            fontdb
                .query(&fontdb::Query {
                    families: &[fontdb::Family::Name(name)],
                    ..Default::default()
                })
                .is_some()
        })
        .map(|name| name.to_string())
        .or_else(|| {
            fontdb
                .faces()
                .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        });

    match installed {
        Some(name) => {
            tracing::debug!(family = %name, "Using installed family as sans-serif");
            fontdb.set_sans_serif_family(name);
            true
        }
        None => {
            tracing::warn!("No fonts found, swatch labels will not be drawn");
            false
        }
    }
}

/// Load a font file into the database and return its family name, or the
/// default family when the file is missing, unreadable, or not a font.
fn load_font_family(fontdb: &mut fontdb::Database, path: &Path) -> String {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(font = %path.display(), %e, "Font not loaded, using default");
            return DEFAULT_FONT_FAMILY.to_string();
        }
    };

    let ids = fontdb.load_font_source(fontdb::Source::Binary(Arc::new(data)));
    let family = ids
        .first()
        .and_then(|id| fontdb.face(*id))
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()));

    match family {
        Some(name) => {
            tracing::debug!(font = %path.display(), family = %name, "Loaded font");
            name
        }
        None => {
            tracing::warn!(font = %path.display(), "No usable face in font file, using default");
            DEFAULT_FONT_FAMILY.to_string()
        }
    }
}

/// Drop the (always opaque) alpha channel and encode as RGB.
fn encode_rgb_png(pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    let rgb: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue()]
        })
        .collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Value of a `font-family` attribute: generic families stay bare keywords,
/// named families are quoted.
fn font_family_attr(family: &str) -> String {
    const GENERIC: &[&str] = &["serif", "sans-serif", "monospace", "cursive", "fantasy"];
    if GENERIC.contains(&family) {
        return family.to_string();
    }

    let escaped = family
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('\'', "\\'");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorRecord;

    fn config_without_fonts() -> PaletteConfig {
        PaletteConfig {
            title_font: PathBuf::from("/nonexistent/Title.ttf"),
            subtitle_font: PathBuf::from("/nonexistent/Subtitle.ttf"),
            ..Default::default()
        }
    }

    fn palette() -> Palette {
        Palette::new(vec![
            ColorRecord::new((255, 255, 255), 0.4),
            ColorRecord::new((0, 0, 0), 0.3),
            ColorRecord::new((255, 0, 0), 0.2),
            ColorRecord::new((0, 255, 0), 0.1),
        ])
    }

    #[test]
    fn test_missing_fonts_fall_back_to_default() {
        let renderer = SwatchRenderer::new(&config_without_fonts()).unwrap();
        assert_eq!(renderer.title_family(), DEFAULT_FONT_FAMILY);
        assert_eq!(renderer.subtitle_family(), DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn test_non_font_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"definitely not a font").unwrap();

        let config = PaletteConfig {
            title_font: bogus,
            ..config_without_fonts()
        };
        let renderer = SwatchRenderer::new(&config).unwrap();
        assert_eq!(renderer.title_family(), DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn test_svg_contains_swatches_in_order() {
        let renderer = SwatchRenderer::new(&config_without_fonts()).unwrap();
        let svg = renderer.to_svg(&palette()).unwrap();

        assert!(svg.contains(r#"width="300" height="200""#));
        let positions: Vec<usize> = ["#FFFFFF</text>", "#000000</text>", "#FF0000</text>", "#00FF00</text>"]
            .iter()
            .map(|label| svg.find(label).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(svg.contains(">40.00%</text>"));
        assert!(svg.contains(">10.00%</text>"));
    }

    #[test]
    fn test_svg_label_contrast() {
        let renderer = SwatchRenderer::new(&config_without_fonts()).unwrap();
        let svg = renderer
            .to_svg(&Palette::new(vec![ColorRecord::new((255, 255, 255), 1.0)]))
            .unwrap();
        assert!(svg.contains(r##"fill="#000000" text-anchor="middle""##));

        let svg = renderer
            .to_svg(&Palette::new(vec![ColorRecord::new((0, 0, 128), 1.0)]))
            .unwrap();
        assert!(svg.contains(r##"fill="#FFFFFF" text-anchor="middle""##));
    }

    #[test]
    fn test_render_empty_palette_fails() {
        let renderer = SwatchRenderer::new(&config_without_fonts()).unwrap();
        assert!(matches!(
            renderer.render(&Palette::default()),
            Err(RenderError::EmptyPalette)
        ));
    }

    #[test]
    fn test_render_pixmap_size_and_fill() {
        let renderer = SwatchRenderer::new(&config_without_fonts()).unwrap();
        let pixmap = renderer.render(&palette()).unwrap();

        assert_eq!((pixmap.width(), pixmap.height()), (300, 200));

        let at = |x: u32, y: u32| {
            let c = pixmap.pixel(x, y).unwrap().demultiply();
            (c.red(), c.green(), c.blue())
        };
        // Swatch corners carry the swatch color (outline is the same color)
        assert_eq!(at(1, 1), (255, 255, 255));
        assert_eq!(at(101, 1), (0, 0, 0));
        assert_eq!(at(298, 2), (255, 0, 0));
        assert_eq!(at(1, 198), (0, 255, 0));
        // Unused cell stays white
        assert_eq!(at(150, 150), (255, 255, 255));
    }

    #[test]
    fn test_font_family_attr() {
        assert_eq!(font_family_attr("Lato Black"), "'Lato Black'");
        assert_eq!(font_family_attr("A&B"), "'A&amp;B'");
        assert_eq!(font_family_attr(DEFAULT_FONT_FAMILY), "sans-serif");
    }

    #[test]
    fn test_fallback_family_is_not_quoted_in_svg() {
        let renderer = SwatchRenderer::new(&config_without_fonts()).unwrap();
        let svg = renderer.to_svg(&palette()).unwrap();
        assert!(svg.contains(r#"font-family="sans-serif""#));
        assert!(!svg.contains("'sans-serif'"));
    }

    #[test]
    fn test_fallback_family_resolves_to_installed_face() {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();
        let has_faces = fontdb.len() > 0;

        assert_eq!(resolve_default_family(&mut fontdb), has_faces);
        if has_faces {
            let sans_serif = fontdb::Query {
                families: &[fontdb::Family::SansSerif],
                ..Default::default()
            };
            assert!(fontdb.query(&sans_serif).is_some());
        }
    }

    #[test]
    fn test_resolve_default_family_without_fonts() {
        let mut fontdb = fontdb::Database::new();
        assert!(!resolve_default_family(&mut fontdb));
    }
}
