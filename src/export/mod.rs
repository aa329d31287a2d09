//! Shape export.
//!
//! Each component becomes one RGB image cropped to its bounding box.
//! Background and glue pixels inside the box are left as the fill colour;
//! every other member pixel is copied from the source.

mod manifest;

pub use manifest::{write_manifest, ExportManifest};

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use serde::Serialize;

use crate::classify::PixelClassifier;
use crate::error::{Result, SplitError};
use crate::extract::{BoundingBox, Component};
use crate::naming::{fallback_name, NameEntry, NameTable};
use crate::raster::Raster;
use crate::report::Diagnostic;
use crate::types::{Colour, Point};

/// Export settings shared by every component of a run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory every output path is resolved against.
    pub output_root: PathBuf,
    /// Overrides the background colour as the canvas fill.
    pub fill: Option<Colour>,
}

impl ExportOptions {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            fill: None,
        }
    }

    pub fn with_fill(mut self, fill: Colour) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Record of one written shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedShape {
    pub anchor: Point,
    pub bounds: BoundingBox,
    /// Number of member pixels, glue included.
    pub pixels: usize,
    /// Output path relative to the output root.
    pub path: PathBuf,
}

/// What happened to one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(ExportedShape),
    /// The naming table marks this anchor for deletion.
    Deleted(Point),
    /// The component could not be rasterized; carries the warning to report.
    Skipped(Diagnostic),
}

/// Writes components of one source image to disk.
pub struct ShapeExporter<'a> {
    raster: &'a Raster,
    classifier: &'a PixelClassifier,
    names: &'a NameTable,
    options: &'a ExportOptions,
}

impl<'a> ShapeExporter<'a> {
    pub fn new(
        raster: &'a Raster,
        classifier: &'a PixelClassifier,
        names: &'a NameTable,
        options: &'a ExportOptions,
    ) -> Self {
        Self {
            raster,
            classifier,
            names,
            options,
        }
    }

    /// The colour unused canvas pixels are filled with.
    ///
    /// An explicit fill wins, then the background colour; an alpha-only image
    /// with neither falls back to black.
    pub fn fill_colour(&self) -> Colour {
        self.options
            .fill
            .or(self.classifier.background())
            .unwrap_or(Colour::BLACK)
            .without_alpha()
    }

    /// Rasterize `component` onto a fresh canvas the size of its bounding box.
    ///
    /// Returns `None` for an empty or degenerate component.
    pub fn render(&self, component: &Component) -> Option<(BoundingBox, RgbImage)> {
        let bounds = component.bounding_box()?;
        if bounds.width() < 1 || bounds.height() < 1 {
            return None;
        }

        let fill = Rgb(self.fill_colour().to_rgb());
        let mut canvas = RgbImage::from_pixel(bounds.width(), bounds.height(), fill);

        for &point in component.points() {
            let Some(pixel) = self.raster.pixel(point) else {
                continue;
            };
            if self.classifier.is_erased(pixel) {
                continue;
            }
            if let Some((x, y)) = bounds.local(point) {
                canvas.put_pixel(x, y, Rgb(pixel.to_rgb()));
            }
        }

        Some((bounds, canvas))
    }

    /// Export one component, creating directories as needed.
    ///
    /// Degenerate components and deleted anchors are reported through the
    /// outcome rather than as errors, so one bad shape never stops a batch.
    pub fn export(&self, component: &Component) -> Result<ExportOutcome> {
        let Some(anchor) = component.anchor() else {
            return Ok(ExportOutcome::Skipped(
                Diagnostic::warning(
                    "shapesplit::export::degenerate",
                    "Tried to save a shape with no pixels",
                )
                .with_help("This is a bug in component extraction"),
            ));
        };

        let relative = match self.names.lookup(anchor) {
            Some(NameEntry::Delete) => return Ok(ExportOutcome::Deleted(anchor)),
            Some(NameEntry::Path(path)) => path.clone(),
            None => fallback_name(anchor),
        };

        let Some((bounds, canvas)) = self.render(component) else {
            return Ok(ExportOutcome::Skipped(Diagnostic::warning(
                "shapesplit::export::degenerate",
                format!("Tried to save zero-size shape anchored at {}", anchor),
            )));
        };

        let path = self.options.output_root.join(&relative);
        save_rgb(&canvas, &path)?;

        Ok(ExportOutcome::Written(ExportedShape {
            anchor,
            bounds,
            pixels: component.len(),
            path: relative,
        }))
    }
}

/// Save an RGB canvas, overwriting any existing file.
///
/// The format follows the file extension, defaulting to PNG.
pub fn save_rgb(canvas: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        // create_dir_all tolerates directories that already exist.
        fs::create_dir_all(parent).map_err(|e| SplitError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    canvas
        .save_with_format(path, format)
        .map_err(|e| SplitError::Image {
            path: path.to_path_buf(),
            message: format!("Failed to write image: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ColourSpec;
    use crate::extract::{extract, Connectivity};
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn centre_raster() -> Raster {
        let mut img = RgbImage::from_pixel(3, 3, Rgb([1, 1, 1]));
        img.put_pixel(1, 1, Rgb([9, 9, 9]));
        Raster::from_rgb(img)
    }

    fn bg_classifier(raster: &Raster) -> PixelClassifier {
        let bg = ColourSpec::Fixed(Colour::rgb(1, 1, 1));
        PixelClassifier::new(raster, Some(&bg), None).unwrap()
    }

    #[test]
    fn test_export_centre_pixel() {
        let dir = tempdir().unwrap();
        let raster = centre_raster();
        let classifier = bg_classifier(&raster);
        let names = NameTable::new();
        let options = ExportOptions::new(dir.path());
        let exporter = ShapeExporter::new(&raster, &classifier, &names, &options);

        let components = extract(&raster, &classifier, Connectivity::Eight).unwrap();
        let outcome = exporter.export(&components[0]).unwrap();

        let ExportOutcome::Written(shape) = outcome else {
            panic!("expected a written shape");
        };
        assert_eq!(shape.path, PathBuf::from("shape_1_1.png"));

        let written = image::open(dir.path().join("shape_1_1.png")).unwrap();
        assert_eq!(written.color(), image::ColorType::Rgb8);
        let written = written.to_rgb8();
        assert_eq!(written.dimensions(), (1, 1));
        assert_eq!(written.get_pixel(0, 0).0, [9, 9, 9]);
    }

    #[test]
    fn test_single_pixel_image_exports_single_pixel_file() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("dot.png");
        RgbImage::from_pixel(1, 1, Rgb([9, 8, 7])).save(&source).unwrap();

        let raster = Raster::open(&source).unwrap();
        let bg = ColourSpec::Fixed(Colour::rgb(1, 1, 1));
        let classifier = PixelClassifier::new(&raster, Some(&bg), None).unwrap();
        let names = NameTable::new();
        let options = ExportOptions::new(dir.path().join("out"));
        let exporter = ShapeExporter::new(&raster, &classifier, &names, &options);

        let components = extract(&raster, &classifier, Connectivity::Eight).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 1);
        exporter.export(&components[0]).unwrap();

        let written = image::open(dir.path().join("out/shape_0_0.png"))
            .unwrap()
            .to_rgb8();
        assert_eq!(written.dimensions(), (1, 1));
        assert_eq!(written.get_pixel(0, 0).0, [9, 8, 7]);
    }

    #[test]
    fn test_rgba_sheet_exports_rgb_and_keeps_translucent_glue_lookalike() {
        // Ink, a half-transparent pixel in the glue's RGB, ink.
        let mut img = RgbaImage::from_pixel(3, 1, Rgba([200, 10, 10, 255]));
        img.put_pixel(1, 0, Rgba([70, 70, 70, 128]));
        img.put_pixel(2, 0, Rgba([10, 200, 10, 255]));
        let raster = Raster::from_rgba(img);

        let glue = ColourSpec::Fixed(Colour::rgb(70, 70, 70));
        let classifier = PixelClassifier::new(&raster, None, Some(&glue)).unwrap();
        let names = NameTable::new();
        let dir = tempdir().unwrap();
        let options = ExportOptions::new(dir.path()).with_fill(Colour::rgb(1, 2, 3));
        let exporter = ShapeExporter::new(&raster, &classifier, &names, &options);

        let components = extract(&raster, &classifier, Connectivity::Four).unwrap();
        assert_eq!(components.len(), 1);
        exporter.export(&components[0]).unwrap();

        let written = image::open(dir.path().join("shape_0_0.png")).unwrap();
        assert_eq!(written.color(), image::ColorType::Rgb8);
        let written = written.to_rgb8();
        assert_eq!(written.dimensions(), (3, 1));
        assert_eq!(written.get_pixel(0, 0).0, [200, 10, 10]);
        assert_eq!(written.get_pixel(1, 0).0, [70, 70, 70]);
        assert_eq!(written.get_pixel(2, 0).0, [10, 200, 10]);
    }

    #[test]
    fn test_render_fills_gaps_and_erases_glue() {
        // Row 0: ink, glue, ink. Row 1: background, background, ink.
        let mut img = RgbImage::from_pixel(3, 2, Rgb([1, 1, 1]));
        img.put_pixel(0, 0, Rgb([200, 10, 10]));
        img.put_pixel(1, 0, Rgb([70, 70, 70]));
        img.put_pixel(2, 0, Rgb([10, 200, 10]));
        img.put_pixel(2, 1, Rgb([10, 10, 200]));
        let raster = Raster::from_rgb(img);

        let bg = ColourSpec::Fixed(Colour::rgb(1, 1, 1));
        let glue = ColourSpec::Fixed(Colour::rgb(70, 70, 70));
        let classifier = PixelClassifier::new(&raster, Some(&bg), Some(&glue)).unwrap();
        let names = NameTable::new();
        let options = ExportOptions::new("unused").with_fill(Colour::rgb(0, 0, 255));
        let exporter = ShapeExporter::new(&raster, &classifier, &names, &options);

        let components = extract(&raster, &classifier, Connectivity::Four).unwrap();
        assert_eq!(components.len(), 1);

        let (bounds, canvas) = exporter.render(&components[0]).unwrap();
        assert_eq!((bounds.width(), bounds.height()), (3, 2));
        assert_eq!(canvas.get_pixel(0, 0).0, [200, 10, 10]);
        assert_eq!(canvas.get_pixel(1, 0).0, [0, 0, 255]); // glue erased
        assert_eq!(canvas.get_pixel(2, 0).0, [10, 200, 10]);
        assert_eq!(canvas.get_pixel(0, 1).0, [0, 0, 255]); // outside the shape
        assert_eq!(canvas.get_pixel(2, 1).0, [10, 10, 200]);
    }

    #[test]
    fn test_fill_defaults_to_background_rgb() {
        let raster = Raster::from_rgba(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0])));
        let bg = ColourSpec::Fixed(Colour::rgba(88, 94, 181, 255));
        let classifier = PixelClassifier::new(&raster, Some(&bg), None).unwrap();
        let names = NameTable::new();
        let options = ExportOptions::new("unused");
        let exporter = ShapeExporter::new(&raster, &classifier, &names, &options);

        assert_eq!(exporter.fill_colour(), Colour::rgb(88, 94, 181));
    }

    #[test]
    fn test_fill_without_background_is_black() {
        let raster = Raster::from_rgba(RgbaImage::new(1, 1));
        let classifier = PixelClassifier::new(&raster, None, None).unwrap();
        let names = NameTable::new();
        let options = ExportOptions::new("unused");
        let exporter = ShapeExporter::new(&raster, &classifier, &names, &options);

        assert_eq!(exporter.fill_colour(), Colour::BLACK);
    }

    #[test]
    fn test_named_export_creates_directories() {
        let dir = tempdir().unwrap();
        let raster = centre_raster();
        let classifier = bg_classifier(&raster);
        let names = NameTable::parse("towers:\n  ice:\n    \"1,1\": ice1\n", ".png").unwrap();
        let options = ExportOptions::new(dir.path());
        let exporter = ShapeExporter::new(&raster, &classifier, &names, &options);

        let components = extract(&raster, &classifier, Connectivity::Eight).unwrap();
        exporter.export(&components[0]).unwrap();
        // A second export overwrites silently.
        exporter.export(&components[0]).unwrap();

        assert!(dir.path().join("towers/ice/ice1.png").exists());
    }

    #[test]
    fn test_deleted_anchor_is_not_written() {
        let dir = tempdir().unwrap();
        let raster = centre_raster();
        let classifier = bg_classifier(&raster);
        let names = NameTable::parse("delete:\n  \"1,1\": __DELETE\n", ".png").unwrap();
        let options = ExportOptions::new(dir.path());
        let exporter = ShapeExporter::new(&raster, &classifier, &names, &options);

        let components = extract(&raster, &classifier, Connectivity::Eight).unwrap();
        let outcome = exporter.export(&components[0]).unwrap();

        assert_eq!(outcome, ExportOutcome::Deleted(Point::new(1, 1)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_component_is_skipped() {
        let raster = centre_raster();
        let classifier = bg_classifier(&raster);
        let names = NameTable::new();
        let options = ExportOptions::new("unused");
        let exporter = ShapeExporter::new(&raster, &classifier, &names, &options);

        let outcome = exporter.export(&Component::new(vec![])).unwrap();
        assert!(matches!(outcome, ExportOutcome::Skipped(_)));
    }

    #[test]
    fn test_round_trip_matches_source_pixels() {
        let dir = tempdir().unwrap();
        let mut img = RgbImage::from_pixel(6, 5, Rgb([1, 1, 1]));
        let ink = [
            (1, 1, [10, 20, 30]),
            (2, 1, [40, 50, 60]),
            (2, 2, [70, 80, 90]),
            (3, 3, [100, 110, 120]),
            (4, 3, [130, 140, 150]),
        ];
        for (x, y, rgb) in ink {
            img.put_pixel(x, y, Rgb(rgb));
        }
        let raster = Raster::from_rgb(img);
        let classifier = bg_classifier(&raster);
        let names = NameTable::new();
        let options = ExportOptions::new(dir.path());
        let exporter = ShapeExporter::new(&raster, &classifier, &names, &options);

        let components = extract(&raster, &classifier, Connectivity::Eight).unwrap();
        assert_eq!(components.len(), 1);
        let ExportOutcome::Written(shape) = exporter.export(&components[0]).unwrap() else {
            panic!("expected a written shape");
        };

        let written = image::open(dir.path().join(&shape.path)).unwrap().to_rgb8();
        for (x, y, rgb) in ink {
            let local_x = x - shape.bounds.min_col;
            let local_y = y - shape.bounds.min_row;
            assert_eq!(written.get_pixel(local_x, local_y).0, rgb);
        }
    }
}
