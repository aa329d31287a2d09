//! The split pipeline: classify, extract every component, export each one.
//!
//! Everything that can fail for configuration or naming reasons is resolved
//! in `Splitter::from_config`, before any image is decoded.

use std::path::Path;

use crate::classify::{ColourSpec, PixelClassifier};
use crate::config::SplitConfig;
use crate::error::Result;
use crate::export::{ExportOptions, ExportOutcome, ExportedShape, ShapeExporter};
use crate::extract::{extract, Connectivity};
use crate::naming::NameTable;
use crate::output::{display_path, plural, Printer};
use crate::raster::Raster;
use crate::report::Report;
use crate::types::Colour;

/// Outcome of splitting one image.
#[derive(Debug, Default)]
pub struct SplitSummary {
    /// Number of components found.
    pub components: usize,
    /// Shapes written, in discovery order.
    pub written: Vec<ExportedShape>,
    /// Components skipped by the delete sentinel.
    pub deleted: usize,
    /// Canvas fill colour the shapes were written with.
    pub fill: Colour,
    /// Non-fatal problems, such as degenerate shapes.
    pub report: Report,
}

impl SplitSummary {
    pub fn skipped(&self) -> usize {
        self.report.warning_count()
    }
}

/// A configured split run, ready to process images.
#[derive(Debug, Clone)]
pub struct Splitter {
    background: Option<ColourSpec>,
    glue: Option<ColourSpec>,
    connectivity: Connectivity,
    options: ExportOptions,
    names: NameTable,
}

impl Splitter {
    pub fn new(background: Option<ColourSpec>, options: ExportOptions) -> Self {
        Self {
            background,
            glue: None,
            connectivity: Connectivity::default(),
            options,
            names: NameTable::new(),
        }
    }

    /// Build a splitter from configuration, loading the naming table.
    ///
    /// A malformed naming table fails here, so no output is ever written
    /// against a broken table.
    pub fn from_config(config: &SplitConfig) -> Result<Self> {
        let names = match &config.names {
            Some(path) => NameTable::load(path, &config.suffix)?,
            None => NameTable::new(),
        };

        let mut options = ExportOptions::new(&config.output);
        options.fill = config.fill;

        Ok(Self {
            background: config.background,
            glue: config.glue,
            connectivity: config.connectivity,
            options,
            names,
        })
    }

    pub fn with_glue(mut self, glue: ColourSpec) -> Self {
        self.glue = Some(glue);
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_names(mut self, names: NameTable) -> Self {
        self.names = names;
        self
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Decode `source` and split it.
    pub fn split_file(&self, source: &Path, printer: &Printer) -> Result<SplitSummary> {
        printer.status("Loading", &display_path(source));
        let raster = Raster::open(source)?;
        self.split_raster(&raster, printer)
    }

    /// Split an already decoded image.
    pub fn split_raster(&self, raster: &Raster, printer: &Printer) -> Result<SplitSummary> {
        let classifier =
            PixelClassifier::new(raster, self.background.as_ref(), self.glue.as_ref())?;

        printer.info(
            "Analyzed",
            &format!(
                "{}x{} image ({} pixels, {})",
                raster.width(),
                raster.height(),
                raster.len(),
                if classifier.has_alpha_channel() {
                    "alpha"
                } else {
                    "no alpha"
                }
            ),
        );
        if let Some(bg) = classifier.background() {
            printer.verbose("Background", &bg.to_string());
        }
        if let Some(glue) = classifier.glue() {
            printer.verbose("Glue", &glue.to_string());
        }

        let components = extract(raster, &classifier, self.connectivity)?;
        printer.status(
            "Found",
            &format!(
                "{} ({}-connected)",
                plural(components.len(), "shape", "shapes"),
                self.connectivity
            ),
        );

        let exporter = ShapeExporter::new(raster, &classifier, &self.names, &self.options);
        let mut summary = SplitSummary {
            components: components.len(),
            fill: exporter.fill_colour(),
            ..Default::default()
        };

        for component in &components {
            match exporter.export(component)? {
                ExportOutcome::Written(shape) => {
                    printer.verbose(
                        "Wrote",
                        &format!("{} -> {}", shape.anchor, shape.path.display()),
                    );
                    summary.written.push(shape);
                }
                ExportOutcome::Deleted(anchor) => {
                    printer.verbose("Deleted", &anchor.to_string());
                    summary.deleted += 1;
                }
                ExportOutcome::Skipped(diagnostic) => {
                    printer.warning("Skipped", &diagnostic.message);
                    summary.report.push(diagnostic);
                }
            }
        }

        Ok(summary)
    }
}
