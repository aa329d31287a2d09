//! Split command implementation.
//!
//! Loads a sprite sheet, finds every connected shape and writes each one to
//! its own RGB image.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::classify::ColourSpec;
use crate::config::SplitConfig;
use crate::error::{Result, SplitError};
use crate::export::{write_manifest, ExportManifest};
use crate::extract::Connectivity;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{SplitSummary, Splitter};
use crate::square::square_directory;
use crate::types::Colour;

/// Split an image into one file per connected shape
#[derive(Args, Debug, Default)]
pub struct SplitArgs {
    /// Sprite sheet to split (default: `source` from shapesplit.yaml)
    pub source: Option<PathBuf>,

    /// Output directory for exported shapes
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Background colour as #hex, or @x,y to sample a pixel
    #[arg(long, short)]
    pub background: Option<ColourSpec>,

    /// Glue colour as #hex, or @x,y to sample a pixel
    #[arg(long, short)]
    pub glue: Option<ColourSpec>,

    /// Pixel adjacency used to grow shapes
    #[arg(long, short, value_enum)]
    pub connectivity: Option<Connectivity>,

    /// Canvas fill colour (default: the background colour)
    #[arg(long)]
    pub fill: Option<Colour>,

    /// Naming table mapping shape anchors to output paths
    #[arg(long, short)]
    pub names: Option<PathBuf>,

    /// Suffix appended to names from the naming table
    #[arg(long)]
    pub suffix: Option<String>,

    /// Write a JSON listing of exported shapes
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Pad exported shapes to squares
    #[arg(long)]
    pub square: bool,

    /// Configuration file (default: ./shapesplit.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SplitArgs {
    /// Layer the command-line flags over `config`.
    fn apply(self, mut config: SplitConfig) -> SplitConfig {
        if let Some(source) = self.source {
            config.source = Some(source);
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(background) = self.background {
            config.background = Some(background);
        }
        if let Some(glue) = self.glue {
            config.glue = Some(glue);
        }
        if let Some(connectivity) = self.connectivity {
            config.connectivity = connectivity;
        }
        if let Some(fill) = self.fill {
            config.fill = Some(fill);
        }
        if let Some(names) = self.names {
            config.names = Some(names);
        }
        if let Some(suffix) = self.suffix {
            config.suffix = suffix;
        }
        if let Some(manifest) = self.manifest {
            config.manifest = Some(manifest);
        }
        config.square |= self.square;
        config
    }
}

pub fn run(args: SplitArgs, printer: &Printer) -> Result<SplitSummary> {
    let config = match &args.config {
        Some(path) => SplitConfig::load(path)?,
        None => SplitConfig::discover(Path::new("."))?,
    };
    let config = args.apply(config);

    let source = config.source.clone().ok_or_else(|| SplitError::Configuration {
        message: "No source image given".to_string(),
        help: Some("Pass an image path or set `source` in shapesplit.yaml".to_string()),
    })?;

    if !source.exists() {
        return Err(SplitError::Io {
            path: source.clone(),
            message: format!("File not found: {}", display_path(&source)),
        });
    }

    // Naming problems surface here, before the image is touched.
    let splitter = Splitter::from_config(&config)?;
    if let Some(names) = &config.names {
        printer.verbose(
            "Names",
            &format!(
                "{} from {}",
                plural(splitter.names().len(), "entry", "entries"),
                display_path(names)
            ),
        );
    }

    let summary = splitter.split_file(&source, printer)?;

    if let Some(path) = &config.manifest {
        let manifest = ExportManifest {
            source: display_path(&source),
            connectivity: config.connectivity,
            shapes: &summary.written,
        };
        write_manifest(&manifest, path)?;
        printer.verbose("Manifest", &display_path(path));
    }

    // An empty sheet writes nothing, so there may be no output root to walk.
    if config.square && summary.written.is_empty() {
        printer.verbose("Squared", "nothing to square");
    } else if config.square {
        let squared = square_directory(&config.output, summary.fill)?;
        printer.info(
            "Squared",
            &format!(
                "{} ({} already square)",
                plural(squared.fixed.len(), "image", "images"),
                squared.already_square
            ),
        );
    }

    let mut message = format!(
        "{} to {}",
        plural(summary.written.len(), "shape", "shapes"),
        display_path(&config.output)
    );
    if summary.deleted > 0 {
        message.push_str(&format!(" ({} deleted)", summary.deleted));
    }
    printer.status("Finished", &message);

    if !summary.report.is_empty() {
        summary.report.print(printer);
    }

    Ok(summary)
}
