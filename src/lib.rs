//! shapesplit - Sprite sheet shape splitter
//!
//! Partitions the non-background pixels of a sprite sheet into connected
//! shapes and writes each shape to its own image, cropped to its bounding
//! box and named through an optional anchor-keyed naming table.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod raster;
pub mod report;
pub mod square;
pub mod types;

pub use classify::{ColourSpec, PixelClassifier};
pub use config::SplitConfig;
pub use error::{Result, SplitError};
pub use export::{ExportOptions, ExportOutcome, ExportedShape, ShapeExporter};
pub use extract::{extract, BoundingBox, Component, Connectivity};
pub use naming::{NameEntry, NameTable, NamingKey, NamingNode};
pub use pipeline::{SplitSummary, Splitter};
pub use raster::Raster;
pub use report::{Diagnostic, Report};
pub use square::{pad_to_square, square_directory, SquareSummary};
pub use types::{Colour, Point};
