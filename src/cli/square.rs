//! Square command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::square::{square_directory, SquareSummary};
use crate::types::Colour;

/// Pad every non-square PNG in a directory to a square
#[derive(Args, Debug)]
pub struct SquareArgs {
    /// Directory to scan recursively
    pub dir: PathBuf,

    /// Padding colour as #hex
    #[arg(long, short)]
    pub background: Colour,
}

pub fn run(args: SquareArgs, printer: &Printer) -> Result<SquareSummary> {
    printer.status("Scanning", &display_path(&args.dir));
    let summary = square_directory(&args.dir, args.background)?;

    for (path, w, h) in &summary.fixed {
        let size = (*w).max(*h);
        printer.verbose(
            "Fixed",
            &format!("{} ({}x{} -> {}x{})", display_path(path), w, h, size, size),
        );
    }

    printer.status(
        "Finished",
        &format!(
            "{}, {} already square, {} padded",
            plural(summary.total(), "image", "images"),
            summary.already_square,
            summary.fixed.len()
        ),
    );
    Ok(summary)
}
