//! Names command implementation.
//!
//! Validates a naming table and prints the flattened anchor-to-path
//! mapping, without touching any image.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{Result, SplitError};
use crate::naming::{NameEntry, NameTable, DEFAULT_SUFFIX, DELETE_SENTINEL};
use crate::output::{display_path, plural, Printer};
use crate::types::Point;

/// Validate and list a naming table
#[derive(Args, Debug)]
pub struct NamesArgs {
    /// Naming table (YAML)
    pub table: PathBuf,

    /// Suffix appended to every leaf name
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonEntry {
    anchor: Point,
    path: Option<PathBuf>,
    delete: bool,
}

pub fn run(args: NamesArgs, printer: &Printer) -> Result<()> {
    printer.status("Checking", &display_path(&args.table));
    let table = NameTable::load(&args.table, &args.suffix)?;

    let rendered = if args.json {
        render_json(&table)?
    } else {
        render_lines(&table)
    };
    println!("{}", rendered);

    printer.status(
        "Finished",
        &plural(table.len(), "entry", "entries"),
    );
    Ok(())
}

/// One `row,col -> path` line per entry, in row-major anchor order.
pub fn render_lines(table: &NameTable) -> String {
    table
        .iter()
        .map(|(anchor, entry)| {
            let target = match entry {
                NameEntry::Path(path) => path.display().to_string(),
                NameEntry::Delete => DELETE_SENTINEL.to_string(),
            };
            format!("{},{} -> {}", anchor.row, anchor.col, target)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_json(table: &NameTable) -> Result<String> {
    let entries: Vec<JsonEntry> = table
        .iter()
        .map(|(anchor, entry)| JsonEntry {
            anchor: *anchor,
            path: match entry {
                NameEntry::Path(path) => Some(path.clone()),
                NameEntry::Delete => None,
            },
            delete: *entry == NameEntry::Delete,
        })
        .collect();

    serde_json::to_string_pretty(&entries).map_err(|e| SplitError::Parse {
        message: format!("Failed to serialize naming table: {}", e),
        help: None,
    })
}
