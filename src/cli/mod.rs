pub mod completions;
pub mod names;
pub mod split;
pub mod square;

use clap::{Parser, Subcommand};

/// shapesplit - Cut sprite sheets into one image per shape
#[derive(Parser, Debug)]
#[command(name = "shapesplit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Print a line per exported shape
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split an image into one file per connected shape
    Split(split::SplitArgs),

    /// Pad every non-square PNG in a directory to a square
    Square(square::SquareArgs),

    /// Validate and list a naming table
    Names(names::NamesArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
