use clap::Parser;
use miette::Result;
use shapesplit::cli::{Cli, Commands};
use shapesplit::output::{Printer, Verbosity};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));

    match cli.command {
        Commands::Split(args) => {
            shapesplit::cli::split::run(args, &printer)?;
        }
        Commands::Square(args) => {
            shapesplit::cli::square::run(args, &printer)?;
        }
        Commands::Names(args) => {
            shapesplit::cli::names::run(args, &printer)?;
        }
        Commands::Completions(args) => {
            shapesplit::cli::completions::run(args)?;
        }
    }

    Ok(())
}
