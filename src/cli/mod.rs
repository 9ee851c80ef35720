//! Command-line interface module.

mod args;
pub mod check;
pub mod show;

pub use args::{Cli, Commands, DumpFormat, SourceArgs};

use anyhow::Result;

/// Dispatch a parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Check { files } => check::check_files(files),
        Commands::Dump {
            source,
            format,
            output,
        } => show::dump(source, *format, output.as_deref()),
        Commands::Head { source } => show::head(source),
        Commands::EditLink { source, page } => show::edit_link(source, page),
    }
}
