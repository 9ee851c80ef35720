//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Validate and inspect the Jangle docs site configuration
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate config files, each one on its own
    #[command(visible_alias = "c")]
    Check {
        /// Config files (.toml or .json)
        #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
        files: Vec<PathBuf>,
    },

    /// Print the normalized config handed to the site generator
    #[command(visible_alias = "d")]
    Dump {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: DumpFormat,

        /// Write output to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Print the rendered <head> tags
    Head {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the "edit this page" URL for a page source path
    #[command(visible_alias = "e")]
    EditLink {
        #[command(flatten)]
        source: SourceArgs,

        /// Page source path, relative to the docs directory (e.g. guide/README.md)
        page: String,
    },
}

/// A config file and an optional overlay merged over it.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Config file (.toml or .json)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Overlay whose fields replace the base config's
    #[arg(short = 'O', long, value_hint = clap::ValueHint::FilePath)]
    pub overlay: Option<PathBuf>,
}

/// Output format for `dump`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Json,
    Toml,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("jangle-site").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_check_many_files() {
        let cli = parse(&["check", "config.toml", "site/config.toml"]);
        let Commands::Check { files } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(
            files,
            [PathBuf::from("config.toml"), PathBuf::from("site/config.toml")]
        );
    }

    #[test]
    fn test_check_requires_a_file() {
        assert!(Cli::try_parse_from(["jangle-site", "check"]).is_err());
    }

    #[test]
    fn test_dump_with_overlay() {
        let cli = parse(&["-v", "dump", "config.toml", "-O", "site.toml", "--format", "toml"]);
        assert!(cli.verbose);
        let Commands::Dump { source, format, output } = cli.command else {
            panic!("expected dump");
        };
        assert_eq!(source.file, PathBuf::from("config.toml"));
        assert_eq!(source.overlay, Some(PathBuf::from("site.toml")));
        assert_eq!(format, DumpFormat::Toml);
        assert_eq!(output, None);
    }

    #[test]
    fn test_edit_link_alias() {
        let cli = parse(&["e", "config.toml", "guide/README.md"]);
        let Commands::EditLink { source, page } = cli.command else {
            panic!("expected edit-link");
        };
        assert_eq!(source.overlay, None);
        assert_eq!(page, "guide/README.md");
    }

    #[test]
    fn test_color_flag() {
        let cli = parse(&["head", "config.toml", "--color", "never"]);
        assert_eq!(cli.color, ColorChoice::Never);
    }
}
