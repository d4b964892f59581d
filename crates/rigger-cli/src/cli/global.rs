//! Flags shared by every `rigger` subcommand.
//!
//! Flattened into [`super::Cli`] and marked `global`, so
//! `rigger route list blog -q` and `rigger -q route list blog` are the same.

use std::path::PathBuf;

use clap::{ArgAction, Args, builder::FalseyValueParser};

/// Flags accepted before or after any subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log verbosity.
    ///
    /// Warnings and errors are always logged; each `-v` lowers the filter by
    /// one level (INFO, DEBUG, TRACE). `RUST_LOG` overrides the count.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -v      - Info level (files written, routes added)
    -vv     - Debug level (package config, lookups)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Only errors and JSON documents reach the terminal.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Plain, uncoloured messages.
    ///
    /// `NO_COLOR` with any value except an empty string, `0`, `false`,
    /// `no`, `n`, `f` or `off` turns colours off (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// TOML file read instead of the per-user `config.toml`.
    ///
    /// A path given here must exist; the default location may be missing.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Rendering of command results.
    ///
    /// `auto` defers to `output.format` from the configuration, and from
    /// there to colour on a terminal and plain text otherwise. `json` prints
    /// one JSON document per command on stdout and JSON log lines on stderr.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,

    /// Directory holding the packages; overrides `workspace.packages_dir`.
    #[arg(
        long = "packages-dir",
        global = true,
        value_name = "DIR",
        help = "Packages directory (default: ./packages)"
    )]
    pub packages_dir: Option<PathBuf>,
}

/// Value of `--output-format` and `output.format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Coloured messages with status symbols.
    Human,
    Plain,
    Json,
}
