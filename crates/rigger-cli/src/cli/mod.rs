//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "rigger",
    bin_name = "rigger",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Autoloader and routing manifests for PHP packages",
    long_about = "Rigger maintains the class-location manifest (autoloader.json) \
                  and the route table (routing.json) of each package under the \
                  packages directory.",
    after_help = "EXAMPLES:\n\
        \x20 rigger autoload add blog controllers/Users.php\n\
        \x20 rigger autoload find blog controllers/Users\n\
        \x20 rigger route add blog '/users/:id:int' 'controllers/Users@show' --method GET\n\
        \x20 rigger route compile '/files/:path...'\n\
        \x20 rigger completions bash > /usr/share/bash-completion/completions/rigger",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Maintain a package's class-location manifest.
    #[command(
        visible_alias = "al",
        about = "Manage a package autoloader",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 rigger autoload init blog\n\
            \x20 rigger autoload add blog models/Post.php\n\
            \x20 rigger autoload add blog lib/helpers.php --class lib/Html --class lib/Url\n\
            \x20 rigger autoload rebuild blog"
    )]
    Autoload(AutoloadCommands),

    /// Maintain a package's route table.
    #[command(
        visible_alias = "rt",
        about = "Manage a package routing table",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 rigger route init blog\n\
            \x20 rigger route add blog /about 'controllers/Pages@about'\n\
            \x20 rigger route add blog '/posts/:id:int' 'controllers/Posts@show' --api true\n\
            \x20 rigger route list blog"
    )]
    Route(RouteCommands),

    /// Check a name against the identifier grammar.
    #[command(
        about = "Validate a class, namespace or method name",
        after_help = "EXAMPLES:\n\
            \x20 rigger check-name 'controllers\\Users'\n\
            \x20 rigger check-name index --no-namespace"
    )]
    CheckName(CheckNameArgs),

    /// Initialise a Rigger configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 rigger init\n\
            \x20 rigger init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 rigger completions bash > ~/.local/share/bash-completion/completions/rigger\n\
            \x20 rigger completions zsh  > ~/.zfunc/_rigger\n\
            \x20 rigger completions fish > ~/.config/fish/completions/rigger.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Rigger configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 rigger config get workspace.packages_dir\n\
            \x20 rigger config list\n\
            \x20 rigger config path"
    )]
    Config(ConfigCommands),
}

// ── autoload ──────────────────────────────────────────────────────────────────

/// Subcommands for `rigger autoload`.
#[derive(Debug, Subcommand)]
pub enum AutoloadCommands {
    /// Overwrite the autoloader with an empty manifest.
    Init(PackageArgs),

    /// Register the classes of a package file.
    Add(AutoloadAddArgs),

    /// Print the file registered for a class.
    Find(AutoloadFindArgs),

    /// Rebuild the manifest from every PHP file in the package.
    Rebuild(PackageArgs),
}

/// A command that only needs a package.
#[derive(Debug, Args)]
pub struct PackageArgs {
    #[arg(value_name = "PACKAGE", help = "Package name")]
    pub package: String,
}

/// Arguments for `rigger autoload add`.
#[derive(Debug, Args)]
pub struct AutoloadAddArgs {
    #[arg(value_name = "PACKAGE", help = "Package name")]
    pub package: String,

    /// Path of the PHP file, relative to the package directory.
    #[arg(value_name = "FILE", help = "Package-relative PHP file")]
    pub file: String,

    /// Register these classes instead of scanning the file.
    #[arg(
        long = "class",
        value_name = "NAME",
        help = "Class to register (repeatable; skips scanning)"
    )]
    pub classes: Vec<String>,
}

/// Arguments for `rigger autoload find`.
#[derive(Debug, Args)]
pub struct AutoloadFindArgs {
    #[arg(value_name = "PACKAGE", help = "Package name")]
    pub package: String,

    /// Class name without the package prefix; `/` works as separator.
    #[arg(value_name = "CLASS", help = "Qualified class name")]
    pub class: String,
}

// ── route ─────────────────────────────────────────────────────────────────────

/// Subcommands for `rigger route`.
#[derive(Debug, Subcommand)]
pub enum RouteCommands {
    /// Overwrite the routing file with an empty table.
    Init(PackageArgs),

    /// Compile an address and append the route.
    Add(RouteAddArgs),

    /// Print the routes of a package.
    #[command(visible_alias = "ls")]
    List(PackageArgs),

    /// Print the compiled form of an address without touching any package.
    Compile(RouteCompileArgs),
}

/// Arguments for `rigger route add`.
#[derive(Debug, Args)]
pub struct RouteAddArgs {
    #[arg(value_name = "PACKAGE", help = "Package name")]
    pub package: String,

    /// e.g. `/users/:id:int` or `/files/:path...`.
    #[arg(value_name = "ADDRESS", help = "Route address")]
    pub address: String,

    #[arg(value_name = "CONTROLLER", help = "Controller reference (Class@method)")]
    pub controller: String,

    /// Restrict the route to these HTTP methods.
    #[arg(
        short = 'm',
        long = "method",
        value_name = "METHOD",
        help = "HTTP method (repeatable)"
    )]
    pub methods: Vec<String>,

    /// Match the address against the full request path.
    #[arg(long = "absolute", help = "Mark the route absolute")]
    pub absolute: bool,

    /// `true`, `false`, or a controller reference for API requests.
    #[arg(long = "api", value_name = "VALUE", help = "API permission")]
    pub api: Option<String>,

    /// `true`, `false`, or a controller reference for AJAX requests.
    #[arg(long = "ajax", value_name = "VALUE", help = "AJAX permission")]
    pub ajax: Option<String>,
}

/// Arguments for `rigger route compile`.
#[derive(Debug, Args)]
pub struct RouteCompileArgs {
    #[arg(value_name = "ADDRESS", help = "Route address")]
    pub address: String,
}

// ── check-name ────────────────────────────────────────────────────────────────

/// Arguments for `rigger check-name`.
#[derive(Debug, Args)]
pub struct CheckNameArgs {
    #[arg(value_name = "NAME", help = "Name to check")]
    pub name: String,

    /// Require a single identifier (method and package names).
    #[arg(long = "no-namespace", help = "Reject namespace separators")]
    pub no_namespace: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `rigger init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write here instead of the platform config location.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Where to write the configuration"
    )]
    pub output: Option<PathBuf>,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `rigger completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `rigger config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `workspace.packages_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
