use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::features::ExtractMode;

/// Shared application context for global flags
#[derive(Clone, Debug, Default)]
pub struct AppContext
{
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
}

#[derive(Parser)]
#[command(name = "simprint")]
#[command(about = "Weighted 64-bit simhash fingerprints and Hamming similarity for near-duplicate detection")]
#[command(version, long_about = None)]
pub struct Cli
{
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress bars and non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Raise log verbosity (-v debug, -vv trace); SIMPRINT_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Read configuration from this file instead of ./simprint.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands
{
    /// Fingerprint documents (files or directories)
    Fingerprint(FingerprintArgs),

    /// Compare two tokens, or two documents with --files
    Compare(CompareArgs),

    /// Initialize a simprint.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat
{
    #[default]
    Text,
    Json,
    Table,
}

/// Overrides for the `[features]` config section
#[derive(Debug, Clone, Default, Args)]
pub struct FeatureArgs
{
    /// Feature unit
    #[arg(long, value_enum)]
    pub mode: Option<ExtractMode>,

    /// Window size for shingles and char n-grams
    #[arg(long, value_name = "N")]
    pub ngram: Option<usize>,

    /// Keep original case
    #[arg(long)]
    pub no_lowercase: bool,

    /// Drop words shorter than this many characters
    #[arg(long, value_name = "N")]
    pub min_len: Option<usize>,
}

#[derive(Debug, Parser)]
pub struct FingerprintArgs
{
    /// Files or directories to fingerprint
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Only walk files matching these globs (e.g. "*.md")
    #[arg(short, long)]
    pub include: Vec<String>,

    /// Additional glob patterns to ignore
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Include hidden files when walking directories
    #[arg(long)]
    pub hidden: bool,

    /// Maximum directory depth
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Print tokens zero-padded to 16 digits
    #[arg(long)]
    pub pad: bool,

    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[derive(Debug, Parser)]
pub struct CompareArgs
{
    /// First token (or file with --files)
    pub left: String,

    /// Second token (or file with --files)
    pub right: String,

    /// Treat arguments as documents and fingerprint them first
    #[arg(long)]
    pub files: bool,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Read malformed tokens as zero instead of failing
    #[arg(long, conflicts_with_all = ["strict", "files"])]
    pub lenient: bool,

    /// Fail on malformed tokens (default unless configured otherwise)
    #[arg(long, conflicts_with = "files")]
    pub strict: bool,

    /// Near-duplicate threshold in percent
    #[arg(long, value_name = "PERCENT")]
    pub threshold: Option<f64>,

    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[derive(Debug, Parser)]
pub struct InitArgs
{
    /// Directory to write simprint.toml into
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Parser)]
pub struct CompletionsArgs
{
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write to stdout instead of a file
    #[arg(long, conflicts_with = "out_dir")]
    pub stdout: bool,

    /// Directory to write the completion file into
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell
{
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
