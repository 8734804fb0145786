use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Recreate a directory tree from its textual listing
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Listing file to read, relative to the root [default: tree.txt]
    #[clap(long, short)]
    pub input: Option<PathBuf>,

    /// Directory to create the tree in, relative to the root [default: output]
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Directory holding the listing, the config file and the output
    #[clap(long, short, default_value = ".")]
    pub root: PathBuf,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Print the parsed tree instead of creating it
    #[clap(long)]
    pub dry_run: bool,
}
