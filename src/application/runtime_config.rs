use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::BuilderConfig;

pub const DEFAULT_INPUT: &str = "tree.txt";
pub const DEFAULT_OUTPUT: &str = "output";

/// Settings for one run, taken from the command line.
///
/// Paths left unset here are filled from the config file, then from the
/// defaults; relative paths are resolved against `root`. The current
/// directory as root adds no prefix, so symlinks created under the default
/// output read `output/<source>`.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

impl RuntimeConfig {
    pub fn input_path(&self, config: &BuilderConfig) -> PathBuf {
        self.resolve(&self.input, &config.input, DEFAULT_INPUT)
    }

    pub fn output_path(&self, config: &BuilderConfig) -> PathBuf {
        self.resolve(&self.output, &config.output, DEFAULT_OUTPUT)
    }

    fn resolve(&self, flag: &Option<PathBuf>, file: &Option<PathBuf>, default: &str) -> PathBuf {
        let chosen = flag
            .as_deref()
            .or(file.as_deref())
            .unwrap_or(Path::new(default));
        if self.root.as_os_str().is_empty() || self.root.as_path() == Path::new(".") {
            chosen.to_path_buf()
        } else {
            self.root.join(chosen)
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            input: None,
            output: None,
            dry_run: false,
        }
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            root: cli.root,
            input: cli.input,
            output: cli.output,
            dry_run: cli.dry_run,
        }
    }
}
