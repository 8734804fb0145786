use std::path::{Path, PathBuf};

use colored::Colorize;
use compio::fs;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::config::{BuilderConfig, CONFIG_FILE_NAME, ConfigError};
use crate::filesystem::{MaterializeError, MaterializeReport, Materializer, TreeCounts, TreeNode};
use crate::listing::{Listing, LoadError, ParseError, parse_listing};

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let config = BuilderConfig::read(&runtime_config.root)
            .await
            .context(ConfigStageSnafu)?;
        debug!(
            "Loaded config from {}: {:?}",
            runtime_config.root.join(CONFIG_FILE_NAME).display(),
            config
        );

        let input = runtime_config.input_path(&config);
        let tree = Self::load_tree(&input).await?;

        if runtime_config.dry_run {
            print!("{}", tree.to_listing());
            return Ok(());
        }

        let output = runtime_config.output_path(&config);
        let report = Self::build(&tree, &output).await?;
        print_success(&output, &report);

        Ok(())
    }

    async fn load_tree(input: &Path) -> Result<TreeNode, ApplicationError> {
        let listing = Listing::read(input).await.context(ListingReadSnafu)?;
        let tree = parse_listing(&listing.lines).context(ListingParseSnafu {
            file_path: input.to_path_buf(),
        })?;

        if tree.is_empty() {
            warn!("Listing {} contains no entries", input.display());
        }
        let TreeCounts {
            directories,
            files,
            symlinks,
        } = tree.counts();
        info!(
            "Parsed listing {}: {} directories, {} files, {} symlinks",
            input.display(),
            directories,
            files,
            symlinks
        );
        Ok(tree)
    }

    async fn build(tree: &TreeNode, output: &Path) -> Result<MaterializeReport, ApplicationError> {
        debug!("Creating output directory {}", output.display());
        fs::create_dir_all(output).await.context(OutputRootSnafu {
            path: output.to_path_buf(),
        })?;

        Materializer::new(output)
            .materialize(tree)
            .await
            .context(MaterializationSnafu)
    }
}

fn print_success(output: &Path, report: &MaterializeReport) {
    println!(
        "{} in '{}' directory ({})",
        "Structure created successfully".green().bold(),
        output.display(),
        report
    );
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigStageError { source: ConfigError },
    #[snafu(display("Critical failure encountered while reading the listing"))]
    ListingReadError { source: LoadError },
    #[snafu(display("The listing {} is not a valid directory tree", file_path.display()))]
    ListingParseError {
        file_path: PathBuf,
        source: ParseError,
    },
    #[snafu(display("Failed to create the output directory {}", path.display()))]
    OutputRootError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Critical failure encountered while creating the structure"))]
    MaterializationError { source: MaterializeError },
}
