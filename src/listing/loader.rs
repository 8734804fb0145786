use std::path::{Path, PathBuf};

use compio::fs;
use snafu::{ResultExt, Snafu};
use tracing::debug;

/// Line the listing tool prints for the directory it was started in.
const ROOT_MARKER: &str = ".";

/// A listing line kept for parsing, with its 1-based number in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    pub number: usize,
    pub text: String,
}

/// The entry lines of a listing, boilerplate removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub lines: Vec<ListingLine>,
}

impl Listing {
    pub async fn read(path: &Path) -> Result<Self, LoadError> {
        debug!("Reading listing from {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            path: path.to_path_buf(),
        })?;
        let text = String::from_utf8(bytes).context(EncodingSnafu {
            path: path.to_path_buf(),
        })?;

        let listing = Self::from_text(&text);
        debug!(
            "Kept {} entry lines from {}",
            listing.lines.len(),
            path.display()
        );
        Ok(listing)
    }

    /// Splits `text` into lines, dropping the root marker, the summary line
    /// and blank separators.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !is_boilerplate(line))
            .map(|(index, line)| ListingLine {
                number: index + 1,
                text: line.to_string(),
            })
            .collect();

        Self { lines }
    }
}

fn is_boilerplate(line: &str) -> bool {
    line == ROOT_MARKER || line.trim().is_empty() || is_summary_line(line)
}

/// Recognizes the `N directories, M files` line printed after the tree.
///
/// The singular forms the listing tool uses for counts of one are accepted as
/// well, but only on lines that start with a count so entry names containing
/// these words are never dropped.
pub fn is_summary_line(line: &str) -> bool {
    if line.contains("directories") && line.contains("files") {
        return true;
    }
    line.starts_with(|c: char| c.is_ascii_digit())
        && line.contains(" director")
        && line.contains(" file")
}

#[derive(Debug, Snafu)]
pub enum LoadError {
    #[snafu(display("Failed to read the listing file: {}", path.display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("The listing file {} is not valid UTF-8", path.display()))]
    EncodingError {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
}
