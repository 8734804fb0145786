use snafu::Snafu;

use crate::filesystem::Symlink;

/// Connector drawn before an entry that has more siblings below it.
pub const BRANCH_CONNECTOR: &str = "├── ";
/// Connector drawn before the last entry of a directory.
pub const TERMINAL_CONNECTOR: &str = "└── ";
/// Separates a symbolic link's name from the path it points at.
pub const SYMLINK_SEPARATOR: &str = " -> ";

/// An entry name extracted from a depth-stripped listing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryName {
    /// A directory or a plain file; which one is decided by lookahead.
    Plain(String),
    Symlink(Symlink),
}

/// Parses the text that follows the indentation markers of a line.
///
/// Names are taken verbatim: no quoting or escaping is interpreted, so
/// embedded spaces and slashes survive as-is.
pub fn parse_entry(remainder: &str) -> Result<EntryName, EntryError> {
    let text = remainder
        .strip_prefix(BRANCH_CONNECTOR)
        .or_else(|| remainder.strip_prefix(TERMINAL_CONNECTOR))
        .ok_or_else(|| EntryError::MissingConnector {
            text: remainder.to_string(),
        })?;

    let Some((target, source)) = text.split_once(SYMLINK_SEPARATOR) else {
        return Ok(EntryName::Plain(text.to_string()));
    };

    // The separator must occur exactly once.
    if source.contains(SYMLINK_SEPARATOR) {
        return Err(EntryError::AmbiguousSymlink {
            text: text.to_string(),
            occurrences: text.matches(SYMLINK_SEPARATOR).count(),
        });
    }

    Ok(EntryName::Symlink(Symlink::new(target, source)))
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum EntryError {
    #[snafu(display("Expected an entry connector at the start of '{}'", text))]
    MissingConnector { text: String },
    #[snafu(display(
        "Symbolic link entry '{}' contains the arrow separator {} times, expected exactly once",
        text,
        occurrences
    ))]
    AmbiguousSymlink { text: String, occurrences: usize },
}
