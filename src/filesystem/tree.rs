use std::fmt;

use derive_more::Display;
use hashlink::LinkedHashMap;

use crate::listing::{BLANK_MARKER, BRANCH_CONNECTOR, CONTINUATION_MARKER, TERMINAL_CONNECTOR};

/// A symbolic link entry, stored exactly as it appeared in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{target} -> {source}")]
pub struct Symlink {
    /// Name of the link itself, relative to its directory
    pub target: String,
    /// Path text the link points at; never resolved or validated
    pub source: String,
}

impl Symlink {
    pub fn new(target: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
        }
    }
}

/// Picks the noun form matching `count`, as the listing tool's summary does.
pub(crate) fn pluralize(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

/// One directory of a parsed listing, the implicit root included.
///
/// Children are only ever appended while the parser is filling the node, so
/// every collection keeps listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    pub directories: LinkedHashMap<String, TreeNode>,
    pub files: Vec<String>,
    pub symlinks: Vec<Symlink>,
}

/// Number of entries below a node, the node itself excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeCounts {
    pub directories: usize,
    pub files: usize,
    pub symlinks: usize,
}

impl TreeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty() && self.symlinks.is_empty()
    }

    /// Number of direct children across all three collections.
    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len() + self.symlinks.len()
    }

    pub fn counts(&self) -> TreeCounts {
        self.directories.values().fold(
            TreeCounts {
                directories: self.directories.len(),
                files: self.files.len(),
                symlinks: self.symlinks.len(),
            },
            |acc, child| {
                let nested = child.counts();
                TreeCounts {
                    directories: acc.directories + nested.directories,
                    files: acc.files + nested.files,
                    symlinks: acc.symlinks + nested.symlinks,
                }
            },
        )
    }

    /// Renders the tree in the same listing format the parser consumes,
    /// including the root marker and the trailing summary line.
    pub fn to_listing(&self) -> String {
        self.to_string()
    }

    fn write_children(&self, f: &mut fmt::Formatter<'_>, prefix: &mut String) -> fmt::Result {
        let total = self.len();
        let mut index = 0;
        let mut next_connector = || {
            index += 1;
            if index == total {
                (TERMINAL_CONNECTOR, BLANK_MARKER)
            } else {
                (BRANCH_CONNECTOR, CONTINUATION_MARKER)
            }
        };

        for (name, child) in &self.directories {
            let (connector, marker) = next_connector();
            writeln!(f, "{prefix}{connector}{name}")?;
            let restore = prefix.len();
            prefix.push_str(marker);
            child.write_children(f, prefix)?;
            prefix.truncate(restore);
        }
        for name in &self.files {
            let (connector, _) = next_connector();
            writeln!(f, "{prefix}{connector}{name}")?;
        }
        for symlink in &self.symlinks {
            let (connector, _) = next_connector();
            writeln!(f, "{prefix}{connector}{symlink}")?;
        }

        Ok(())
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".")?;
        self.write_children(f, &mut String::new())?;

        // The listing tool counts symbolic links as files.
        let counts = self.counts();
        let files = counts.files + counts.symlinks;
        writeln!(f)?;
        writeln!(
            f,
            "{} {}, {} {}",
            counts.directories,
            pluralize(counts.directories, "directory", "directories"),
            files,
            pluralize(files, "file", "files"),
        )
    }
}
