use snafu::{ResultExt, Snafu};
use tracing::{debug, warn};

use crate::filesystem::TreeNode;
use crate::listing::{EntryError, EntryName, ListingLine, classify, parse_entry};

/// Read position over the listing lines with single-line lookahead.
struct LineCursor<'a> {
    lines: &'a [ListingLine],
    position: usize,
}

impl<'a> LineCursor<'a> {
    fn new(lines: &'a [ListingLine]) -> Self {
        Self { lines, position: 0 }
    }

    fn peek(&self) -> Option<&'a ListingLine> {
        self.lines.get(self.position)
    }

    fn advance(&mut self) -> Option<&'a ListingLine> {
        let line = self.lines.get(self.position)?;
        self.position += 1;
        Some(line)
    }

    fn remaining(&self) -> &'a [ListingLine] {
        &self.lines[self.position..]
    }
}

/// A directory whose subtree is still being read.
struct OpenDirectory {
    name: String,
    node: TreeNode,
}

/// Attaches a finished directory to whichever node is now on top.
fn close_directory(base: &mut TreeNode, open: &mut Vec<OpenDirectory>) {
    let Some(finished) = open.pop() else {
        return;
    };
    let parent = open.last_mut().map_or(base, |frame| &mut frame.node);
    debug!(
        "Closing directory '{}' with {} entries",
        finished.name,
        finished.node.len()
    );
    if parent
        .directories
        .insert(finished.name.clone(), finished.node)
        .is_some()
    {
        warn!(
            "Directory '{}' appears twice at the same level, keeping the later one",
            finished.name
        );
    }
}

/// Consumes every line that belongs to `node` at `depth` and returns the
/// lines that were not consumed.
///
/// A line that does not sit at the current depth ends the current directory
/// and is retried one level up; at `depth` itself it ends the call. Whether an
/// entry is a directory is decided only by peeking at the next line: if that
/// line sits one level deeper, the entry opens a new directory. Open
/// directories are tracked on an explicit stack, so nesting depth does not
/// grow the call stack.
pub fn parse_level<'a>(
    lines: &'a [ListingLine],
    node: &mut TreeNode,
    depth: usize,
) -> Result<&'a [ListingLine], ParseError> {
    let mut cursor = LineCursor::new(lines);
    let mut open: Vec<OpenDirectory> = Vec::new();

    while let Some(line) = cursor.peek() {
        let current_depth = depth + open.len();
        let classified = classify(&line.text, current_depth);
        if !classified.matches {
            if open.is_empty() {
                break;
            }
            close_directory(node, &mut open);
            continue;
        }
        cursor.advance();

        let opens_directory = cursor
            .peek()
            .is_some_and(|next| classify(&next.text, current_depth + 1).matches);

        let entry = parse_entry(classified.remainder).context(MalformedEntrySnafu {
            line_number: line.number,
        })?;

        let target = open.last_mut().map_or(&mut *node, |frame| &mut frame.node);
        match entry {
            EntryName::Symlink(symlink) => {
                debug!("Line {}: symlink {}", line.number, symlink);
                target.symlinks.push(symlink);
            }
            EntryName::Plain(name) if opens_directory => {
                debug!(
                    "Line {}: directory '{}' at depth {}",
                    line.number, name, current_depth
                );
                open.push(OpenDirectory {
                    name,
                    node: TreeNode::new(),
                });
            }
            EntryName::Plain(name) => {
                debug!("Line {}: file '{}'", line.number, name);
                target.files.push(name);
            }
        }
    }

    while !open.is_empty() {
        close_directory(node, &mut open);
    }

    Ok(cursor.remaining())
}

/// Parses a complete listing into a fresh root node.
///
/// Any line left over once the top level is finished means the input does not
/// follow the listing grammar and is reported as [`ParseError::TrailingInput`].
pub fn parse_listing(lines: &[ListingLine]) -> Result<TreeNode, ParseError> {
    let mut root = TreeNode::new();
    let leftover = parse_level(lines, &mut root, 0)?;

    if let Some(first) = leftover.first() {
        return Err(ParseError::TrailingInput {
            line_number: first.number,
            text: first.text.clone(),
            remaining: leftover.len(),
        });
    }

    let counts = root.counts();
    debug!(
        "Parsed {} directories, {} files and {} symlinks",
        counts.directories, counts.files, counts.symlinks
    );
    Ok(root)
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ParseError {
    #[snafu(display("Malformed entry on line {}", line_number))]
    MalformedEntry {
        line_number: usize,
        source: EntryError,
    },
    #[snafu(display(
        "Line {} ('{}') does not fit the tree structure, {} line(s) left unparsed",
        line_number,
        text,
        remaining
    ))]
    TrailingInput {
        line_number: usize,
        text: String,
        remaining: usize,
    },
}
