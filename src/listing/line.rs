/// Indentation column drawn while an ancestor still has siblings below it.
pub const CONTINUATION_MARKER: &str = "│   ";
/// Indentation column drawn once an ancestor was the last of its siblings.
pub const BLANK_MARKER: &str = "    ";

/// Result of matching a raw listing line against an expected depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    /// The line with every leading indentation marker removed
    pub remainder: &'a str,
    /// Number of indentation markers that were stripped
    pub depth: usize,
    pub matches: bool,
}

/// Strips indentation markers from the front of `line` and reports whether
/// the line sits at `expected_depth`.
///
/// Stripping stops at the first four-character column that is neither
/// [`CONTINUATION_MARKER`] nor [`BLANK_MARKER`].
pub fn classify(line: &str, expected_depth: usize) -> ClassifiedLine<'_> {
    let mut remainder = line;
    let mut depth = 0;

    while let Some(rest) = remainder
        .strip_prefix(CONTINUATION_MARKER)
        .or_else(|| remainder.strip_prefix(BLANK_MARKER))
    {
        remainder = rest;
        depth += 1;
    }

    ClassifiedLine {
        remainder,
        depth,
        matches: depth == expected_depth,
    }
}
