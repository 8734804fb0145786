//! Reading and parsing of textual directory listings.
//!
//! A listing is the indented output of a recursive directory-listing tool:
//!
//! ```text
//! .
//! ├── src
//! │   └── main.rs
//! └── link -> src/main.rs
//! ```
//!
//! [`classify`] works out the depth of a line from its indentation markers,
//! [`parse_entry`] reads the entry after the connector, and
//! [`parse_level`](parser::parse_level) drives both to build a
//! [`TreeNode`](crate::filesystem::TreeNode).

mod entry;
mod line;
mod loader;
mod parser;

pub use entry::{BRANCH_CONNECTOR, EntryError, EntryName, TERMINAL_CONNECTOR, parse_entry};
pub use line::{BLANK_MARKER, CONTINUATION_MARKER, classify};
pub use loader::{Listing, ListingLine, LoadError};
pub use parser::{ParseError, parse_listing};
