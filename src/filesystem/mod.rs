//! In-memory model of a parsed directory listing and its materialization
//! onto a real filesystem.
//!
//! [`TreeNode`] is built once by the listing parser and then only read:
//! by [`Materializer`] to create directories, files and symbolic links, and
//! by [`TreeNode::to_listing`] to print it back in listing form.

mod materialize;
mod tree;

pub use materialize::{MaterializeError, MaterializeReport, Materializer};
pub(crate) use tree::pluralize;
pub use tree::{Symlink, TreeCounts, TreeNode};
