//! JSON output formatting

use std::io::{self, Write};

use crate::tree::DirectoryNode;

/// Render the tree as pretty-printed JSON.
pub fn render_json(node: &DirectoryNode) -> io::Result<String> {
    serde_json::to_string_pretty(node).map_err(io::Error::other)
}

/// Write the tree as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(node: &DirectoryNode, out: &mut W) -> io::Result<()> {
    let json = render_json(node)?;
    writeln!(out, "{}", json)
}
