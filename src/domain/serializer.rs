//! Tree to text.
//!
//! Emits pure indentation only, so it inverts the parser's indentation mode.
//! Header documents come back as indentation documents; `#` is never written.

use tracing::instrument;

use crate::domain::arena::OutlineTree;

/// Spaces per depth level.
pub const INDENT_WIDTH: usize = 3;

/// One line per node, depth-first, indented `depth * 3` spaces.
#[instrument(level = "debug", skip(tree))]
pub fn to_text(tree: &OutlineTree) -> String {
    tree.iter()
        .map(|(idx, node)| {
            format!(
                "{}{}",
                " ".repeat(tree.depth(idx) * INDENT_WIDTH),
                node.title
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
