//! Outline text parsing.
//!
//! Two grammars share one pass: indentation depth, and markdown `#` headers.
//! Once a header has been seen, content lines nest below the most recent
//! header and their own indent only orders them among each other.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::OutlineTree;

/// Base for header depths. Header depths sit far below zero so they always
/// compare shallower than indentation depths, which start at zero.
const HEADER_DEPTH_BASE: i64 = i64::MIN / 2;

/// Output of [`parse`]: the tree plus counts taken once after construction.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub tree: OutlineTree,
    pub total_nodes: usize,
    pub leaf_count: usize,
}

impl ParseResult {
    fn new(tree: OutlineTree) -> Self {
        let total_nodes = tree.total_nodes();
        let leaf_count = tree.leaf_count();
        Self {
            tree,
            total_nodes,
            leaf_count,
        }
    }

    pub fn roots(&self) -> &[Index] {
        self.tree.roots()
    }

    /// Summary shown next to an editor, e.g. `"6 items, 3 cards"`.
    pub fn status(&self) -> String {
        status_line(self.total_nodes, self.leaf_count)
    }
}

pub fn status_line(total_nodes: usize, leaf_count: usize) -> String {
    format!("{total_nodes} items, {leaf_count} cards")
}

/// A non-blank line with a usable title.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OutlineLine<'a> {
    Header { hash_count: usize, title: &'a str },
    Content { indent: usize, title: &'a str },
}

/// State threaded through the line loop.
#[derive(Debug, Default)]
struct ParseState {
    seen_header: bool,
    last_header_depth: i64,
    /// Current ancestor chain as (depth, node)
    stack: Vec<(i64, Index)>,
}

impl ParseState {
    fn depth_of(&mut self, line: &OutlineLine<'_>) -> i64 {
        match *line {
            OutlineLine::Header { hash_count, .. } => {
                let depth = HEADER_DEPTH_BASE.saturating_add(hash_count as i64);
                self.seen_header = true;
                self.last_header_depth = depth;
                depth
            }
            OutlineLine::Content { indent, .. } if self.seen_header => self
                .last_header_depth
                .saturating_add(1)
                .saturating_add(indent as i64),
            OutlineLine::Content { indent, .. } => indent as i64,
        }
    }

    fn attach(&mut self, tree: &mut OutlineTree, depth: i64, title: &str) -> Index {
        while matches!(self.stack.last(), Some(&(d, _)) if d >= depth) {
            self.stack.pop();
        }
        let parent = self.stack.last().map(|&(_, idx)| idx);
        let idx = tree.insert_node(title, parent);
        self.stack.push((depth, idx));
        idx
    }
}

fn classify(raw: &str) -> Option<OutlineLine<'_>> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('#') {
        let title_start = trimmed.trim_start_matches('#');
        let hash_count = trimmed.len() - title_start.len();
        let title = title_start.trim();
        return (!title.is_empty()).then_some(OutlineLine::Header { hash_count, title });
    }

    let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
    let title = trimmed
        .strip_prefix(|c| c == '-' || c == '*')
        .unwrap_or(trimmed)
        .trim();
    (!title.is_empty()).then_some(OutlineLine::Content { indent, title })
}

/// Parses outline text into a tree in a single greedy pass.
///
/// Blank lines, bare `#` runs and bare list markers produce nothing.
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn parse(text: &str) -> ParseResult {
    let mut tree = OutlineTree::new();
    let mut state = ParseState::default();

    for raw in text.split('\n') {
        let Some(line) = classify(raw) else {
            continue;
        };
        let depth = state.depth_of(&line);
        let title = match line {
            OutlineLine::Header { title, .. } | OutlineLine::Content { title, .. } => title,
        };
        trace!(depth, title, "line");
        state.attach(&mut tree, depth, title);
    }

    let result = ParseResult::new(tree);
    debug!(
        total = result.total_nodes,
        leaves = result.leaf_count,
        "parsed outline"
    );
    result
}

/// Title of the first `# ` header line (a single `#`), if any.
pub fn extract_title(text: &str) -> Option<String> {
    text.split('\n')
        .map(str::trim_start)
        .find(|line| line.starts_with("# "))
        .map(|line| line[2..].trim().to_string())
        .filter(|title| !title.is_empty())
}
