use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Tree node in the arena-based outline structure.
#[derive(Debug, Clone)]
pub struct OutlineNode {
    /// Outline entry text
    pub title: String,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in document order
    pub children: Vec<Index>,
    /// Presentation flag, carried along when the node moves
    pub expanded: bool,
    /// Presentation flag, carried along when the node moves
    pub highlighted: bool,
}

impl OutlineNode {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            parent: None,
            children: Vec::new(),
            expanded: true,
            highlighted: false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for OutlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Arena-based outline with an ordered sequence of roots.
///
/// Ownership is top-down: a node is reachable through `children` (or `roots`)
/// of exactly one container, and its `parent` index mirrors that membership.
/// Both sides are only ever changed together by `link_at`/`unlink`.
#[derive(Debug, Clone, Default)]
pub struct OutlineTree {
    arena: Arena<OutlineNode>,
    roots: Vec<Index>,
}

impl OutlineTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    /// Appends a new node as the last child of `parent`, or as the last root.
    #[instrument(level = "trace", skip(self, title))]
    pub fn insert_node(&mut self, title: impl Into<String>, parent: Option<Index>) -> Index {
        self.insert_node_at(title, parent, usize::MAX)
    }

    /// Inserts a new node at `pos` among `parent`'s children (or the roots).
    /// Positions past the end append.
    pub fn insert_node_at(
        &mut self,
        title: impl Into<String>,
        parent: Option<Index>,
        pos: usize,
    ) -> Index {
        let parent = parent.filter(|&p| self.arena.contains(p));
        let idx = self.arena.insert(OutlineNode::new(title));
        self.link_at(parent, pos, idx);
        idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&OutlineNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut OutlineNode> {
        self.arena.get_mut(idx)
    }

    pub fn contains(&self, idx: Index) -> bool {
        self.arena.contains(idx)
    }

    /// Looks a node up, failing for stale or foreign indices.
    pub fn node(&self, idx: Index) -> DomainResult<&OutlineNode> {
        self.arena.get(idx).ok_or(DomainError::UnknownNode(idx))
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn title(&self, idx: Index) -> Option<&str> {
        self.arena.get(idx).map(|n| n.title.as_str())
    }

    pub fn set_title(&mut self, idx: Index, title: impl Into<String>) -> DomainResult<()> {
        let node = self
            .arena
            .get_mut(idx)
            .ok_or(DomainError::UnknownNode(idx))?;
        node.title = title.into();
        Ok(())
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.arena.get(idx).and_then(|n| n.parent)
    }

    pub fn children(&self, idx: Index) -> &[Index] {
        self.arena
            .get(idx)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Distance from the root (root = 0).
    pub fn depth(&self, idx: Index) -> usize {
        let mut depth = 0;
        let mut current = self.parent(idx);
        while let Some(p) = current {
            depth += 1;
            current = self.parent(p);
        }
        depth
    }

    pub fn is_leaf(&self, idx: Index) -> bool {
        self.children(idx).is_empty()
    }

    pub fn is_bullet(&self, idx: Index) -> bool {
        self.depth(idx) >= 3
    }

    /// Titles from the root down to and including `idx`.
    pub fn breadcrumb(&self, idx: Index) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(idx);
        while let Some(i) = current {
            match self.arena.get(i) {
                Some(node) => {
                    path.push(node.title.clone());
                    current = node.parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// The ordered collection `idx` lives in: its parent's children or the roots.
    pub fn siblings(&self, idx: Index) -> &[Index] {
        match self.parent(idx) {
            Some(p) => self.children(p),
            None => &self.roots,
        }
    }

    pub fn position(&self, idx: Index) -> Option<usize> {
        self.siblings(idx).iter().position(|&i| i == idx)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn total_nodes(&self) -> usize {
        self.arena.len()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|(_, node)| node.is_leaf()).count()
    }

    /// Pre-order, children-in-order traversal across all roots.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Pre-order traversal of the subtree below `idx`, yielding `(index, distance)`
    /// where direct children are at distance 1.
    pub fn descendants(&self, idx: Index) -> Vec<(Index, usize)> {
        let mut out = Vec::new();
        let mut stack: Vec<(Index, usize)> = self
            .children(idx)
            .iter()
            .rev()
            .map(|&c| (c, 1))
            .collect();
        while let Some((current, distance)) = stack.pop() {
            out.push((current, distance));
            for &child in self.children(current).iter().rev() {
                stack.push((child, distance + 1));
            }
        }
        out
    }

    /// Finds the first node, in document order, whose title path from a
    /// root equals `path`.
    ///
    /// Sibling titles need not be unique: a branch whose title matches but
    /// whose subtree does not continue the path is skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_path(&self, path: &[&str]) -> Option<Index> {
        if path.is_empty() {
            return None;
        }
        let mut stack: Vec<(Index, usize)> = self.roots.iter().rev().map(|&r| (r, 0)).collect();
        while let Some((idx, level)) = stack.pop() {
            if self.title(idx) != Some(path[level]) {
                continue;
            }
            if level + 1 == path.len() {
                return Some(idx);
            }
            for &child in self.children(idx).iter().rev() {
                stack.push((child, level + 1));
            }
        }
        None
    }

    pub fn expand_all(&mut self) {
        for (_, node) in self.arena.iter_mut() {
            node.expanded = true;
        }
    }

    pub fn collapse_all(&mut self) {
        for (_, node) in self.arena.iter_mut() {
            node.expanded = false;
        }
    }

    pub fn clear_highlights(&mut self) {
        for (_, node) in self.arena.iter_mut() {
            node.highlighted = false;
        }
    }

    /// Inserts `child` at `pos` of `parent`'s children (or the roots) and sets its
    /// parent index. Callers guarantee `child` is currently unlinked.
    pub(crate) fn link_at(&mut self, parent: Option<Index>, pos: usize, child: Index) {
        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(p) => {
                let pos = pos.min(p.children.len());
                p.children.insert(pos, child);
            }
            None => {
                let pos = pos.min(self.roots.len());
                self.roots.insert(pos, child);
            }
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = parent;
        }
    }

    /// Removes `child` from its container and clears its parent index.
    /// Returns the former parent and position.
    pub(crate) fn unlink(&mut self, child: Index) -> Option<(Option<Index>, usize)> {
        let parent = self.arena.get(child)?.parent;
        let siblings = match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(p) => &mut p.children,
            None => &mut self.roots,
        };
        let pos = siblings.iter().position(|&i| i == child)?;
        siblings.remove(pos);
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = None;
        }
        Some((parent, pos))
    }

    /// Drops `idx` and all of its descendants from the arena.
    /// Callers unlink `idx` first.
    pub(crate) fn drop_subtree(&mut self, idx: Index) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend(node.children);
            }
        }
    }

    pub(crate) fn swap_siblings(&mut self, parent: Option<Index>, a: usize, b: usize) {
        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(p) => p.children.swap(a, b),
            None => self.roots.swap(a, b),
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a OutlineTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a OutlineTree) -> Self {
        let stack = tree.roots().iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a OutlineNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // root
    // ├── child1
    // │   └── grandchild1
    // └── child2
    fn sample() -> (OutlineTree, Index, Index, Index, Index) {
        let mut tree = OutlineTree::new();
        let root = tree.insert_node("root", None);
        let child1 = tree.insert_node("child1", Some(root));
        let grandchild1 = tree.insert_node("grandchild1", Some(child1));
        let child2 = tree.insert_node("child2", Some(root));
        (tree, root, child1, grandchild1, child2)
    }

    #[test]
    fn test_insert_node_links_both_directions() {
        let (tree, root, child1, grandchild1, child2) = sample();

        assert_eq!(tree.roots(), &[root]);
        assert_eq!(tree.children(root), &[child1, child2]);
        assert_eq!(tree.parent(grandchild1), Some(child1));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn test_depth_and_bullet() {
        let (mut tree, root, child1, grandchild1, _) = sample();
        let deep = tree.insert_node("deep", Some(grandchild1));

        assert_eq!(tree.depth(root), 0);
        assert_eq!(tree.depth(child1), 1);
        assert_eq!(tree.depth(deep), 3);
        assert!(tree.is_bullet(deep));
        assert!(!tree.is_bullet(grandchild1));
    }

    #[test]
    fn test_iter_is_preorder() {
        let (tree, ..) = sample();
        let titles: Vec<_> = tree.iter().map(|(_, n)| n.title.as_str()).collect();
        assert_eq!(titles, vec!["root", "child1", "grandchild1", "child2"]);
    }

    #[test]
    fn test_counts() {
        let (tree, ..) = sample();
        assert_eq!(tree.total_nodes(), 4);
        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn test_breadcrumb_and_find_by_path() {
        let (tree, _, _, grandchild1, _) = sample();
        assert_eq!(
            tree.breadcrumb(grandchild1),
            vec!["root", "child1", "grandchild1"]
        );
        assert_eq!(
            tree.find_by_path(&["root", "child1", "grandchild1"]),
            Some(grandchild1)
        );
        assert_eq!(tree.find_by_path(&["root", "missing"]), None);
        assert_eq!(tree.find_by_path(&[]), None);
    }

    #[test]
    fn test_descendants_report_distance() {
        let (tree, root, child1, grandchild1, child2) = sample();
        assert_eq!(
            tree.descendants(root),
            vec![(child1, 1), (grandchild1, 2), (child2, 1)]
        );
    }

    #[test]
    fn test_unlink_and_drop_subtree() {
        let (mut tree, root, child1, grandchild1, child2) = sample();

        assert_eq!(tree.unlink(child1), Some((Some(root), 0)));
        tree.drop_subtree(child1);

        assert_eq!(tree.children(root), &[child2]);
        assert!(!tree.contains(grandchild1));
        assert_eq!(tree.total_nodes(), 2);
    }

    #[test]
    fn test_find_by_path_backtracks_over_repeated_titles() {
        let mut tree = OutlineTree::new();
        let first = tree.insert_node("Example", None);
        let second = tree.insert_node("Example", None);
        let detail = tree.insert_node("Detail", Some(second));

        assert_eq!(tree.find_by_path(&["Example"]), Some(first));
        assert_eq!(tree.find_by_path(&["Example", "Detail"]), Some(detail));
        assert_eq!(tree.find_by_path(&["Example", "Missing"]), None);
        assert_eq!(tree.find_by_path(&[]), None);
    }

    #[test]
    fn test_collapse_and_expand_all() {
        let (mut tree, root, child1, ..) = sample();

        tree.collapse_all();
        assert!(!tree.get_node(root).unwrap().expanded);
        assert!(!tree.get_node(child1).unwrap().expanded);

        tree.expand_all();
        assert!(tree.iter().all(|(_, n)| n.expanded));
    }

    #[test]
    fn test_stale_index_is_reported() {
        let (mut tree, _, child1, _, _) = sample();
        tree.unlink(child1);
        tree.drop_subtree(child1);

        assert!(matches!(
            tree.node(child1),
            Err(DomainError::UnknownNode(_))
        ));
        assert!(tree.set_title(child1, "x").is_err());
    }
}
