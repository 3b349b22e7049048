use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::OutlineTree;

pub trait ToTermTree {
    /// One display tree per root.
    fn to_term_trees(&self) -> Vec<Tree<String>>;
}

impl ToTermTree for OutlineTree {
    #[instrument(level = "debug", skip(self))]
    fn to_term_trees(&self) -> Vec<Tree<String>> {
        fn build(tree: &OutlineTree, idx: Index) -> Tree<String> {
            let Some(node) = tree.get_node(idx) else {
                return Tree::new(String::new());
            };
            let mut label = node.title.clone();
            if node.highlighted {
                label = format!("{label} <");
            }
            if !node.expanded && !node.is_leaf() {
                // collapsed: show how much is hidden
                let hidden = tree.descendants(idx).len();
                return Tree::new(format!("{label} (+{hidden})"));
            }
            let leaves: Vec<_> = node.children.iter().map(|&c| build(tree, c)).collect();
            Tree::new(label).with_leaves(leaves)
        }

        self.roots().iter().map(|&r| build(self, r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parser::parse;

    #[test]
    fn test_term_tree_renders_nesting() {
        let tree = parse("A\n   B\nC").tree;
        let rendered: Vec<String> = tree.to_term_trees().iter().map(|t| t.to_string()).collect();

        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].starts_with("A\n"));
        assert!(rendered[0].contains("B"));
        assert_eq!(rendered[1].trim_end(), "C");
    }

    #[test]
    fn test_collapsed_node_hides_children() {
        let mut tree = parse("A\n   B\n      C").tree;
        tree.collapse_all();
        let rendered = tree.to_term_trees()[0].to_string();
        assert_eq!(rendered.trim_end(), "A (+2)");
    }
}
