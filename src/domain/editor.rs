//! Structural editing of an outline.
//!
//! Every operation takes the current selection and returns the new one.
//! Unmet preconditions (nothing selected, no parent, no neighbour) are no-ops.
//! A selection whose slot is empty here (a removed node, or an index from
//! another tree that has no node at that slot and generation) is rejected
//! before anything moves. `Index` carries no tree identity, so an index from
//! another tree that happens to name a live slot here selects that node.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::OutlineTree;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::parser::{parse, status_line};
use crate::domain::serializer::to_text;

/// Title given to nodes created by the editor.
pub const DEFAULT_NEW_ITEM_TITLE: &str = "New item";

impl OutlineTree {
    /// Rejects selections with no live node at their slot and generation.
    fn check(&self, selection: Option<Index>) -> DomainResult<()> {
        match selection {
            Some(idx) if !self.contains(idx) => Err(DomainError::UnknownNode(idx)),
            _ => Ok(()),
        }
    }

    /// Inserts a node right after the selection, or appends a root when
    /// nothing is selected.
    #[instrument(level = "debug", skip(self, title))]
    pub fn insert_sibling(
        &mut self,
        selection: Option<Index>,
        title: impl Into<String>,
    ) -> DomainResult<Index> {
        self.check(selection)?;
        let Some(selected) = selection else {
            return Ok(self.insert_node(title, None));
        };
        let parent = self.parent(selected);
        let pos = self.position(selected).map_or(0, |p| p + 1);
        Ok(self.insert_node_at(title, parent, pos))
    }

    /// Appends a node as the selection's last child.
    #[instrument(level = "debug", skip(self, title))]
    pub fn insert_child(
        &mut self,
        selection: Option<Index>,
        title: impl Into<String>,
    ) -> DomainResult<Index> {
        self.check(selection)?;
        match selection {
            Some(selected) => Ok(self.insert_node(title, Some(selected))),
            None => self.insert_sibling(None, title),
        }
    }

    /// Removes the selection together with its subtree.
    ///
    /// Selects the previous sibling, else the next one, else the parent.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, selection: Option<Index>) -> DomainResult<Option<Index>> {
        self.check(selection)?;
        let Some(selected) = selection else {
            return Ok(None);
        };
        let siblings = self.siblings(selected);
        let pos = self.position(selected).unwrap_or(0);
        let next = if pos > 0 {
            Some(siblings[pos - 1])
        } else if siblings.len() > 1 {
            Some(siblings[1])
        } else {
            self.parent(selected)
        };

        self.unlink(selected);
        self.drop_subtree(selected);
        debug!(remaining = self.total_nodes(), "removed subtree");
        Ok(next)
    }

    /// Moves the selection one level out, right after its former parent.
    /// Siblings that followed it become its trailing children.
    #[instrument(level = "debug", skip(self))]
    pub fn promote(&mut self, selection: Option<Index>) -> DomainResult<Option<Index>> {
        self.check(selection)?;
        let Some(selected) = selection else {
            return Ok(None);
        };
        let Some(parent) = self.parent(selected) else {
            return Ok(selection);
        };
        let grandparent = self.parent(parent);
        let parent_pos = self.position(parent).unwrap_or(0);

        let Some((_, pos)) = self.unlink(selected) else {
            return Ok(selection);
        };
        let trailing: Vec<Index> = self.children(parent)[pos..].to_vec();
        for child in trailing {
            self.unlink(child);
            let end = self.children(selected).len();
            self.link_at(Some(selected), end, child);
        }
        self.link_at(grandparent, parent_pos + 1, selected);
        Ok(selection)
    }

    /// Nests the selection as the last child of its preceding sibling.
    #[instrument(level = "debug", skip(self))]
    pub fn demote(&mut self, selection: Option<Index>) -> DomainResult<Option<Index>> {
        self.check(selection)?;
        let Some(selected) = selection else {
            return Ok(None);
        };
        let pos = self.position(selected).unwrap_or(0);
        if pos == 0 {
            return Ok(selection);
        }
        let previous = self.siblings(selected)[pos - 1];
        self.unlink(selected);
        let end = self.children(previous).len();
        self.link_at(Some(previous), end, selected);
        Ok(selection)
    }

    /// Swaps the selection with its preceding sibling.
    #[instrument(level = "debug", skip(self))]
    pub fn move_up(&mut self, selection: Option<Index>) -> DomainResult<Option<Index>> {
        self.check(selection)?;
        let Some(selected) = selection else {
            return Ok(None);
        };
        let pos = self.position(selected).unwrap_or(0);
        if pos > 0 {
            self.swap_siblings(self.parent(selected), pos, pos - 1);
        }
        Ok(selection)
    }

    /// Swaps the selection with its following sibling.
    #[instrument(level = "debug", skip(self))]
    pub fn move_down(&mut self, selection: Option<Index>) -> DomainResult<Option<Index>> {
        self.check(selection)?;
        let Some(selected) = selection else {
            return Ok(None);
        };
        let pos = self.position(selected).unwrap_or(0);
        if pos + 1 < self.siblings(selected).len() {
            self.swap_siblings(self.parent(selected), pos, pos + 1);
        }
        Ok(selection)
    }
}

/// Outline being edited structurally, with its selection.
#[derive(Debug, Clone)]
pub struct OutlineEditor {
    tree: OutlineTree,
    selection: Option<Index>,
    new_item_title: String,
}

impl Default for OutlineEditor {
    fn default() -> Self {
        Self::new(DEFAULT_NEW_ITEM_TITLE)
    }
}

impl OutlineEditor {
    pub fn new(new_item_title: impl Into<String>) -> Self {
        Self {
            tree: OutlineTree::new(),
            selection: None,
            new_item_title: new_item_title.into(),
        }
    }

    pub fn with_tree(tree: OutlineTree, new_item_title: impl Into<String>) -> Self {
        Self {
            tree,
            selection: None,
            new_item_title: new_item_title.into(),
        }
    }

    pub fn tree(&self) -> &OutlineTree {
        &self.tree
    }

    pub fn into_tree(self) -> OutlineTree {
        self.tree
    }

    pub fn selection(&self) -> Option<Index> {
        self.selection
    }

    pub fn select(&mut self, selection: Option<Index>) -> DomainResult<()> {
        self.tree.check(selection)?;
        self.selection = selection;
        Ok(())
    }

    /// Replaces the tree with the parse of `text` and clears the selection.
    pub fn load_from_text(&mut self, text: &str) {
        self.tree = parse(text).tree;
        self.selection = None;
    }

    pub fn to_text(&self) -> String {
        to_text(&self.tree)
    }

    pub fn status(&self) -> String {
        status_line(self.tree.total_nodes(), self.tree.leaf_count())
    }

    pub fn rename(&mut self, title: impl Into<String>) -> DomainResult<()> {
        match self.selection {
            Some(idx) => self.tree.set_title(idx, title),
            None => Ok(()),
        }
    }

    pub fn add_item(&mut self) -> DomainResult<Index> {
        let idx = self
            .tree
            .insert_sibling(self.selection, self.new_item_title.clone())?;
        self.selection = Some(idx);
        Ok(idx)
    }

    pub fn add_child(&mut self) -> DomainResult<Index> {
        let idx = self
            .tree
            .insert_child(self.selection, self.new_item_title.clone())?;
        self.selection = Some(idx);
        Ok(idx)
    }

    pub fn remove_item(&mut self) -> DomainResult<()> {
        self.selection = self.tree.remove(self.selection)?;
        Ok(())
    }

    pub fn promote(&mut self) -> DomainResult<()> {
        self.selection = self.tree.promote(self.selection)?;
        Ok(())
    }

    pub fn demote(&mut self) -> DomainResult<()> {
        self.selection = self.tree.demote(self.selection)?;
        Ok(())
    }

    pub fn move_up(&mut self) -> DomainResult<()> {
        self.selection = self.tree.move_up(self.selection)?;
        Ok(())
    }

    pub fn move_down(&mut self) -> DomainResult<()> {
        self.selection = self.tree.move_down(self.selection)?;
        Ok(())
    }
}
