//! Outline document and its persisted JSON shape.

use chrono::{DateTime, Utc};
use generational_arena::Index;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::arena::OutlineTree;
use crate::domain::parser::parse;

pub const DEFAULT_OUTLINE_NAME: &str = "Untitled Outline";

/// A named outline with its tree and timestamps.
#[derive(Debug, Clone)]
pub struct Outline {
    pub name: String,
    pub file_path: Option<PathBuf>,
    pub tree: OutlineTree,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Default for Outline {
    fn default() -> Self {
        Self::new(DEFAULT_OUTLINE_NAME, OutlineTree::new())
    }
}

impl Outline {
    pub fn new(name: impl Into<String>, tree: OutlineTree) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            file_path: None,
            tree,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    pub fn to_document(&self) -> OutlineDocument {
        OutlineDocument {
            name: self.name.clone(),
            file_path: self.file_path.clone(),
            root_nodes: self
                .tree
                .roots()
                .iter()
                .map(|&r| NodeDocument::from_tree(&self.tree, r))
                .collect(),
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}

/// Parses outline text straight into a fresh [`Outline`].
pub fn parse_to_outline(text: &str, name: impl Into<String>) -> Outline {
    Outline::new(name, parse(text).tree)
}

/// Serialized form of an [`Outline`]. Parent links are implied by nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineDocument {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub file_path: Option<PathBuf>,
    #[serde(default)]
    pub root_nodes: Vec<NodeDocument>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub modified_at: DateTime<Utc>,
}

fn default_name() -> String {
    DEFAULT_OUTLINE_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub title: String,
    #[serde(default)]
    pub children: Vec<NodeDocument>,
}

impl NodeDocument {
    pub fn new(title: impl Into<String>, children: Vec<NodeDocument>) -> Self {
        Self {
            title: title.into(),
            children,
        }
    }

    fn from_tree(tree: &OutlineTree, idx: Index) -> Self {
        Self {
            title: tree.title(idx).unwrap_or_default().to_string(),
            children: tree
                .children(idx)
                .iter()
                .map(|&c| Self::from_tree(tree, c))
                .collect(),
        }
    }

    fn insert_into(&self, tree: &mut OutlineTree, parent: Option<Index>) {
        let idx = tree.insert_node(self.title.as_str(), parent);
        for child in &self.children {
            child.insert_into(tree, Some(idx));
        }
    }
}

impl From<OutlineDocument> for Outline {
    /// Rebuilds the tree, restoring parent links from nesting.
    fn from(doc: OutlineDocument) -> Self {
        let mut tree = OutlineTree::new();
        for root in &doc.root_nodes {
            root.insert_into(&mut tree, None);
        }
        Self {
            name: doc.name,
            file_path: doc.file_path,
            tree,
            created_at: doc.created_at,
            modified_at: doc.modified_at,
        }
    }
}
