//! Card generation: outline tree to an ordered deck of speech cards.
//!
//! Depths 0..=1 become breadcrumb context, depth 2 is the deepest card topic,
//! and anything below a depth-2 topic collapses into that card's bullets.

use generational_arena::Index;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::arena::OutlineTree;

/// Number of depth levels that produce cards rather than bullets.
pub const MAX_STRUCTURAL_DEPTH: usize = 3;

/// One bullet on a card, indented relative to the card topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletItem {
    pub text: String,
    /// 0 for the topic's direct children, 1 for grandchildren, ...
    pub indent_level: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechCard {
    /// Ancestor titles from the root down to the topic's parent
    pub breadcrumb: Vec<String>,
    pub topic: String,
    /// 1-based position, assigned once the deck is complete
    pub ordinal: usize,
    pub total: usize,
    pub bullets: Vec<BulletItem>,
}

impl SpeechCard {
    fn new(breadcrumb: &[String], topic: &str) -> Self {
        Self {
            breadcrumb: breadcrumb.to_vec(),
            topic: topic.to_string(),
            ordinal: 0,
            total: 0,
            bullets: Vec::new(),
        }
    }

    pub fn has_bullets(&self) -> bool {
        !self.bullets.is_empty()
    }

    /// Breadcrumb and topic joined with `" > "`.
    pub fn full_path(&self) -> String {
        self.path_segments().collect::<Vec<_>>().join(" > ")
    }

    fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.breadcrumb
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.topic.as_str()))
    }
}

/// Builds the card deck for every root in document order, numbered 1..=N.
#[instrument(level = "debug", skip(tree))]
pub fn generate(tree: &OutlineTree) -> Vec<SpeechCard> {
    let mut cards = Vec::new();
    let mut breadcrumb = Vec::new();
    for &root in tree.roots() {
        collect_cards(tree, root, 0, &mut breadcrumb, &mut cards);
    }
    renumber(&mut cards);
    debug!(count = cards.len(), "generated cards");
    cards
}

/// (Re)assigns ordinals and totals after the deck composition changed.
pub fn renumber(cards: &mut [SpeechCard]) {
    let total = cards.len();
    for (i, card) in cards.iter_mut().enumerate() {
        card.ordinal = i + 1;
        card.total = total;
    }
}

fn collect_cards(
    tree: &OutlineTree,
    idx: Index,
    depth: usize,
    breadcrumb: &mut Vec<String>,
    cards: &mut Vec<SpeechCard>,
) {
    let Some(node) = tree.get_node(idx) else {
        return;
    };

    if depth + 1 >= MAX_STRUCTURAL_DEPTH && !node.is_leaf() {
        let mut card = SpeechCard::new(breadcrumb, &node.title);
        card.bullets = tree
            .descendants(idx)
            .into_iter()
            .filter_map(|(child, distance)| {
                tree.title(child).map(|text| BulletItem {
                    text: text.to_string(),
                    indent_level: distance - 1,
                })
            })
            .collect();
        cards.push(card);
    } else if node.is_leaf() {
        cards.push(SpeechCard::new(breadcrumb, &node.title));
    } else {
        breadcrumb.push(node.title.clone());
        for &child in &node.children {
            collect_cards(tree, child, depth + 1, breadcrumb, cards);
        }
        breadcrumb.pop();
    }
}

/// Index of the card a node maps to, given the node's full title path.
///
/// Takes the first card whose path equals the node path, lies below it
/// (the node is a breadcrumb ancestor), or is a prefix of it (the node was
/// collapsed into that card's bullets).
pub fn locate_card<S: AsRef<str>>(cards: &[SpeechCard], node_path: &[S]) -> Option<usize> {
    cards.iter().position(|card| {
        let card_path: Vec<&str> = card.path_segments().collect();
        let shared = card_path.len().min(node_path.len());
        !node_path.is_empty()
            && card_path[..shared]
                .iter()
                .zip(&node_path[..shared])
                .all(|(a, b)| *a == b.as_ref())
    })
}
