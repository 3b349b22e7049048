//! Practice mode: stepping through a card deck card by card or chapter by chapter.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::OutlineTree;
use crate::domain::cards::{locate_card, SpeechCard};
use crate::domain::chapters::ChapterNavigator;

#[derive(Debug, Clone)]
pub struct PracticeSession {
    navigator: ChapterNavigator,
    current: usize,
}

impl PracticeSession {
    /// Starts at `start`, clamped into the deck.
    pub fn new(cards: Vec<SpeechCard>, start: usize) -> Self {
        let current = start.min(cards.len().saturating_sub(1));
        Self {
            navigator: ChapterNavigator::new(cards),
            current,
        }
    }

    pub fn navigator(&self) -> &ChapterNavigator {
        &self.navigator
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_card(&self) -> Option<&SpeechCard> {
        self.navigator.cards().get(self.current)
    }

    pub fn total(&self) -> usize {
        self.navigator.len()
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.total()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_next_chapter(&self) -> bool {
        self.navigator.can_go_next_chapter(self.current)
    }

    /// Backward chapter navigation always has somewhere to go off the first card.
    pub fn can_go_previous_chapter(&self) -> bool {
        self.current > 0
    }

    pub fn next_card(&mut self) -> bool {
        self.go_to(self.can_go_next().then(|| self.current + 1))
    }

    pub fn previous_card(&mut self) -> bool {
        self.go_to(self.can_go_previous().then(|| self.current - 1))
    }

    pub fn next_chapter(&mut self) -> bool {
        self.go_to(self.navigator.next_chapter_index(self.current))
    }

    pub fn previous_chapter(&mut self) -> bool {
        let target = self.navigator.previous_chapter_index(self.current);
        self.go_to((target != self.current).then_some(target))
    }

    /// Jumps to the card a node path maps to; stays put when nothing matches.
    #[instrument(level = "debug", skip(self, node_path))]
    pub fn go_to_path<S: AsRef<str>>(&mut self, node_path: &[S]) -> bool {
        self.go_to(locate_card(self.navigator.cards(), node_path))
    }

    fn go_to(&mut self, target: Option<usize>) -> bool {
        match target {
            Some(index) if index < self.total() => {
                debug!(from = self.current, to = index, "go to card");
                self.current = index;
                true
            }
            _ => false,
        }
    }

    /// `"Card i of N"`, or `"No cards"` for an empty deck.
    pub fn position_label(&self) -> String {
        if self.total() == 0 {
            "No cards".to_string()
        } else {
            format!("Card {} of {}", self.current + 1, self.total())
        }
    }

    /// Highlights the node whose full path matches the current card and
    /// expands its ancestors. All other highlights are cleared.
    pub fn highlight_current(&self, tree: &mut OutlineTree) -> Option<Index> {
        tree.clear_highlights();
        let card = self.current_card()?;
        let path: Vec<&str> = card
            .breadcrumb
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(card.topic.as_str()))
            .collect();
        let target = tree.find_by_path(&path)?;

        if let Some(node) = tree.get_node_mut(target) {
            node.highlighted = true;
        }
        let mut ancestor = tree.parent(target);
        while let Some(idx) = ancestor {
            if let Some(node) = tree.get_node_mut(idx) {
                node.expanded = true;
            }
            ancestor = tree.parent(idx);
        }
        Some(target)
    }
}
